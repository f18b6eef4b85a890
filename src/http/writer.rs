//! Response writer abstraction.
//!
//! # Responsibilities
//! - Define the write-once response surface handlers drive
//!   (status, headers in emission order, end of headers, body)
//! - Enforce write ordering: status → headers → end → body
//! - Provide an in-memory recorder used to inspect exactly what a handler wrote
//!
//! # Design Decisions
//! - Header names and values are raw bytes; validation happens in the
//!   implementation that puts them on the wire (`http::response`)
//! - `auto_headers` defaults to on; handlers that need exclusive control of
//!   the header block switch it off before writing

use thiserror::Error;

/// Name of the header injected when automatic headers are enabled.
pub const AUTO_SERVER_HEADER: &[u8] = b"server";

/// Value of the automatically injected `server` header.
pub const AUTO_SERVER_VALUE: &str = concat!("image-fixture/", env!("CARGO_PKG_VERSION"));

/// Errors raised when a handler drives a writer out of order or with bytes
/// that cannot be represented on the wire.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WriterError {
    #[error("status line already written")]
    StatusAlreadyWritten,

    #[error("status line must be written before headers or body")]
    StatusMissing,

    #[error("invalid status code {0}")]
    InvalidStatus(u16),

    #[error("headers already finalized")]
    HeadersFinalized,

    #[error("headers must be finalized before the body is written")]
    HeadersNotFinalized,

    #[error("header {name:?} cannot be carried in an HTTP response")]
    InvalidHeader { name: String },
}

/// Write-once HTTP response surface.
///
/// Calls must follow the order `write_status`, any number of
/// `write_header`, `end_headers`, then any number of `write_body`.
pub trait ResponseWriter {
    /// Toggle injection of the host's default headers at `end_headers`.
    fn set_auto_headers(&mut self, enabled: bool);

    fn write_status(&mut self, code: u16) -> Result<(), WriterError>;

    /// Append a header. Emission order equals call order.
    fn write_header(&mut self, name: &[u8], value: &[u8]) -> Result<(), WriterError>;

    fn end_headers(&mut self) -> Result<(), WriterError>;

    fn write_body(&mut self, bytes: &[u8]) -> Result<(), WriterError>;
}

/// Position of a writer in the status → headers → body sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePhase {
    /// Nothing written yet.
    #[default]
    Status,
    /// Status written, header block open.
    Headers,
    /// Header block closed, body may be written.
    Body,
}

impl WritePhase {
    pub(crate) fn begin_status(&mut self) -> Result<(), WriterError> {
        match self {
            WritePhase::Status => {
                *self = WritePhase::Headers;
                Ok(())
            }
            _ => Err(WriterError::StatusAlreadyWritten),
        }
    }

    pub(crate) fn check_header(&self) -> Result<(), WriterError> {
        match self {
            WritePhase::Status => Err(WriterError::StatusMissing),
            WritePhase::Headers => Ok(()),
            WritePhase::Body => Err(WriterError::HeadersFinalized),
        }
    }

    pub(crate) fn finish_headers(&mut self) -> Result<(), WriterError> {
        self.check_header()?;
        *self = WritePhase::Body;
        Ok(())
    }

    pub(crate) fn check_body(&self) -> Result<(), WriterError> {
        match self {
            WritePhase::Status => Err(WriterError::StatusMissing),
            WritePhase::Headers => Err(WriterError::HeadersNotFinalized),
            WritePhase::Body => Ok(()),
        }
    }
}

/// Records every write verbatim, in order.
#[derive(Debug, Clone)]
pub struct RecordingWriter {
    pub status: Option<u16>,
    pub headers: Vec<(Vec<u8>, Vec<u8>)>,
    pub body: Vec<u8>,
    pub auto_headers: bool,
    phase: WritePhase,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self {
            status: None,
            headers: Vec::new(),
            body: Vec::new(),
            auto_headers: true,
            phase: WritePhase::default(),
        }
    }

    /// Whether `end_headers` has been called.
    pub fn headers_ended(&self) -> bool {
        self.phase == WritePhase::Body
    }

    /// Header names in emission order, as lossy UTF-8.
    pub fn header_names(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|(name, _)| String::from_utf8_lossy(name).into_owned())
            .collect()
    }

    /// First value recorded for `name` (ASCII case-insensitive).
    pub fn header(&self, name: &str) -> Option<&[u8]> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.as_bytes()))
            .map(|(_, v)| v.as_slice())
    }
}

impl Default for RecordingWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseWriter for RecordingWriter {
    fn set_auto_headers(&mut self, enabled: bool) {
        self.auto_headers = enabled;
    }

    fn write_status(&mut self, code: u16) -> Result<(), WriterError> {
        self.phase.begin_status()?;
        self.status = Some(code);
        Ok(())
    }

    fn write_header(&mut self, name: &[u8], value: &[u8]) -> Result<(), WriterError> {
        self.phase.check_header()?;
        self.headers.push((name.to_vec(), value.to_vec()));
        Ok(())
    }

    fn end_headers(&mut self) -> Result<(), WriterError> {
        self.phase.check_header()?;
        if self.auto_headers && self.header("server").is_none() {
            self.headers
                .push((AUTO_SERVER_HEADER.to_vec(), AUTO_SERVER_VALUE.as_bytes().to_vec()));
        }
        self.phase.finish_headers()
    }

    fn write_body(&mut self, bytes: &[u8]) -> Result<(), WriterError> {
        self.phase.check_body()?;
        self.body.extend_from_slice(bytes);
        Ok(())
    }
}
