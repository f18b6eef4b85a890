//! Wire response built from `ResponseWriter` calls.
//!
//! # Responsibilities
//! - Validate status codes, header names and header values as they are written
//! - Preserve header emission order in the resulting `http::Response`
//! - Inject the host's default headers only while `auto_headers` is on
//!
//! # Design Decisions
//! - Values are taken as raw bytes; anything `HeaderValue` accepts
//!   (including empty values and obs-text) passes through untouched
//! - The body is buffered; fixtures are small and `content-length` is set
//!   by the handler, not derived here

use axum::{
    body::Body,
    http::{header::SERVER, HeaderMap, HeaderName, HeaderValue, Response, StatusCode},
};

use crate::http::writer::{ResponseWriter, WritePhase, WriterError, AUTO_SERVER_VALUE};

/// A `ResponseWriter` that assembles an axum response.
#[derive(Debug)]
pub struct WireResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
    auto_headers: bool,
    phase: WritePhase,
}

impl WireResponse {
    pub fn new() -> Self {
        Self {
            status: None,
            headers: HeaderMap::new(),
            body: Vec::new(),
            auto_headers: true,
            phase: WritePhase::default(),
        }
    }

    /// Finish the response. The header block must have been ended.
    pub fn into_response(self) -> Result<Response<Body>, WriterError> {
        self.phase.check_body()?;
        let status = self.status.ok_or(WriterError::StatusMissing)?;

        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        Ok(response)
    }
}

impl Default for WireResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseWriter for WireResponse {
    fn set_auto_headers(&mut self, enabled: bool) {
        self.auto_headers = enabled;
    }

    fn write_status(&mut self, code: u16) -> Result<(), WriterError> {
        let status = StatusCode::from_u16(code).map_err(|_| WriterError::InvalidStatus(code))?;
        self.phase.begin_status()?;
        self.status = Some(status);
        Ok(())
    }

    fn write_header(&mut self, name: &[u8], value: &[u8]) -> Result<(), WriterError> {
        self.phase.check_header()?;

        let invalid = || WriterError::InvalidHeader {
            name: String::from_utf8_lossy(name).into_owned(),
        };
        let name = HeaderName::from_bytes(name).map_err(|_| invalid())?;
        let value = HeaderValue::from_bytes(value).map_err(|_| invalid())?;

        self.headers.append(name, value);
        Ok(())
    }

    fn end_headers(&mut self) -> Result<(), WriterError> {
        self.phase.check_header()?;
        if self.auto_headers && !self.headers.contains_key(SERVER) {
            self.headers
                .insert(SERVER, HeaderValue::from_static(AUTO_SERVER_VALUE));
        }
        self.phase.finish_headers()
    }

    fn write_body(&mut self, bytes: &[u8]) -> Result<(), WriterError> {
        self.phase.check_body()?;
        self.body.extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_response_in_order() {
        let mut w = WireResponse::new();
        w.set_auto_headers(false);
        w.write_status(200).unwrap();
        w.write_header(b"Cache-Control", b"max-age=600000").unwrap();
        w.write_header(b"content-length", b"3").unwrap();
        w.end_headers().unwrap();
        w.write_body(b"abc").unwrap();

        let response = w.into_response().unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let names: Vec<&str> = response.headers().keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["cache-control", "content-length"]);
    }

    #[test]
    fn test_auto_server_header() {
        let mut w = WireResponse::new();
        w.write_status(200).unwrap();
        w.end_headers().unwrap();
        let response = w.into_response().unwrap();
        assert_eq!(
            response.headers().get("server").unwrap().as_bytes(),
            AUTO_SERVER_VALUE.as_bytes()
        );
    }

    #[test]
    fn test_passes_unusual_values_verbatim() {
        let mut w = WireResponse::new();
        w.write_status(200).unwrap();
        w.write_header(b"cross-origin-resource-policy", b"").unwrap();
        w.write_header(b"access-control-allow-origin", b"caf\xe9 *").unwrap();
        w.end_headers().unwrap();
        let response = w.into_response().unwrap();
        assert_eq!(response.headers()["cross-origin-resource-policy"].as_bytes(), b"");
        assert_eq!(
            response.headers()["access-control-allow-origin"].as_bytes(),
            b"caf\xe9 *"
        );
    }

    #[test]
    fn test_rejects_control_bytes() {
        let mut w = WireResponse::new();
        w.write_status(200).unwrap();
        let err = w.write_header(b"content-type", b"image/png\r\nx: y").unwrap_err();
        assert_eq!(
            err,
            WriterError::InvalidHeader {
                name: "content-type".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_status() {
        let mut w = WireResponse::new();
        assert_eq!(w.write_status(42), Err(WriterError::InvalidStatus(42)));
    }

    #[test]
    fn test_unfinished_response_rejected() {
        let mut w = WireResponse::new();
        w.write_status(200).unwrap();
        assert_eq!(w.into_response().unwrap_err(), WriterError::HeadersNotFinalized);
    }
}
