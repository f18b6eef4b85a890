//! Fixture error definitions.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::http::writer::WriterError;

/// Errors a fixture responder hands back to the host harness.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The backing file is missing or unreadable.
    #[error("cannot read fixture file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The response writer rejected a write.
    #[error(transparent)]
    Writer(#[from] WriterError),

    /// The blocking responder task panicked or was cancelled.
    #[error("responder task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl FixtureError {
    /// Status code the host harness answers with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            FixtureError::Writer(WriterError::InvalidHeader { .. }) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FixtureError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Fixture failed");
        } else {
            tracing::warn!(error = %self, "Fixture rejected request");
        }
        (status, self.to_string()).into_response()
    }
}
