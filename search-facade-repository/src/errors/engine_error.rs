//! Backend error types.
//!
//! `SearchEngine` implementations report failures with `EngineError`; the
//! facade maps them into the error of the operation that issued the request.

use thiserror::Error;

/// Errors reported by a search engine backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The request could not be sent or no response was received.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The engine answered with a non-success status.
    #[error("Request failed with status {status}: {body}")]
    StatusError { status: u16, body: String },

    /// The response body could not be interpreted.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl EngineError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::StatusError {
            status,
            body: body.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

impl From<opensearch::Error> for EngineError {
    fn from(err: opensearch::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}
