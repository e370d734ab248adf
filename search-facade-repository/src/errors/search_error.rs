//! Search error types.
//!
//! This module defines the error types that can occur during search operations.

use thiserror::Error;

/// Errors that can occur while executing a search.
#[derive(Error, Debug, Clone)]
pub enum SearchError {
    /// Search query execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// A hit's source payload could not be decoded. No partial results are
    /// returned when this happens.
    #[error("Failed to decode hit {position}: {message}")]
    DecodeError { position: usize, message: String },
}

impl SearchError {
    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a decode error for the hit at the given rank position.
    pub fn decode(position: usize, msg: impl Into<String>) -> Self {
        Self::DecodeError {
            position,
            message: msg.into(),
        }
    }
}
