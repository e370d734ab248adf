//! Write error types.

use thiserror::Error;

/// Errors that can occur during index, delete, flush and bulk operations.
#[derive(Error, Debug, Clone)]
pub enum WriteError {
    /// Failed to serialize a document.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The document did not serialize to a JSON object.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Failed to index a single document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Delete-by-query failed.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Failed to flush the index.
    #[error("Flush error: {0}")]
    FlushError(String),

    /// The bulk request failed as a whole.
    #[error("Bulk error: {0}")]
    BulkError(String),

    /// Failed to delete the index.
    #[error("Delete index error: {0}")]
    DeleteIndexError(String),
}

impl WriteError {
    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create an invalid document error.
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a flush error.
    pub fn flush(msg: impl Into<String>) -> Self {
        Self::FlushError(msg.into())
    }

    /// Create a bulk error.
    pub fn bulk(msg: impl Into<String>) -> Self {
        Self::BulkError(msg.into())
    }

    /// Create a delete index error.
    pub fn delete_index(msg: impl Into<String>) -> Self {
        Self::DeleteIndexError(msg.into())
    }
}
