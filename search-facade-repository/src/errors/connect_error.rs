//! Connect error types.

use thiserror::Error;

/// Errors that can occur while connecting and preparing the index.
#[derive(Error, Debug, Clone)]
pub enum ConnectError {
    /// The endpoint is not a valid URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// A configuration option is not supported by the backend.
    #[error("Unsupported option: {0}")]
    UnsupportedOption(String),

    /// Failed to establish connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Checking whether the index exists failed.
    #[error("Index existence check failed: {0}")]
    IndexExistsError(String),

    /// Failed to create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// The existing index could not be given the document type mapping.
    #[error("Mapping error: {0}")]
    MappingError(String),

    /// The engine did not acknowledge the index creation.
    #[error("Index creation not acknowledged: {0}")]
    NotAcknowledged(String),
}

impl ConnectError {
    /// Create an invalid endpoint error.
    pub fn invalid_endpoint(msg: impl Into<String>) -> Self {
        Self::InvalidEndpoint(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index existence check error.
    pub fn index_exists(msg: impl Into<String>) -> Self {
        Self::IndexExistsError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a mapping error.
    pub fn mapping(msg: impl Into<String>) -> Self {
        Self::MappingError(msg.into())
    }
}
