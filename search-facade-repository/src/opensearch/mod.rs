//! OpenSearch implementation of the search engine backend.
//!
//! This module provides a concrete implementation of `SearchEngine`
//! using OpenSearch as the backend.

mod client;
mod index_config;
mod queries;
mod responses;
mod transport;

pub use client::OpenSearchEngine;
pub use index_config::{IndexConfig, DOC_TYPE_FIELD};
pub use transport::RetryPolicy;
