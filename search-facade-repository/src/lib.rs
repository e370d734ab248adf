//! # Search Facade Repository
//!
//! This crate provides a thin client facade over a search engine. It opens a
//! connection, makes sure the target index exists, and exposes search,
//! insert, delete and bulk operations that forward to a `SearchEngine`
//! backend. A concrete implementation for OpenSearch is included.

pub mod bulk;
pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use bulk::BulkBatch;
pub use client::SearchClient;
pub use config::SearchClientConfig;
pub use errors::{ConnectError, EngineError, SearchError, WriteError};
pub use interfaces::SearchEngine;
pub use opensearch::OpenSearchEngine;
pub use types::{BulkAction, BulkOutcome, SearchHits, SearchRequest};

pub use search_facade_shared::{page_offset, Document, MatchAll, Query, ResultPage, PAGE_SIZE};
