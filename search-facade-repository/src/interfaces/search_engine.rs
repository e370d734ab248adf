//! Search engine trait definition.
//!
//! This module defines the abstract interface for the engine operations the
//! facade forwards to, allowing for different backend implementations
//! (OpenSearch, Elasticsearch, in-memory mocks).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::EngineError;
use crate::types::{BulkAction, BulkOutcome, SearchHits, SearchRequest};

/// Abstract interface for search engine operations.
///
/// Every method is one request/response round trip. Implementations own
/// transport concerns such as retries and health checks; the facade adds
/// none of its own.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so one engine can serve
/// concurrent calls through an `Arc`.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Check whether the engine is reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If a node answered successfully
    /// * `Ok(false)` - If a node answered with a failure status
    /// * `Err(EngineError)` - If no response was received
    async fn ping(&self) -> Result<bool, EngineError>;

    /// Result of the most recent background health check, if the backend runs one.
    fn is_healthy(&self) -> bool {
        true
    }

    /// Check whether an index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, EngineError>;

    /// Create an index.
    ///
    /// # Returns
    ///
    /// * `Ok(acknowledged)` - Whether the engine acknowledged the creation
    /// * `Err(EngineError)` - If creation fails
    async fn create_index(&self, index: &str) -> Result<bool, EngineError>;

    /// Make sure an existing index maps the document type field for exact
    /// matching. Fails if the field is already mapped incompatibly.
    async fn ensure_mapping(&self, index: &str) -> Result<(), EngineError>;

    /// Delete an index. Deleting an index that does not exist succeeds.
    async fn delete_index(&self, index: &str) -> Result<(), EngineError>;

    /// Execute a search and return the raw hits.
    ///
    /// # Arguments
    ///
    /// * `request` - Index, document type, query and window to search
    ///
    /// # Returns
    ///
    /// * `Ok(SearchHits)` - Source payloads in rank order plus the total match count
    /// * `Err(EngineError)` - If the search fails
    async fn search(&self, request: &SearchRequest<'_>) -> Result<SearchHits, EngineError>;

    /// Index a single document under the given document type.
    async fn index_document(
        &self,
        index: &str,
        doc_type: &str,
        document: Value,
    ) -> Result<(), EngineError>;

    /// Delete every document of the given type matching the query.
    ///
    /// # Returns
    ///
    /// * `Ok(deleted)` - Number of documents deleted
    /// * `Err(EngineError)` - If the deletion fails
    async fn delete_by_query(
        &self,
        index: &str,
        doc_type: &str,
        query: Value,
    ) -> Result<u64, EngineError>;

    /// Make recent writes to the index durable and visible to searches.
    async fn flush(&self, index: &str) -> Result<(), EngineError>;

    /// Submit index operations as a single bulk request.
    async fn bulk(&self, index: &str, actions: &[BulkAction]) -> Result<BulkOutcome, EngineError>;
}
