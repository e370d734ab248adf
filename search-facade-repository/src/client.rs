//! Search client facade.
//!
//! This module provides the main client application code uses to search,
//! insert, delete and bulk-index documents in one index. Every call is
//! forwarded to a `SearchEngine` backend and its response reshaped into
//! documents and counts.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::bulk::BulkBatch;
use crate::config::SearchClientConfig;
use crate::errors::{ConnectError, SearchError, WriteError};
use crate::interfaces::SearchEngine;
use crate::opensearch::{OpenSearchEngine, DOC_TYPE_FIELD};
use crate::types::{BulkOutcome, SearchRequest};
use search_facade_shared::{page_offset, Document, Query, ResultPage, PAGE_SIZE};

/// Serialize a document into the source payload sent to the engine.
///
/// Sources must be JSON objects so the backend can attach the document type,
/// and must not carry the reserved document type field themselves.
pub(crate) fn to_source<T: Serialize + ?Sized>(document: &T) -> Result<Value, WriteError> {
    let source =
        serde_json::to_value(document).map_err(|e| WriteError::serialization(e.to_string()))?;

    let Some(fields) = source.as_object() else {
        return Err(WriteError::invalid_document(format!(
            "expected a JSON object, got {}",
            source
        )));
    };
    if fields.contains_key(DOC_TYPE_FIELD) {
        return Err(WriteError::invalid_document(format!(
            "field `{}` is reserved for the document type",
            DOC_TYPE_FIELD
        )));
    }
    Ok(source)
}

/// A connected search client bound to one index.
///
/// Obtained from [`SearchClient::connect`] (or [`SearchClientConfig::connect`]),
/// so every operation runs against an established connection whose index is
/// known to exist. The client adds no locking of its own; clone the `Arc`
/// around it, or the client itself, to share it between tasks.
///
/// # Example
///
/// ```ignore
/// let client = SearchClientConfig::new("http://localhost:9200", "articles")
///     .connect()
///     .await?;
///
/// client.insert("article", &json!({ "title": "Hello" })).await?;
/// let page = client.search(&json!({ "match": { "title": "hello" } }), "article", None).await?;
/// println!("{} of {} matches", page.len(), page.total_hits);
/// ```
#[derive(Clone)]
pub struct SearchClient {
    engine: Arc<dyn SearchEngine>,
    config: SearchClientConfig,
}

impl SearchClient {
    /// Connect to OpenSearch and create the index if it does not exist.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchClient)` - A connected client
    /// * `Err(ConnectError)` - If the connection, the existence check or index creation fails
    pub async fn connect(config: SearchClientConfig) -> Result<Self, ConnectError> {
        let engine = OpenSearchEngine::new(&config).await?;
        Self::connect_with(Arc::new(engine), config).await
    }

    /// Run the connect protocol against an existing engine.
    ///
    /// Pings the engine, checks whether the configured index exists and
    /// creates it when missing. An existing index is left untouched.
    #[instrument(skip(engine, config), fields(endpoint = %config.endpoint, index = %config.index))]
    pub async fn connect_with(
        engine: Arc<dyn SearchEngine>,
        config: SearchClientConfig,
    ) -> Result<Self, ConnectError> {
        if config.sniff {
            return Err(ConnectError::UnsupportedOption(
                "sniffing is not supported".to_string(),
            ));
        }

        let reachable = engine
            .ping()
            .await
            .map_err(|e| ConnectError::connection(e.to_string()))?;
        if !reachable {
            return Err(ConnectError::connection(format!(
                "no healthy node at {}",
                config.endpoint
            )));
        }

        let exists = engine
            .index_exists(&config.index)
            .await
            .map_err(|e| ConnectError::index_exists(e.to_string()))?;

        if exists {
            // Indexes created elsewhere would map the type field as analysed text
            engine
                .ensure_mapping(&config.index)
                .await
                .map_err(|e| ConnectError::mapping(e.to_string()))?;
            debug!("Index already exists");
        } else {
            let acknowledged = engine
                .create_index(&config.index)
                .await
                .map_err(|e| ConnectError::index_creation(e.to_string()))?;

            if acknowledged {
                info!("Created index");
            } else if config.require_acknowledged_index {
                return Err(ConnectError::NotAcknowledged(config.index.clone()));
            } else {
                warn!("Index creation was not acknowledged");
            }
        }

        Ok(Self { engine, config })
    }

    /// Name of the index every operation targets.
    pub fn index(&self) -> &str {
        &self.config.index
    }

    /// Configuration the client was connected with.
    pub fn config(&self) -> &SearchClientConfig {
        &self.config
    }

    /// Result of the most recent background health check.
    pub fn is_healthy(&self) -> bool {
        self.engine.is_healthy()
    }

    /// Search one page of documents of the given type.
    ///
    /// Pages hold [`PAGE_SIZE`] documents. A missing page or any page number
    /// of 1 or less returns the first page.
    ///
    /// # Returns
    ///
    /// * `Ok(ResultPage)` - Documents in rank order plus the total match count
    /// * `Err(SearchError)` - If the query fails or any hit cannot be decoded
    pub async fn search<Q: Query + ?Sized>(
        &self,
        query: &Q,
        doc_type: &str,
        page: Option<i64>,
    ) -> Result<ResultPage<Document>, SearchError> {
        self.search_as(query, doc_type, page).await
    }

    /// Search one page of documents, decoding each hit into `T`.
    ///
    /// A single hit failing to decode fails the whole call.
    #[instrument(skip(self, query), fields(index = %self.config.index))]
    pub async fn search_as<T, Q>(
        &self,
        query: &Q,
        doc_type: &str,
        page: Option<i64>,
    ) -> Result<ResultPage<T>, SearchError>
    where
        T: DeserializeOwned,
        Q: Query + ?Sized,
    {
        let offset = page_offset(page);

        // Past the paging window the engine rejects the request outright, but
        // any page there is beyond what can be returned; only count matches.
        let (from, size) = if offset.saturating_add(PAGE_SIZE) > self.config.max_result_window {
            debug!(offset = offset, "Page beyond result window, counting only");
            (0, 0)
        } else {
            (offset, PAGE_SIZE)
        };

        let request = SearchRequest {
            index: &self.config.index,
            doc_type,
            query: query.to_query(),
            from,
            size,
        };

        let hits = self
            .engine
            .search(&request)
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        info!(
            took_ms = hits.took_ms,
            total = hits.total,
            "Query took {} milliseconds",
            hits.took_ms
        );

        let documents = hits
            .sources
            .into_iter()
            .enumerate()
            .map(|(position, source)| {
                serde_json::from_value(source).map_err(|e| SearchError::decode(position, e.to_string()))
            })
            .collect::<Result<Vec<T>, _>>()?;

        Ok(ResultPage::new(documents, hits.total))
    }

    /// Index one document and flush so it is visible to the next search.
    ///
    /// The flush is not attempted when indexing fails.
    #[instrument(skip(self, document), fields(index = %self.config.index))]
    pub async fn insert<T: Serialize + ?Sized>(
        &self,
        doc_type: &str,
        document: &T,
    ) -> Result<(), WriteError> {
        let source = to_source(document)?;

        self.engine
            .index_document(&self.config.index, doc_type, source)
            .await
            .map_err(|e| WriteError::index(e.to_string()))?;

        self.flush().await
    }

    /// Delete every document of the given type matching `query`, then flush.
    ///
    /// The flush is not attempted when the deletion fails.
    #[instrument(skip(self, query), fields(index = %self.config.index))]
    pub async fn delete<Q: Query + ?Sized>(&self, doc_type: &str, query: &Q) -> Result<(), WriteError> {
        let deleted = self
            .engine
            .delete_by_query(&self.config.index, doc_type, query.to_query())
            .await
            .map_err(|e| WriteError::delete(e.to_string()))?;

        debug!(deleted = deleted, "Deleted documents by query");

        self.flush().await
    }

    /// Make all writes so far visible to subsequent searches.
    pub async fn flush(&self) -> Result<(), WriteError> {
        self.engine
            .flush(&self.config.index)
            .await
            .map_err(|e| WriteError::flush(e.to_string()))
    }

    /// Remove the whole index.
    ///
    /// Errors are returned to the caller. Deleting an index that is already
    /// gone succeeds.
    #[instrument(skip(self), fields(index = %self.config.index))]
    pub async fn delete_index(&self) -> Result<(), WriteError> {
        self.engine
            .delete_index(&self.config.index)
            .await
            .map_err(|e| WriteError::delete_index(e.to_string()))?;

        info!("Deleted index");
        Ok(())
    }

    /// Start an empty bulk batch bound to this client's index.
    pub fn new_bulk(&self) -> BulkBatch {
        BulkBatch::new(self.config.index.clone())
    }

    /// Queue an index operation for `document` in `batch`. No I/O happens here.
    pub fn add_to_bulk<T: Serialize + ?Sized>(
        &self,
        batch: &mut BulkBatch,
        doc_type: &str,
        document: &T,
    ) -> Result<(), WriteError> {
        batch.add(doc_type, document)
    }

    /// Submit every queued operation as one bulk request.
    ///
    /// Only a failure of the request as a whole is an error; rejected items
    /// are counted in the returned outcome. Documents become searchable after
    /// the engine's next refresh, or immediately after [`SearchClient::flush`].
    /// An empty batch sends nothing.
    #[instrument(skip(self, batch), fields(index = %batch.index(), count = batch.len()))]
    pub async fn send_bulk(&self, batch: BulkBatch) -> Result<BulkOutcome, WriteError> {
        if batch.is_empty() {
            debug!("Bulk batch is empty, nothing to send");
            return Ok(BulkOutcome::default());
        }

        let outcome = self
            .engine
            .bulk(batch.index(), batch.actions())
            .await
            .map_err(|e| WriteError::bulk(e.to_string()))?;

        if outcome.failed > 0 {
            warn!(
                failed = outcome.failed,
                items = outcome.items,
                "Bulk request completed with rejected items"
            );
        } else {
            debug!(items = outcome.items, took_ms = outcome.took_ms, "Bulk request completed");
        }

        Ok(outcome)
    }
}
