//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngine`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    http::{
        request::JsonBody,
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{
        IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesFlushParts,
        IndicesPutMappingParts, IndicesRefreshParts,
    },
    BulkParts, DeleteByQueryParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::SearchClientConfig;
use crate::errors::{ConnectError, EngineError};
use crate::interfaces::SearchEngine;
use crate::opensearch::index_config::IndexConfig;
use crate::opensearch::queries::{build_delete_body, build_search_body, tag_document};
use crate::opensearch::responses::{
    parse_acknowledged, parse_bulk_response, parse_deleted, parse_search_response,
};
use crate::opensearch::transport::{HealthMonitor, RetryPolicy};
use crate::types::{BulkAction, BulkOutcome, SearchHits, SearchRequest};

/// OpenSearch client implementation.
///
/// Talks to a single node (no sniffing), retries transient failures and keeps
/// a background health check running for as long as it lives.
///
/// # Example
///
/// ```ignore
/// let config = SearchClientConfig::new("http://localhost:9200", "articles");
/// let engine = OpenSearchEngine::new(&config).await?;
/// let healthy = engine.ping().await?;
/// ```
pub struct OpenSearchEngine {
    client: OpenSearch,
    index_config: IndexConfig,
    retry: RetryPolicy,
    health: Option<HealthMonitor>,
}

impl OpenSearchEngine {
    /// Create a new OpenSearch engine for the configured endpoint.
    ///
    /// No request is sent here apart from the background health check,
    /// whose first ping happens one interval after creation.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchEngine)` - A new engine instance
    /// * `Err(ConnectError)` - If the endpoint is invalid or transport setup fails
    pub async fn new(config: &SearchClientConfig) -> Result<Self, ConnectError> {
        if config.sniff {
            return Err(ConnectError::UnsupportedOption(
                "sniffing is not supported; only single-node connections are available"
                    .to_string(),
            ));
        }

        let parsed_url = Url::parse(&config.endpoint)
            .map_err(|e| ConnectError::invalid_endpoint(format!("{}: {}", config.endpoint, e)))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| ConnectError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        let health = config
            .health_check_interval
            .map(|interval| HealthMonitor::spawn(client.clone(), interval));

        info!(
            url = %config.endpoint,
            max_retries = config.max_retries,
            health_check_interval = ?config.health_check_interval,
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            index_config: IndexConfig::from(config),
            retry: RetryPolicy::new(config.max_retries, config.retry_interval),
            health,
        })
    }

    /// Turn a non-success response into an `EngineError::StatusError`.
    async fn ensure_success(response: Response, operation: &str) -> Result<Response, EngineError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(operation = operation, status = %status, body = %error_body, "Request failed");
        Err(EngineError::status(status.as_u16(), error_body))
    }

    async fn json_body(response: Response) -> Result<Value, EngineError> {
        response
            .json::<Value>()
            .await
            .map_err(|e| EngineError::parse(e.to_string()))
    }

    /// Build the NDJSON body of a bulk request: one action line per source line.
    fn bulk_body(actions: &[BulkAction]) -> Vec<JsonBody<Value>> {
        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(actions.len() * 2);
        for action in actions {
            body.push(json!({ "index": {} }).into());
            body.push(tag_document(&action.doc_type, action.document.clone()).into());
        }
        body
    }
}

#[async_trait]
impl SearchEngine for OpenSearchEngine {
    async fn ping(&self) -> Result<bool, EngineError> {
        let response = self
            .retry
            .send("ping", || self.client.ping().send())
            .await?;

        Ok(response.status_code().is_success())
    }

    /// Always `true` when the health monitor is disabled.
    fn is_healthy(&self) -> bool {
        self.health
            .as_ref()
            .map(HealthMonitor::is_healthy)
            .unwrap_or(true)
    }

    #[instrument(skip(self))]
    async fn index_exists(&self, index: &str) -> Result<bool, EngineError> {
        let indices = [index];
        let response = self
            .retry
            .send("index_exists", || async {
                self.client
                    .indices()
                    .exists(IndicesExistsParts::Index(&indices))
                    .send()
                    .await
            })
            .await?;

        match response.status_code().as_u16() {
            404 => Ok(false),
            _ => Self::ensure_success(response, "index_exists")
                .await
                .map(|_| true),
        }
    }

    #[instrument(skip(self))]
    async fn create_index(&self, index: &str) -> Result<bool, EngineError> {
        let settings = self.index_config.index_settings();
        let response = self
            .retry
            .send("create_index", || async {
                self.client
                    .indices()
                    .create(IndicesCreateParts::Index(index))
                    .body(settings.clone())
                    .send()
                    .await
            })
            .await?;

        let response = Self::ensure_success(response, "create_index").await?;
        let body = Self::json_body(response).await?;

        Ok(parse_acknowledged(&body))
    }

    #[instrument(skip(self))]
    async fn ensure_mapping(&self, index: &str) -> Result<(), EngineError> {
        let indices = [index];
        let mapping = IndexConfig::doc_type_mapping();
        let response = self
            .retry
            .send("ensure_mapping", || async {
                self.client
                    .indices()
                    .put_mapping(IndicesPutMappingParts::Index(&indices))
                    .body(mapping.clone())
                    .send()
                    .await
            })
            .await?;

        // A conflicting existing mapping comes back as 400
        Self::ensure_success(response, "ensure_mapping").await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_index(&self, index: &str) -> Result<(), EngineError> {
        let indices = [index];
        let response = self
            .retry
            .send("delete_index", || async {
                self.client
                    .indices()
                    .delete(IndicesDeleteParts::Index(&indices))
                    .send()
                    .await
            })
            .await?;

        // 404 is acceptable - the index may not exist
        if response.status_code().as_u16() == 404 {
            debug!(index = index, "Index already absent");
            return Ok(());
        }

        Self::ensure_success(response, "delete_index").await?;
        Ok(())
    }

    #[instrument(skip(self, request), fields(index = request.index, doc_type = request.doc_type))]
    async fn search(&self, request: &SearchRequest<'_>) -> Result<SearchHits, EngineError> {
        let indices = [request.index];
        let body = build_search_body(request);

        let response = self
            .retry
            .send("search", || {
                self.client
                    .search(SearchParts::Index(&indices))
                    .from(request.from)
                    .size(request.size)
                    .body(body.clone())
                    .send()
            })
            .await?;

        let response = Self::ensure_success(response, "search").await?;
        let body = Self::json_body(response).await?;

        parse_search_response(&body)
    }

    #[instrument(skip(self, document))]
    async fn index_document(
        &self,
        index: &str,
        doc_type: &str,
        document: Value,
    ) -> Result<(), EngineError> {
        let document = tag_document(doc_type, document);

        let response = self
            .retry
            .send("index_document", || {
                self.client
                    .index(IndexParts::Index(index))
                    .body(document.clone())
                    .send()
            })
            .await?;

        Self::ensure_success(response, "index_document").await?;
        debug!("Document indexed");
        Ok(())
    }

    #[instrument(skip(self, query))]
    async fn delete_by_query(
        &self,
        index: &str,
        doc_type: &str,
        query: Value,
    ) -> Result<u64, EngineError> {
        let indices = [index];
        let body = build_delete_body(doc_type, query);

        let response = self
            .retry
            .send("delete_by_query", || {
                self.client
                    .delete_by_query(DeleteByQueryParts::Index(&indices))
                    .body(body.clone())
                    .send()
            })
            .await?;

        let response = Self::ensure_success(response, "delete_by_query").await?;
        let body = Self::json_body(response).await?;

        Ok(parse_deleted(&body))
    }

    #[instrument(skip(self))]
    async fn flush(&self, index: &str) -> Result<(), EngineError> {
        let indices = [index];

        let response = self
            .retry
            .send("flush", || async {
                self.client
                    .indices()
                    .flush(IndicesFlushParts::Index(&indices))
                    .send()
                    .await
            })
            .await?;
        Self::ensure_success(response, "flush").await?;

        // Flush persists segments; refresh opens them to searches.
        let response = self
            .retry
            .send("refresh", || async {
                self.client
                    .indices()
                    .refresh(IndicesRefreshParts::Index(&indices))
                    .send()
                    .await
            })
            .await?;
        Self::ensure_success(response, "refresh").await?;

        Ok(())
    }

    #[instrument(skip(self, actions), fields(count = actions.len()))]
    async fn bulk(&self, index: &str, actions: &[BulkAction]) -> Result<BulkOutcome, EngineError> {
        let response = self
            .retry
            .send("bulk", || {
                self.client
                    .bulk(BulkParts::Index(index))
                    .body(Self::bulk_body(actions))
                    .send()
            })
            .await?;

        let response = Self::ensure_success(response, "bulk").await?;
        let body = Self::json_body(response).await?;

        parse_bulk_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_body_pairs_actions_with_sources() {
        let actions = vec![
            BulkAction::index("article", json!({ "title": "one" })),
            BulkAction::index("note", json!({ "title": "two" })),
        ];

        let body = OpenSearchEngine::bulk_body(&actions);

        assert_eq!(body.len(), 4);
    }

    #[tokio::test]
    async fn test_new_rejects_sniffing() {
        let config = SearchClientConfig::new("http://localhost:9200", "articles").with_sniff(true);

        let result = OpenSearchEngine::new(&config).await;

        assert!(matches!(result, Err(ConnectError::UnsupportedOption(_))));
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_endpoint() {
        let config = SearchClientConfig::new("not a url", "articles");

        let result = OpenSearchEngine::new(&config).await;

        assert!(matches!(result, Err(ConnectError::InvalidEndpoint(_))));
    }

    #[tokio::test]
    async fn test_new_without_health_monitor_is_healthy() {
        let config = SearchClientConfig::new("http://localhost:9200", "articles")
            .with_health_check_interval(None);

        let engine = OpenSearchEngine::new(&config).await.unwrap();

        assert!(engine.is_healthy());
    }
}
