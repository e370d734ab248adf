//! Request and response types exchanged with the search engine backend.

use serde_json::Value;

/// A search request scoped to one index and document type.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest<'a> {
    /// Target index.
    pub index: &'a str,
    /// Document type the results are restricted to.
    pub doc_type: &'a str,
    /// The caller's query expression, passed through unmodified.
    pub query: Value,
    /// Offset of the first result.
    pub from: i64,
    /// Maximum number of results to return.
    pub size: i64,
}

/// Raw hits returned by the backend for one search request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    /// Server-side execution time in milliseconds.
    pub took_ms: u64,
    /// Total number of matching documents, which may exceed `sources.len()`.
    pub total: u64,
    /// Source payloads in rank order.
    pub sources: Vec<Value>,
}

/// A pending index operation in a bulk batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkAction {
    /// Document type the document is indexed under.
    pub doc_type: String,
    /// The document source.
    pub document: Value,
}

impl BulkAction {
    pub fn index(doc_type: impl Into<String>, document: Value) -> Self {
        Self {
            doc_type: doc_type.into(),
            document,
        }
    }
}

/// Result of submitting a bulk batch.
///
/// The request either fails as a whole or produces an outcome; individual
/// item failures are only counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Server-side execution time in milliseconds.
    pub took_ms: u64,
    /// Number of operations the engine processed.
    pub items: usize,
    /// Number of operations the engine rejected.
    pub failed: usize,
}

impl BulkOutcome {
    /// Number of operations that succeeded.
    pub fn succeeded(&self) -> usize {
        self.items.saturating_sub(self.failed)
    }
}
