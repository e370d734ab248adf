//! OpenSearch request bodies.
//!
//! Document types are not an engine concept any more, so they are modelled
//! as the `doc_type` keyword field: writes tag documents with it, reads and
//! deletes filter on it, and returned sources have it stripped again.

use serde_json::{json, Value};

use crate::opensearch::index_config::DOC_TYPE_FIELD;
use crate::types::SearchRequest;

/// Restrict the caller's query to one document type.
///
/// The caller's query is placed under `must` untouched so its scoring is
/// preserved; the type restriction is a non-scoring filter.
pub fn scoped_query(doc_type: &str, query: Value) -> Value {
    json!({
        "bool": {
            "must": [query],
            "filter": [
                { "term": { DOC_TYPE_FIELD: doc_type } }
            ]
        }
    })
}

/// Build the body of a search request.
pub fn build_search_body(request: &SearchRequest<'_>) -> Value {
    json!({
        "query": scoped_query(request.doc_type, request.query.clone()),
        "track_total_hits": true
    })
}

/// Build the body of a delete-by-query request.
pub fn build_delete_body(doc_type: &str, query: Value) -> Value {
    json!({ "query": scoped_query(doc_type, query) })
}

/// Add the document type field to a document source.
pub fn tag_document(doc_type: &str, mut document: Value) -> Value {
    if let Value::Object(ref mut fields) = document {
        fields.insert(DOC_TYPE_FIELD.to_string(), json!(doc_type));
    }
    document
}

/// Remove the document type field from a returned source.
pub fn untag_source(mut source: Value) -> Value {
    if let Value::Object(ref mut fields) = source {
        fields.remove(DOC_TYPE_FIELD);
    }
    source
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_query_keeps_caller_query() {
        let query = json!({ "match": { "title": "rust" } });
        let scoped = scoped_query("article", query.clone());

        assert_eq!(scoped["bool"]["must"][0], query);
        assert_eq!(scoped["bool"]["filter"][0]["term"]["doc_type"], "article");
    }

    #[test]
    fn test_search_body_tracks_total_hits() {
        let request = SearchRequest {
            index: "docs",
            doc_type: "article",
            query: json!({ "match_all": {} }),
            from: 20,
            size: 20,
        };

        let body = build_search_body(&request);

        assert_eq!(body["track_total_hits"], true);
        assert_eq!(
            body["query"]["bool"]["must"][0],
            json!({ "match_all": {} })
        );
    }

    #[test]
    fn test_tag_and_untag() {
        let document = json!({ "title": "Hello" });

        let tagged = tag_document("article", document.clone());
        assert_eq!(tagged["doc_type"], "article");
        assert_eq!(tagged["title"], "Hello");

        assert_eq!(untag_source(tagged), document);
    }

    #[test]
    fn test_untag_non_object_is_untouched() {
        assert_eq!(untag_source(json!(42)), json!(42));
    }
}
