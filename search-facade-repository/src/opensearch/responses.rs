//! OpenSearch response parsing.

use serde_json::Value;
use tracing::warn;

use crate::errors::EngineError;
use crate::opensearch::queries::untag_source;
use crate::types::{BulkOutcome, SearchHits};

/// Extract took time, total count and sources from a search response.
///
/// `hits.total` is an object (`{"value": n, "relation": "eq"}`) on current
/// engines and a plain integer on older ones; both are accepted.
pub fn parse_search_response(body: &Value) -> Result<SearchHits, EngineError> {
    let hits = body
        .get("hits")
        .ok_or_else(|| EngineError::parse("Search response has no hits"))?;

    let total = match hits.get("total") {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::Object(total)) => total.get("value").and_then(Value::as_u64),
        _ => None,
    }
    .ok_or_else(|| EngineError::parse("Search response has no total hit count"))?;

    let sources = match hits.get("hits").and_then(Value::as_array) {
        Some(hits) => hits
            .iter()
            .map(|hit| {
                hit.get("_source")
                    .cloned()
                    .map(untag_source)
                    .ok_or_else(|| EngineError::parse("Hit has no _source"))
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(SearchHits {
        took_ms: body.get("took").and_then(Value::as_u64).unwrap_or(0),
        total,
        sources,
    })
}

/// Count processed and rejected items in a bulk response.
pub fn parse_bulk_response(body: &Value) -> Result<BulkOutcome, EngineError> {
    let items = body
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| EngineError::parse("Bulk response has no items"))?;

    let mut failed = 0;
    for item in items {
        // Each item is keyed by its action name, e.g. {"index": {...}}
        let Some(result) = item.as_object().and_then(|item| item.values().next()) else {
            continue;
        };
        if let Some(error) = result.get("error") {
            failed += 1;
            warn!(error = %error, "Bulk item failed");
        }
    }

    Ok(BulkOutcome {
        took_ms: body.get("took").and_then(Value::as_u64).unwrap_or(0),
        items: items.len(),
        failed,
    })
}

/// Read the acknowledged flag of an index creation response.
pub fn parse_acknowledged(body: &Value) -> bool {
    body.get("acknowledged")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Read the deleted count of a delete-by-query response.
pub fn parse_deleted(body: &Value) -> u64 {
    body.get("deleted").and_then(Value::as_u64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_search_response() {
        let body = json!({
            "took": 7,
            "hits": {
                "total": { "value": 45, "relation": "eq" },
                "hits": [
                    { "_id": "a", "_score": 2.0, "_source": { "title": "first", "doc_type": "article" } },
                    { "_id": "b", "_score": 1.0, "_source": { "title": "second", "doc_type": "article" } }
                ]
            }
        });

        let hits = parse_search_response(&body).unwrap();

        assert_eq!(hits.took_ms, 7);
        assert_eq!(hits.total, 45);
        assert_eq!(
            hits.sources,
            vec![json!({ "title": "first" }), json!({ "title": "second" })]
        );
    }

    #[test]
    fn test_parse_legacy_total() {
        let body = json!({
            "took": 1,
            "hits": { "total": 3, "hits": [] }
        });

        let hits = parse_search_response(&body).unwrap();

        assert_eq!(hits.total, 3);
        assert!(hits.sources.is_empty());
    }

    #[test]
    fn test_parse_search_response_missing_hits() {
        let result = parse_search_response(&json!({ "took": 1 }));
        assert!(matches!(result, Err(EngineError::ParseError(_))));
    }

    #[test]
    fn test_parse_bulk_response() {
        let body = json!({
            "took": 12,
            "errors": true,
            "items": [
                { "index": { "_id": "1", "status": 201 } },
                { "index": { "_id": "2", "status": 400, "error": { "type": "mapper_parsing_exception" } } },
                { "index": { "_id": "3", "status": 201 } }
            ]
        });

        let outcome = parse_bulk_response(&body).unwrap();

        assert_eq!(outcome.took_ms, 12);
        assert_eq!(outcome.items, 3);
        assert_eq!(outcome.failed, 1);
    }

    #[test]
    fn test_parse_acknowledged() {
        assert!(parse_acknowledged(&json!({ "acknowledged": true })));
        assert!(!parse_acknowledged(&json!({ "acknowledged": false })));
        assert!(!parse_acknowledged(&json!({})));
    }
}
