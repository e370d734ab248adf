//! Opaque query capability.
//!
//! The facade never builds or inspects queries. Callers hand over anything
//! that can render itself as an engine filter expression, and the backend
//! embeds it into the request body unchanged.

use serde_json::{json, Value};

/// A caller-constructed filter expression.
pub trait Query: Send + Sync {
    /// Render the query as the JSON expression placed under `"query"`.
    fn to_query(&self) -> Value;
}

impl Query for Value {
    fn to_query(&self) -> Value {
        self.clone()
    }
}

impl<Q: Query + ?Sized> Query for &Q {
    fn to_query(&self) -> Value {
        (**self).to_query()
    }
}

impl<Q: Query + ?Sized> Query for Box<Q> {
    fn to_query(&self) -> Value {
        (**self).to_query()
    }
}

/// Matches every document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchAll;

impl Query for MatchAll {
    fn to_query(&self) -> Value {
        json!({ "match_all": {} })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_passes_through() {
        let query = json!({ "term": { "status": "open" } });
        assert_eq!(query.to_query(), query);
    }

    #[test]
    fn test_boxed_query() {
        let query: Box<dyn Query> = Box::new(MatchAll);
        assert_eq!(query.to_query(), json!({ "match_all": {} }));
    }
}
