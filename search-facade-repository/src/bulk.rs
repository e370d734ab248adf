//! Client-side accumulation of bulk index operations.

use serde::Serialize;

use crate::client::to_source;
use crate::errors::WriteError;
use crate::types::BulkAction;

/// Pending index operations submitted together by `SearchClient::send_bulk`.
///
/// Adding operations is pure in-memory work. A batch is not synchronised;
/// share it between tasks only behind your own lock.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkBatch {
    index: String,
    actions: Vec<BulkAction>,
}

impl BulkBatch {
    pub(crate) fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            actions: Vec::new(),
        }
    }

    /// Append an index operation for `document` under `doc_type`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was serialized and queued
    /// * `Err(WriteError)` - If the document cannot be serialized to a JSON object
    pub fn add<T: Serialize + ?Sized>(
        &mut self,
        doc_type: &str,
        document: &T,
    ) -> Result<(), WriteError> {
        let source = to_source(document)?;
        self.actions.push(BulkAction::index(doc_type, source));
        Ok(())
    }

    /// Index the batch is bound to.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Queued operations in insertion order.
    pub fn actions(&self) -> &[BulkAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_queues_in_order() {
        let mut batch = BulkBatch::new("articles");

        batch.add("article", &json!({ "title": "one" })).unwrap();
        batch.add("note", &json!({ "title": "two" })).unwrap();

        assert_eq!(batch.index(), "articles");
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.actions()[0].doc_type, "article");
        assert_eq!(batch.actions()[1].document, json!({ "title": "two" }));
    }

    #[test]
    fn test_add_rejects_non_object() {
        let mut batch = BulkBatch::new("articles");

        let result = batch.add("article", &vec![1, 2, 3]);

        assert!(matches!(result, Err(WriteError::InvalidDocument(_))));
        assert!(batch.is_empty());
    }
}
