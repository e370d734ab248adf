//! Result documents and result pages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An untyped document decoded from one hit's source payload.
pub type Document = Map<String, Value>;

/// One page of search results together with the engine-reported match count.
///
/// `documents` holds at most one page of results in rank order, while
/// `total_hits` counts every match and may be larger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage<T = Document> {
    /// Decoded documents in the order the engine ranked them.
    pub documents: Vec<T>,
    /// Total number of matching documents across all pages.
    pub total_hits: u64,
}

impl<T> ResultPage<T> {
    pub fn new(documents: Vec<T>, total_hits: u64) -> Self {
        Self {
            documents,
            total_hits,
        }
    }

    /// A page with no documents and no matches.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    /// Number of documents on this page.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<T> Default for ResultPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> IntoIterator for ResultPage<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_page() {
        let page: ResultPage = ResultPage::empty();
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
        assert_eq!(page.total_hits, 0);
    }

    #[test]
    fn test_total_may_exceed_page() {
        let mut doc = Document::new();
        doc.insert("title".to_string(), json!("first"));

        let page = ResultPage::new(vec![doc.clone()], 42);

        assert_eq!(page.len(), 1);
        assert_eq!(page.total_hits, 42);
        assert_eq!(page.into_iter().next(), Some(doc));
    }
}
