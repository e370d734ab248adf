//! OpenSearch index configuration and mappings.
//!
//! This module defines the settings and mappings sent when the facade creates
//! its index.

use serde_json::{json, Value};

use crate::config::SearchClientConfig;

/// Reserved keyword field holding each document's type.
pub const DOC_TYPE_FIELD: &str = "doc_type";

/// Settings used when creating the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Number of primary shards.
    pub number_of_shards: u32,
    /// Number of replicas per shard.
    pub number_of_replicas: u32,
}

impl IndexConfig {
    pub fn new(number_of_shards: u32, number_of_replicas: u32) -> Self {
        Self {
            number_of_shards,
            number_of_replicas,
        }
    }

    /// Get the index settings and mappings.
    ///
    /// Documents are otherwise schemaless and rely on dynamic mapping. Only
    /// the document type field is mapped up front, as a `keyword`, so that
    /// type filters are exact term matches.
    pub fn index_settings(&self) -> Value {
        json!({
            "settings": {
                "number_of_shards": self.number_of_shards,
                "number_of_replicas": self.number_of_replicas
            },
            "mappings": Self::doc_type_mapping()
        })
    }

    /// Mapping of the document type field, also applied to existing indexes.
    pub fn doc_type_mapping() -> Value {
        json!({
            "properties": {
                DOC_TYPE_FIELD: {
                    "type": "keyword"
                }
            }
        })
    }
}

impl From<&SearchClientConfig> for IndexConfig {
    fn from(config: &SearchClientConfig) -> Self {
        Self::new(config.number_of_shards, config.number_of_replicas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = IndexConfig::new(3, 2).index_settings();

        assert_eq!(settings["settings"]["number_of_shards"], 3);
        assert_eq!(settings["settings"]["number_of_replicas"], 2);
        assert_eq!(
            settings["mappings"]["properties"]["doc_type"]["type"],
            "keyword"
        );
    }

    #[test]
    fn test_doc_type_mapping() {
        let mapping = IndexConfig::doc_type_mapping();
        assert_eq!(mapping["properties"]["doc_type"]["type"], "keyword");
        assert_eq!(
            IndexConfig::new(1, 1).index_settings()["mappings"],
            mapping
        );
    }

    #[test]
    fn test_from_client_config() {
        let config = SearchClientConfig::new("http://localhost:9200", "articles").with_shards(2, 0);
        assert_eq!(IndexConfig::from(&config), IndexConfig::new(2, 0));
    }
}
