//! Integration tests against a running OpenSearch node.
//!
//! Run with `SEARCH_URL` set (or present in `.env`):
//!
//! ```text
//! cargo test -p search-facade-repository --test opensearch_live -- --ignored
//! ```

use std::sync::Once;

use serde_json::json;
use uuid::Uuid;

use search_facade_repository::{MatchAll, SearchClient, SearchClientConfig, PAGE_SIZE};

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        dotenv::dotenv().ok();
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .init();
    });
}

/// Config for a fresh index so tests do not interfere with each other.
fn test_config() -> SearchClientConfig {
    init_tracing();
    let base = SearchClientConfig::from_env();
    SearchClientConfig {
        index: format!("facade-test-{}", Uuid::new_v4()),
        number_of_replicas: 0,
        ..base
    }
}

async fn connect() -> SearchClient {
    test_config().connect().await.expect("connect to OpenSearch")
}

#[tokio::test]
#[ignore = "requires a running OpenSearch node"]
async fn test_connect_creates_index_and_reconnects() {
    let config = test_config();

    let first = config.connect().await.unwrap();
    let second = config.connect().await.unwrap();
    assert_eq!(first.index(), second.index());

    first.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running OpenSearch node"]
async fn test_insert_then_search() {
    let client = connect().await;

    client
        .insert("article", &json!({ "slug": "hello", "title": "Hello" }))
        .await
        .unwrap();

    let page = client
        .search(&json!({ "term": { "slug": "hello" } }), "article", None)
        .await
        .unwrap();
    assert_eq!(page.total_hits, 1);
    assert_eq!(page.documents[0]["title"], "Hello");
    assert!(page.documents[0].get("doc_type").is_none());

    client.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running OpenSearch node"]
async fn test_delete_then_search() {
    let client = connect().await;
    client.insert("article", &json!({ "slug": "gone" })).await.unwrap();

    client
        .delete("article", &json!({ "term": { "slug": "gone" } }))
        .await
        .unwrap();

    let page = client
        .search(&json!({ "term": { "slug": "gone" } }), "article", None)
        .await
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_hits, 0);

    client.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running OpenSearch node"]
async fn test_bulk_and_paging() {
    let client = connect().await;

    let mut batch = client.new_bulk();
    for seq in 0..45 {
        client
            .add_to_bulk(&mut batch, "article", &json!({ "seq": seq }))
            .unwrap();
    }
    let outcome = client.send_bulk(batch).await.unwrap();
    assert_eq!(outcome.items, 45);
    assert_eq!(outcome.failed, 0);
    client.flush().await.unwrap();

    let first = client.search(&MatchAll, "article", None).await.unwrap();
    assert_eq!(first.len() as i64, PAGE_SIZE);
    assert_eq!(first.total_hits, 45);

    let last = client.search(&MatchAll, "article", Some(3)).await.unwrap();
    assert_eq!(last.len(), 5);

    let beyond = client.search(&MatchAll, "article", Some(10)).await.unwrap();
    assert!(beyond.is_empty());
    assert_eq!(beyond.total_hits, 45);

    client.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running OpenSearch node"]
async fn test_search_empty_index() {
    let client = connect().await;

    let page = client.search(&MatchAll, "article", None).await.unwrap();

    assert!(page.is_empty());
    assert_eq!(page.total_hits, 0);

    client.delete_index().await.unwrap();
}
