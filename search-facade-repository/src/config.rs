//! Configuration types for the SearchClient.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::client::SearchClient;
use crate::errors::ConnectError;

/// Default search engine URL.
const DEFAULT_SEARCH_URL: &str = "http://localhost:9200";

/// Default index name.
const DEFAULT_SEARCH_INDEX: &str = "documents";

/// Default interval between background health checks.
pub const DEFAULT_HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(10);

/// Default number of retries for transient request failures.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default fixed wait between retries.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Default engine paging window (`index.max_result_window`).
pub const DEFAULT_MAX_RESULT_WINDOW: i64 = 10_000;

/// Configuration for the SearchClient.
///
/// A config is the unconnected form of the client: building one performs no
/// I/O. Call [`SearchClientConfig::connect`] to open the connection.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchClientConfig {
    /// Server URL (e.g., "http://localhost:9200").
    pub endpoint: String,
    /// Logical index every operation targets.
    pub index: String,
    /// Node discovery. Only single-node pools are supported, so this must stay `false`.
    pub sniff: bool,
    /// Interval between background pings. `None` disables the health monitor.
    pub health_check_interval: Option<Duration>,
    /// Maximum number of automatic retries for transient request failures.
    pub max_retries: u32,
    /// Fixed wait between retries.
    pub retry_interval: Duration,
    /// Fail `connect` when index creation is not acknowledged.
    pub require_acknowledged_index: bool,
    /// Largest `from + size` the engine will page through.
    pub max_result_window: i64,
    /// Primary shards used when `connect` creates the index.
    pub number_of_shards: u32,
    /// Replicas used when `connect` creates the index.
    pub number_of_replicas: u32,
}

impl SearchClientConfig {
    /// Create a config for the given endpoint and index with default settings.
    pub fn new(endpoint: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            index: index.into(),
            sniff: false,
            health_check_interval: Some(DEFAULT_HEALTH_CHECK_INTERVAL),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            require_acknowledged_index: false,
            max_result_window: DEFAULT_MAX_RESULT_WINDOW,
            number_of_shards: 1,
            number_of_replicas: 1,
        }
    }

    /// Build a config from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SEARCH_URL`: server URL (default: http://localhost:9200)
    /// - `SEARCH_INDEX`: index name (default: documents)
    /// - `SEARCH_MAX_RETRIES`: retries for transient failures (default: 5)
    /// - `SEARCH_HEALTHCHECK_INTERVAL_SECS`: health check interval, 0 disables it (default: 10)
    pub fn from_env() -> Self {
        let endpoint = env::var("SEARCH_URL").unwrap_or_else(|_| DEFAULT_SEARCH_URL.to_string());
        let index = env::var("SEARCH_INDEX").unwrap_or_else(|_| DEFAULT_SEARCH_INDEX.to_string());

        let mut config = Self::new(endpoint, index);

        if let Some(max_retries) = parse_env::<u32>("SEARCH_MAX_RETRIES") {
            config.max_retries = max_retries;
        }
        if let Some(secs) = parse_env::<u64>("SEARCH_HEALTHCHECK_INTERVAL_SECS") {
            config.health_check_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }

        config
    }

    /// Enable or disable node discovery.
    pub fn with_sniff(mut self, sniff: bool) -> Self {
        self.sniff = sniff;
        self
    }

    /// Set the health check interval, or `None` to disable it.
    pub fn with_health_check_interval(mut self, interval: Option<Duration>) -> Self {
        self.health_check_interval = interval;
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the wait between retries.
    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    /// Require the engine to acknowledge index creation.
    pub fn with_require_acknowledged_index(mut self, required: bool) -> Self {
        self.require_acknowledged_index = required;
        self
    }

    /// Set the engine paging window.
    pub fn with_max_result_window(mut self, max_result_window: i64) -> Self {
        self.max_result_window = max_result_window;
        self
    }

    /// Set shard and replica counts used for index creation.
    pub fn with_shards(mut self, number_of_shards: u32, number_of_replicas: u32) -> Self {
        self.number_of_shards = number_of_shards;
        self.number_of_replicas = number_of_replicas;
        self
    }

    /// Connect to the OpenSearch backend and make sure the index exists.
    ///
    /// Shorthand for [`SearchClient::connect`].
    pub async fn connect(&self) -> Result<SearchClient, ConnectError> {
        SearchClient::connect(self.clone()).await
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key = key, value = %raw, "Ignoring unparsable environment variable");
            None
        }
    }
}
