//! Transport behaviour layered over the OpenSearch client: automatic retries
//! for transient failures and a periodic background health check.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use opensearch::http::response::Response;
use opensearch::OpenSearch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// HTTP statuses worth retrying: throttling and gateway failures.
const RETRYABLE_STATUSES: [u16; 4] = [429, 502, 503, 504];

/// Retry policy with a fixed wait between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_retries: u32,
    interval: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, interval: Duration) -> Self {
        Self {
            max_retries,
            interval,
        }
    }

    /// Whether a response status is transient.
    pub fn is_retryable_status(status: u16) -> bool {
        RETRYABLE_STATUSES.contains(&status)
    }

    /// Send a request, retrying transport errors and transient statuses.
    ///
    /// `request` builds and sends a fresh request on every call. Once the
    /// retries are spent the last response or error is returned as is.
    pub async fn send<F, Fut>(
        &self,
        operation: &'static str,
        mut request: F,
    ) -> Result<Response, opensearch::Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Response, opensearch::Error>>,
    {
        let mut attempt = 0;
        loop {
            match request().await {
                Ok(response) => {
                    let status = response.status_code().as_u16();
                    if attempt >= self.max_retries || !Self::is_retryable_status(status) {
                        return Ok(response);
                    }
                    warn!(
                        operation = operation,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        status = status,
                        "Transient response status, retrying"
                    );
                }
                Err(e) => {
                    if attempt >= self.max_retries {
                        return Err(e);
                    }
                    warn!(
                        operation = operation,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        error = %e,
                        "Request failed, retrying"
                    );
                }
            }

            attempt += 1;
            tokio::time::sleep(self.interval).await;
        }
    }
}

/// Background task pinging the cluster at a fixed interval.
///
/// The task is aborted when the monitor is dropped.
pub struct HealthMonitor {
    healthy: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl HealthMonitor {
    /// Spawn the health check loop on the current tokio runtime.
    pub fn spawn(client: OpenSearch, interval: Duration) -> Self {
        let healthy = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&healthy);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; connect already pinged.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let ok = match client.ping().send().await {
                    Ok(response) => response.status_code().is_success(),
                    Err(e) => {
                        debug!(error = %e, "Health check ping failed");
                        false
                    }
                };

                let was_healthy = flag.swap(ok, Ordering::SeqCst);
                match (was_healthy, ok) {
                    (true, false) => warn!("Search engine became unhealthy"),
                    (false, true) => info!("Search engine is healthy again"),
                    _ => {}
                }
            }
        });

        Self { healthy, handle }
    }

    /// Result of the most recent health check.
    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
    use std::sync::atomic::AtomicUsize;
    use url::Url;

    /// Client pointed at a port nothing listens on.
    fn unreachable_client() -> OpenSearch {
        let url = Url::parse("http://127.0.0.1:1").unwrap();
        let transport = TransportBuilder::new(SingleNodeConnectionPool::new(url))
            .disable_proxy()
            .build()
            .unwrap();
        OpenSearch::new(transport)
    }

    async fn count_attempts(max_retries: u32) -> (usize, bool) {
        let client = unreachable_client();
        let policy = RetryPolicy::new(max_retries, Duration::from_millis(1));
        let attempts = AtomicUsize::new(0);

        let result = policy
            .send("ping", || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { client.ping().send().await }
            })
            .await;

        (attempts.load(Ordering::SeqCst), result.is_err())
    }

    #[tokio::test]
    async fn test_transport_errors_retried_until_exhausted() {
        let (attempts, failed) = count_attempts(5).await;

        assert_eq!(attempts, 6);
        assert!(failed);
    }

    #[tokio::test]
    async fn test_zero_retries_makes_single_attempt() {
        let (attempts, failed) = count_attempts(0).await;

        assert_eq!(attempts, 1);
        assert!(failed);
    }

    #[tokio::test]
    async fn test_health_monitor_detects_unreachable_node() {
        let monitor = HealthMonitor::spawn(unreachable_client(), Duration::from_millis(10));
        assert!(monitor.is_healthy());

        let flipped = tokio::time::timeout(Duration::from_secs(5), async {
            while monitor.is_healthy() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;

        assert!(flipped.is_ok());
        assert!(!monitor.is_healthy());
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(RetryPolicy::is_retryable_status(503));
        assert!(RetryPolicy::is_retryable_status(429));
        assert!(!RetryPolicy::is_retryable_status(200));
        assert!(!RetryPolicy::is_retryable_status(400));
        assert!(!RetryPolicy::is_retryable_status(404));
    }
}
