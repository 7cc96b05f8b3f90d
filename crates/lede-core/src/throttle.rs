//! Per-domain request throttling.
//!
//! News sites are quick to block callers that hammer them. This wraps any
//! [`Fetcher`] with a minimum delay between consecutive requests to the
//! same domain, plus optional random jitter so request timing doesn't look
//! mechanical. The server wraps its fetcher with this by default; the CLI
//! uses a bare fetcher since it issues one request per invocation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use url::Url;

use crate::error::AppError;
use crate::traits::Fetcher;

/// Configuration for [`ThrottledFetcher`].
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    /// Minimum delay between consecutive requests to the same domain.
    pub delay: Duration,
    /// Maximum random jitter added on top of `delay` (uniform [0, jitter]).
    pub jitter: Duration,
}

impl ThrottleConfig {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            jitter: Duration::ZERO,
        }
    }

    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    fn effective_delay(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.delay;
        }
        self.delay + Duration::from_millis(jitter_ms(self.jitter.as_millis() as u64))
    }
}

impl Default for ThrottleConfig {
    /// 1 second delay, 500ms jitter.
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(1),
            jitter: Duration::from_millis(500),
        }
    }
}

/// A [`Fetcher`] wrapper that enforces per-domain delays.
///
/// Tracks the last request instant for each domain key (scheme + host +
/// port) and sleeps before forwarding when the minimum delay has not yet
/// elapsed. Requests to different domains never wait on each other.
#[derive(Clone)]
pub struct ThrottledFetcher<F> {
    inner: F,
    config: ThrottleConfig,
    last_request: Arc<Mutex<HashMap<String, Instant>>>,
}

impl<F: Fetcher> ThrottledFetcher<F> {
    pub fn new(inner: F, config: ThrottleConfig) -> Self {
        Self {
            inner,
            config,
            last_request: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Domain key for a URL: scheme://host:port.
    fn domain_key(url_str: &str) -> Option<String> {
        let url = Url::parse(url_str).ok()?;
        let host = url.host_str()?;
        let port = url
            .port_or_known_default()
            .map(|p| format!(":{p}"))
            .unwrap_or_default();
        Some(format!("{}://{}{}", url.scheme(), host, port))
    }

    async fn wait_for_domain(&self, domain: &str) {
        loop {
            let pending = {
                let mut map = self.last_request.lock().await;
                let wait = map.get(domain).and_then(|&last| {
                    self.config.effective_delay().checked_sub(last.elapsed())
                });
                if wait.is_none() {
                    map.insert(domain.to_string(), Instant::now());
                }
                wait
            };

            // Sleep outside the lock so other domains aren't blocked.
            let Some(sleep_for) = pending else {
                return;
            };
            tracing::debug!(
                domain = %domain,
                sleep_ms = %sleep_for.as_millis(),
                "Throttling request"
            );
            tokio::time::sleep(sleep_for).await;
            // Re-check: a concurrent waiter may have claimed the slot
            // while we slept, pushing the next permitted instant out.
        }
    }
}

impl<F: Fetcher> Fetcher for ThrottledFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        if let Some(domain) = Self::domain_key(url) {
            self.wait_for_domain(&domain).await;
        }
        self.inner.fetch(url).await
    }
}

// Jitter without the `rand` crate: xorshift64 seeded from the clock.
// Good enough for request pacing, not for anything cryptographic.
pub(crate) fn jitter_ms(max_ms: u64) -> u64 {
    if max_ms == 0 {
        return 0;
    }
    let mut x = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x % max_ms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockFetcher;

    #[test]
    fn domain_key_includes_scheme_host_port() {
        assert_eq!(
            ThrottledFetcher::<MockFetcher>::domain_key("https://example.com/path?q=1"),
            Some("https://example.com:443".to_string())
        );
        assert_eq!(
            ThrottledFetcher::<MockFetcher>::domain_key("http://example.com:8080/page"),
            Some("http://example.com:8080".to_string())
        );
        assert_eq!(ThrottledFetcher::<MockFetcher>::domain_key("not a url"), None);
    }

    #[test]
    fn jitter_stays_in_range() {
        for _ in 0..100 {
            assert!(jitter_ms(50) < 50);
        }
        assert_eq!(jitter_ms(0), 0);
    }

    #[tokio::test]
    async fn same_domain_requests_are_delayed() {
        let fetcher = MockFetcher::with_responses(vec![
            Ok("one".to_string()),
            Ok("two".to_string()),
        ]);
        let throttled = ThrottledFetcher::new(
            fetcher,
            ThrottleConfig::new(Duration::from_millis(80)),
        );

        let start = Instant::now();
        throttled.fetch("https://example.com/a").await.unwrap();
        throttled.fetch("https://example.com/b").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn concurrent_same_domain_requests_are_serialized() {
        let fetcher = MockFetcher::with_responses(vec![
            Ok("one".to_string()),
            Ok("two".to_string()),
            Ok("three".to_string()),
        ]);
        let throttled = ThrottledFetcher::new(
            fetcher,
            ThrottleConfig::new(Duration::from_millis(80)),
        );

        // Simultaneous waiters must not all wake at once and proceed
        // together; each claims its own slot one delay apart.
        let start = Instant::now();
        let (a, b, c) = tokio::join!(
            throttled.fetch("https://example.com/a"),
            throttled.fetch("https://example.com/b"),
            throttled.fetch("https://example.com/c"),
        );
        a.unwrap();
        b.unwrap();
        c.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(160));
    }

    #[tokio::test]
    async fn different_domains_do_not_wait() {
        let fetcher = MockFetcher::with_responses(vec![
            Ok("one".to_string()),
            Ok("two".to_string()),
        ]);
        let throttled = ThrottledFetcher::new(
            fetcher,
            ThrottleConfig::new(Duration::from_secs(5)),
        );

        let start = Instant::now();
        throttled.fetch("https://example.com/a").await.unwrap();
        throttled.fetch("https://other.org/b").await.unwrap();
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
