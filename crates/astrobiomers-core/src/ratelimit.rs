//! Minimum-inter-request-interval rate limiter for external service clients
//! (§4.2, §4.7, §4.8, §5).
//!
//! Each service (PubMed search, gene/protein/taxonomy/compound lookups,
//! ontology lookups) enforces its own minimum spacing between requests.
//! The resource being rationed is time rather than concurrency slots, so
//! this wraps a `tokio::sync::Mutex` holding the last-request timestamp
//! rather than a counting semaphore.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum interval between successive calls to `wait()`.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Construct a limiter with the standard NCBI E-utilities spacing:
    /// 3 requests/sec without an API key, 10 requests/sec with one.
    pub fn for_pubmed(api_key_configured: bool) -> Self {
        let interval = if api_key_configured {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(334)
        };
        Self::new(interval)
    }

    /// Block until at least `min_interval` has elapsed since the previous
    /// call returned, then record the new timestamp.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_call_does_not_wait() {
        let limiter = RateLimiter::new(Duration::from_millis(200));
        let start = Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn second_call_waits_remaining_interval() {
        let limiter = RateLimiter::new(Duration::from_millis(80));
        limiter.wait().await;
        let start = Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn pubmed_limiter_uses_faster_interval_with_key() {
        let with_key = RateLimiter::for_pubmed(true);
        let without_key = RateLimiter::for_pubmed(false);
        assert!(with_key.min_interval < without_key.min_interval);
    }
}
