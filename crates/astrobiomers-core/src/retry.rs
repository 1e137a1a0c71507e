//! Retry with exponential backoff for network-bound stages (spec §5).

use std::time::Duration;

/// Exponential backoff: 2^attempt seconds (2s, 4s, 8s, ...), capped.
pub fn backoff_duration(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(6); // cap at 64s
    Duration::from_secs(2u64.pow(capped_attempt))
}

/// Retry policy shared by acquisition, resolution, and alignment clients.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Whether an HTTP status code indicates a transient failure worth retrying
/// (429 rate-limited, 5xx server errors).
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Retry an async fallible operation with exponential backoff, honoring
/// cooperative cancellation between attempts (spec §5).
///
/// Returns `Ok(T)` on first success, or the final `Err` on exhaustion.
pub async fn retry_with_backoff<T, E, F, Fut>(
    label: &str,
    policy: RetryPolicy,
    mut attempt_fn: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
{
    let mut attempt = 0u32;
    loop {
        match attempt_fn().await {
            Ok(v) => return Ok(v),
            Err(e) if attempt < policy.max_retries => {
                attempt += 1;
                let wait = backoff_duration(attempt);
                log::debug!("{label}: attempt {attempt}/{} failed, retrying in {wait:?}", policy.max_retries);
                tokio::time::sleep(wait).await;
            }
            Err(e) => {
                log::error!("{label}: failed permanently after {attempt} retries");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn backoff_exponential() {
        assert_eq!(backoff_duration(1), Duration::from_secs(2));
        assert_eq!(backoff_duration(2), Duration::from_secs(4));
        assert_eq!(backoff_duration(3), Duration::from_secs(8));
    }

    #[test]
    fn backoff_caps_growth() {
        assert_eq!(backoff_duration(10), backoff_duration(6));
    }

    #[test]
    fn retryable_statuses() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(503));
        assert!(!is_retryable_status(404));
        assert!(!is_retryable_status(200));
    }

    #[tokio::test]
    async fn retries_until_success() {
        let attempts = AtomicU32::new(0);
        let policy = RetryPolicy {
            max_retries: 3,
            timeout: Duration::from_secs(1),
        };
        let result: Result<u32, &str> = retry_with_backoff("test", policy, || async {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err("transient")
            } else {
                Ok(42)
            }
        })
        .await;
        assert_eq!(result, Ok(42));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausts_after_max_retries() {
        let policy = RetryPolicy {
            max_retries: 2,
            timeout: Duration::from_secs(1),
        };
        let result: Result<u32, &str> =
            retry_with_backoff("test", policy, || async { Err("permanent") }).await;
        assert_eq!(result, Err("permanent"));
    }
}
