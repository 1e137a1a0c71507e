//! Shared external-service-client contract (§4.7, §4.8 "Policy").
//!
//! Every concrete resolver/aligner is rate-limited, retried, and never
//! fatal on failure — a miss just means the mention proceeds with no id.

use astrobiomers_core::{retry_with_backoff, RateLimiter, RetryPolicy};

/// One external lookup service: a gene annotation service, a protein
/// database, an ontology endpoint, etc. `namespace` doubles as the disk
/// cache key prefix and the key under which a hit is recorded on the
/// mention (`external_ids[namespace]` or `ontology_terms[namespace]`).
#[async_trait::async_trait]
pub trait LookupService: Send + Sync {
    fn namespace(&self) -> &'static str;

    /// Resolve `canonical_name` to an external identifier. `Ok(None)` means
    /// the service was reached but had no match; `Err` means the service
    /// itself failed (network, non-2xx, malformed body) after retries.
    async fn lookup(&self, canonical_name: &str) -> Result<Option<String>, String>;
}

/// Runs `lookup_fn` through the shared rate limiter and retry policy. Every
/// concrete service built on [`reqwest`] funnels its HTTP call through this
/// so the retry/backoff/rate-limit behavior is identical across services.
pub async fn rate_limited_lookup<F, Fut>(
    label: &str,
    limiter: &RateLimiter,
    policy: RetryPolicy,
    lookup_fn: F,
) -> Result<Option<String>, String>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<Option<String>, String>>,
{
    limiter.wait().await;
    retry_with_backoff(label, policy, lookup_fn).await
}

/// A service that never resolves anything — backs "demo mode" (§4.7
/// "disables network calls and returns unresolved").
pub struct DemoModeService {
    pub namespace: &'static str,
}

#[async_trait::async_trait]
impl LookupService for DemoModeService {
    fn namespace(&self) -> &'static str {
        self.namespace
    }

    async fn lookup(&self, _canonical_name: &str) -> Result<Option<String>, String> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_mode_never_resolves() {
        let service = DemoModeService { namespace: "entrez" };
        assert_eq!(service.lookup("tp53").await, Ok(None));
    }
}
