//! Rate-limited search wrapper.
//!
//! Wraps any `SearchProvider` with a jittered inter-call delay, an
//! exponential backoff retry on throttling, and budget accounting.
//! Search failures degrade to an empty result set: one bad query must
//! never abort a run.

use rand::Rng;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::SearchError;
use crate::search::budget::RunBudget;
use crate::traits::searcher::SearchProvider;
use crate::types::SearchHit;

/// Delay and retry knobs for the rate-limited searcher.
#[derive(Debug, Clone)]
pub struct PacingConfig {
    /// Lower bound of the random inter-call delay.
    pub min_delay: Duration,

    /// Upper bound of the random inter-call delay.
    pub max_delay: Duration,

    /// Base backoff after a throttling response; doubles per attempt.
    pub backoff_base: Duration,

    /// Retry ceiling for throttling responses.
    pub max_retries: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_secs(10),
            max_delay: Duration::from_secs(20),
            backoff_base: Duration::from_secs(30),
            max_retries: 3,
        }
    }
}

impl PacingConfig {
    /// All delays zeroed. For tests.
    pub fn zero() -> Self {
        Self {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_base: Duration::ZERO,
            max_retries: 3,
        }
    }
}

/// A search provider wrapper that paces, retries, and meters calls.
pub struct RateLimitedSearcher<P: SearchProvider> {
    provider: P,
    budget: Arc<RunBudget>,
    pacing: PacingConfig,
    calls_made: AtomicU32,
}

impl<P: SearchProvider> RateLimitedSearcher<P> {
    /// Wrap a provider with the default pacing.
    pub fn new(provider: P, budget: Arc<RunBudget>) -> Self {
        Self {
            provider,
            budget,
            pacing: PacingConfig::default(),
            calls_made: AtomicU32::new(0),
        }
    }

    /// Override the pacing configuration.
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// The shared budget.
    pub fn budget(&self) -> &RunBudget {
        &self.budget
    }

    /// Execute one search within the budget.
    ///
    /// Returns `None` when the budget is exhausted (expected, clean
    /// termination). Otherwise always returns a hit list — empty on
    /// retry exhaustion or non-throttling failures, which are logged
    /// and swallowed. Every `Some` consumed exactly one budget unit.
    pub async fn search(&self, query: &str, max_results: usize) -> Option<Vec<SearchHit>> {
        if !self.budget.try_consume() {
            return None;
        }

        // Inter-call delay applies between calls, not before the first.
        if self.calls_made.fetch_add(1, Ordering::Relaxed) > 0 {
            self.inter_call_delay().await;
        }

        for attempt in 0..=self.pacing.max_retries {
            match self.provider.search(query, max_results).await {
                Ok(hits) => return Some(hits),
                Err(SearchError::RateLimited) if attempt < self.pacing.max_retries => {
                    let backoff = self.pacing.backoff_base * 2u32.pow(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max = self.pacing.max_retries,
                        backoff_secs = backoff.as_secs(),
                        "search throttled, backing off"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(SearchError::RateLimited) => {
                    warn!(query, "search still throttled after retries, skipping query");
                    return Some(Vec::new());
                }
                Err(e) => {
                    warn!(query, error = %e, "search failed, skipping query");
                    return Some(Vec::new());
                }
            }
        }

        Some(Vec::new())
    }

    async fn inter_call_delay(&self) {
        let min = self.pacing.min_delay;
        let max = self.pacing.max_delay;
        if max.is_zero() {
            return;
        }
        let delay = if max > min {
            let span = (max - min).as_millis() as u64;
            min + Duration::from_millis(rand::thread_rng().gen_range(0..=span))
        } else {
            min
        };
        info!(delay_secs = delay.as_secs_f32(), "pacing before next search");
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::searcher::MockSearchProvider;

    fn searcher(provider: MockSearchProvider, limit: u32) -> RateLimitedSearcher<MockSearchProvider> {
        RateLimitedSearcher::new(provider, Arc::new(RunBudget::new(limit)))
            .with_pacing(PacingConfig::zero())
    }

    #[tokio::test]
    async fn consumes_one_unit_per_invocation() {
        let provider = MockSearchProvider::new()
            .with_hits("q", vec![SearchHit::new("https://a.com", "A", "")]);
        let searcher = searcher(provider, 2);

        assert!(searcher.search("q", 10).await.is_some());
        assert!(searcher.search("q", 10).await.is_some());
        assert!(searcher.search("q", 10).await.is_none());
        assert_eq!(searcher.budget().spent(), 2);
    }

    #[tokio::test]
    async fn retries_throttling_then_succeeds() {
        let provider = MockSearchProvider::new()
            .with_rate_limits(2)
            .with_hits("q", vec![SearchHit::new("https://a.com", "A", "")]);
        let searcher = searcher(provider, 5);

        let hits = searcher.search("q", 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        // One budget unit despite three provider calls.
        assert_eq!(searcher.budget().spent(), 1);
    }

    #[tokio::test]
    async fn retry_exhaustion_degrades_to_empty() {
        let provider = MockSearchProvider::new().with_rate_limits(10);
        let searcher = searcher(provider, 5);

        let hits = searcher.search("q", 10).await.unwrap();
        assert!(hits.is_empty());
        assert_eq!(searcher.budget().spent(), 1);
    }

    #[tokio::test]
    async fn non_throttling_error_fails_fast_to_empty() {
        let provider = MockSearchProvider::new()
            .with_error(SearchError::Provider("boom".into()));
        let searcher = searcher(provider, 5);

        let hits = searcher.search("q", 10).await.unwrap();
        assert!(hits.is_empty());
        // No retries for non-throttling errors.
        assert_eq!(searcher.budget().spent(), 1);
    }
}
