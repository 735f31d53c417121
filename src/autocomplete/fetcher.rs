//! Cancellable, length-gated suggestion lookups

use super::source::SuggestionSource;
use crate::catalog::Suggestion;
use crate::error::FetchError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Default minimum trimmed query length before a lookup is made
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 2;

/// Default cap on suggestions kept from one response
pub const DEFAULT_MAX_SUGGESTIONS: usize = 10;

/// Wraps a [`SuggestionSource`] with the autocomplete's lookup rules
pub struct SuggestionFetcher {
    source: Arc<dyn SuggestionSource>,
    min_query_length: usize,
    max_results: usize,
}

impl SuggestionFetcher {
    pub fn new(source: Arc<dyn SuggestionSource>) -> Self {
        Self {
            source,
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
            max_results: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    /// Set the minimum trimmed query length
    pub fn with_min_query_length(mut self, len: usize) -> Self {
        self.min_query_length = len;
        self
    }

    /// Set the maximum number of suggestions returned
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Look up suggestions for `query`.
    ///
    /// Too-short queries resolve to an empty list without touching the
    /// source. Triggering `token` makes the call return
    /// [`FetchError::Cancelled`] as soon as it is observed.
    pub async fn fetch(
        &self,
        query: &str,
        token: &CancellationToken,
    ) -> Result<Vec<Suggestion>, FetchError> {
        if token.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        if query.trim().chars().count() < self.min_query_length {
            return Ok(Vec::new());
        }

        debug!("Fetching suggestions for '{}' from {}", query, self.source.name());

        let mut suggestions = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(FetchError::Cancelled),
            result = self.source.search(query) => result?,
        };

        suggestions.truncate(self.max_results);
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FixedSource {
        count: usize,
        calls: AtomicUsize,
        latency: Duration,
    }

    impl FixedSource {
        fn new(count: usize) -> Arc<Self> {
            Arc::new(Self {
                count,
                calls: AtomicUsize::new(0),
                latency: Duration::ZERO,
            })
        }

        fn slow(count: usize, latency: Duration) -> Arc<Self> {
            Arc::new(Self {
                count,
                calls: AtomicUsize::new(0),
                latency,
            })
        }
    }

    #[async_trait]
    impl SuggestionSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn search(&self, _query: &str) -> Result<Vec<Suggestion>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.latency).await;
            Ok((1..=self.count as u64)
                .map(|id| Suggestion::new(id, format!("Product {}", id)))
                .collect())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl SuggestionSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn search(&self, _query: &str) -> Result<Vec<Suggestion>, FetchError> {
            Err(FetchError::Status {
                context: "Failed to fetch suggestions",
                status: 503,
                reason: "Service Unavailable".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_short_query_skips_source() {
        let source = FixedSource::new(3);
        let fetcher = SuggestionFetcher::new(source.clone());

        let result = fetcher.fetch(" a ", &CancellationToken::new()).await.unwrap();

        assert!(result.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_truncates_to_max_results() {
        let fetcher = SuggestionFetcher::new(FixedSource::new(15));

        let result = fetcher.fetch("product", &CancellationToken::new()).await.unwrap();

        assert_eq!(result.len(), 10);
        assert_eq!(result[0].id, 1);
        assert_eq!(result[9].id, 10);
    }

    #[tokio::test]
    async fn test_custom_limits() {
        let source = FixedSource::new(8);
        let fetcher = SuggestionFetcher::new(source.clone())
            .with_min_query_length(4)
            .with_max_results(3);

        assert!(fetcher.fetch("abc", &CancellationToken::new()).await.unwrap().is_empty());
        assert_eq!(fetcher.fetch("abcd", &CancellationToken::new()).await.unwrap().len(), 3);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_propagated() {
        let fetcher = SuggestionFetcher::new(Arc::new(FailingSource));

        let err = fetcher.fetch("test", &CancellationToken::new()).await.unwrap_err();

        assert!(!err.is_cancelled());
        assert_eq!(err.to_string(), "Failed to fetch suggestions: Service Unavailable");
    }

    #[tokio::test]
    async fn test_already_cancelled_token() {
        let source = FixedSource::new(3);
        let fetcher = SuggestionFetcher::new(source.clone());
        let token = CancellationToken::new();
        token.cancel();

        let err = fetcher.fetch("test", &token).await.unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_flight() {
        let fetcher = SuggestionFetcher::new(FixedSource::slow(3, Duration::from_secs(10)));
        let token = CancellationToken::new();

        let canceller = {
            let token = token.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                token.cancel();
            }
        };

        let (result, ()) = tokio::join!(fetcher.fetch("test", &token), canceller);

        assert_eq!(result, Err(FetchError::Cancelled));
    }
}
