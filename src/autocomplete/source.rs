//! Remote suggestion sources

use crate::catalog::Suggestion;
use crate::error::FetchError;
use async_trait::async_trait;

/// Anything that can answer a product search for the autocomplete
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Source name, used in logs
    fn name(&self) -> &str;

    /// Look up products matching `query`, in the remote's relevance order
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, FetchError>;
}
