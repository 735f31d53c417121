//! Caching module for product-search
//!
//! Session-lifetime cache of suggestion lists, keyed by normalized query.

use crate::catalog::Suggestion;
use moka::sync::Cache;

/// Cache for autocomplete results
///
/// Entries never expire and are never evicted; only [`ResultCache::clear`]
/// removes them. The backing map is internally synchronized, so one cache
/// can be shared between controllers.
pub struct ResultCache {
    cache: Cache<String, Vec<Suggestion>>,
}

impl ResultCache {
    /// Create an empty, unbounded cache
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
        }
    }

    /// Get the cached suggestions for a query
    pub fn get(&self, query: &str) -> Option<Vec<Suggestion>> {
        self.cache.get(&normalize_query(query))
    }

    /// Store suggestions for a query
    pub fn set(&self, query: &str, suggestions: Vec<Suggestion>) {
        self.cache.insert(normalize_query(query), suggestions);
    }

    /// Check for an entry without cloning it
    pub fn contains(&self, query: &str) -> bool {
        self.cache.contains_key(&normalize_query(query))
    }

    /// Clear the entire cache
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Get cache size
    pub fn size(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache key for a query: lower-cased, then trimmed
pub fn normalize_query(query: &str) -> String {
    query.to_lowercase().trim().to_string()
}
