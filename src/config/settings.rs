//! Settings structures for product-search configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::autocomplete::AutocompleteConfig;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub autocomplete: AutocompleteSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (PRODUCT_SEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("PRODUCT_SEARCH_PRODUCTS_URL") {
            self.catalog.products_url = val;
        }
        if let Ok(val) = std::env::var("PRODUCT_SEARCH_SEARCH_URL") {
            self.catalog.search_url = val;
        }
        if let Ok(val) = std::env::var("PRODUCT_SEARCH_MIN_QUERY_LENGTH") {
            if let Ok(len) = val.parse() {
                self.autocomplete.min_query_length = len;
            }
        }
        if let Ok(val) = std::env::var("PRODUCT_SEARCH_DEBOUNCE_MS") {
            if let Ok(ms) = val.parse() {
                self.autocomplete.debounce_delay_ms = ms;
            }
        }
    }
}

/// Remote catalog endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Full product listing (JSON array)
    pub products_url: String,
    /// Product search, called with `?q=<query>`
    pub search_url: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            products_url: "https://fakestoreapi.com/products".to_string(),
            search_url: "https://dummyjson.com/products/search".to_string(),
        }
    }
}

/// Autocomplete behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteSettings {
    /// Queries shorter than this (after trimming) never hit the network
    pub min_query_length: usize,
    /// Quiet period before a typed query is acted on
    pub debounce_delay_ms: u64,
    /// Upper bound on suggestions kept from one response
    pub max_suggestions: usize,
}

impl Default for AutocompleteSettings {
    fn default() -> Self {
        Self {
            min_query_length: 2,
            debounce_delay_ms: 300,
            max_suggestions: 10,
        }
    }
}

impl AutocompleteSettings {
    /// Build the controller configuration from these settings
    pub fn to_config(&self) -> AutocompleteConfig {
        AutocompleteConfig {
            min_query_length: self.min_query_length,
            debounce_delay: Duration::from_millis(self.debounce_delay_ms),
            max_suggestions: self.max_suggestions,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds (none = wait until cancelled)
    pub request_timeout: Option<f64>,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}
