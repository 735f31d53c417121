//! product-search: product autocomplete over remote catalog APIs
//!
//! Typed queries are debounced, answered from a session cache when possible,
//! and otherwise looked up through cancellable requests against the catalog
//! search endpoint. The resulting suggestion list is keyboard navigable.

pub mod autocomplete;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod network;

pub use autocomplete::{AutocompleteConfig, AutocompleteController, AutocompleteState, Key};
pub use cache::ResultCache;
pub use catalog::{CatalogClient, Product, Suggestion};
pub use config::Settings;
pub use error::FetchError;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
