//! Remote product catalog
//!
//! Product records, the HTTP client for the listing and search endpoints,
//! and client-side filtering of a fetched listing.

mod client;
mod filter;
mod models;

pub use client::CatalogClient;
pub use filter::filter_products;
pub use models::{Product, SearchResponse, Suggestion};
