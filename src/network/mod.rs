//! HTTP networking module
//!
//! Provides HTTP client functionality for making requests to the catalog APIs.

mod client;
mod request;

pub use client::HttpClient;
pub use request::{HttpRequest, HttpResponse};
