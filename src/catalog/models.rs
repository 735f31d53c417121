//! Catalog record types

use serde::{Deserialize, Serialize};

/// A product as returned by either catalog API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// The search API calls this field `thumbnail`
    #[serde(default, alias = "thumbnail")]
    pub image: String,
}

impl Product {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price: 0.0,
            description: String::new(),
            category: String::new(),
            image: String::new(),
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }
}

/// An autocomplete entry; the search API returns full products
pub type Suggestion = Product;

/// Body of the search endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}
