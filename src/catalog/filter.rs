//! Client-side filtering of an already fetched product listing

use super::models::Product;

/// Keep products whose title contains `query`, ignoring case and
/// surrounding whitespace. A blank query keeps everything.
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.iter().collect();
    }

    products
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect()
}
