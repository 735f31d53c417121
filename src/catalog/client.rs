//! Client for the listing and search catalog endpoints

use super::models::{Product, SearchResponse};
use crate::autocomplete::SuggestionSource;
use crate::config::CatalogSettings;
use crate::error::FetchError;
use crate::network::{HttpClient, HttpRequest, HttpResponse};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Catalog API client
#[derive(Clone)]
pub struct CatalogClient {
    http: HttpClient,
    products_url: String,
    search_url: String,
}

impl CatalogClient {
    pub fn new(http: HttpClient, settings: &CatalogSettings) -> Self {
        Self {
            http,
            products_url: settings.products_url.clone(),
            search_url: settings.search_url.clone(),
        }
    }

    /// Fetch the full product listing
    pub async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        let response = self
            .http
            .get(&self.products_url)
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let response = ensure_success(response, "Failed to fetch products")?;
        let products: Vec<Product> = response.json()?;

        debug!("Listing returned {} products", products.len());
        Ok(products)
    }
}

#[async_trait]
impl SuggestionSource for CatalogClient {
    fn name(&self) -> &str {
        "catalog"
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, FetchError> {
        let request = HttpRequest::get(&self.search_url).param("q", query);
        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let response = ensure_success(response, "Failed to fetch suggestions")?;
        let body: SearchResponse = response.json()?;

        Ok(body.products)
    }
}

fn ensure_success(response: HttpResponse, context: &'static str) -> Result<HttpResponse, FetchError> {
    if response.is_success() {
        return Ok(response);
    }

    warn!("{} returned HTTP {}", response.url, response.status);
    Err(FetchError::Status {
        context,
        status: response.status,
        reason: response.status_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CatalogClient {
        let settings = CatalogSettings {
            products_url: format!("{}/products", server.uri()),
            search_url: format!("{}/products/search", server.uri()),
        };
        CatalogClient::new(HttpClient::new().unwrap(), &settings)
    }

    #[tokio::test]
    async fn test_list_products() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "title": "Test Product", "price": 10.99,
                 "description": "Test description", "category": "test", "image": "test.jpg"}
            ])))
            .mount(&server)
            .await;

        let products = client_for(&server).list_products().await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Test Product");
        assert_eq!(products[0].image, "test.jpg");
    }

    #[tokio::test]
    async fn test_list_products_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).list_products().await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to fetch products: Not Found");
    }

    #[tokio::test]
    async fn test_search_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/search"))
            .and(query_param("q", "product"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [
                    {"id": 1, "title": "Product 1", "price": 10},
                    {"id": 2, "title": "Product 2", "price": 20}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let results = client_for(&server).search("product").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[1].title, "Product 2");
    }

    #[tokio::test]
    async fn test_search_without_products_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0})))
            .mount(&server)
            .await;

        let results = client_for(&server).search("nothing").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).search("test").await.unwrap_err();

        assert_eq!(
            err,
            FetchError::Status {
                context: "Failed to fetch suggestions",
                status: 500,
                reason: "Internal Server Error".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_search_bad_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).search("test").await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
