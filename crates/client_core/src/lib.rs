use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::{Category, CategoryId, Product},
    protocol::CatalogRoute,
    FetchError,
};
use tracing::debug;

pub mod view_state;

pub use view_state::{
    format_price, image_source, parse_category_selection, visible_products, CatalogViewState,
    ProductsRequest, SelectionError, SortOrder, PLACEHOLDER_IMAGE_URL,
};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Read side of the catalog API as seen by the desktop worker.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, FetchError>;
    async fn list_products(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Product>, FetchError>;
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    api_base: String,
}

impl CatalogClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self::with_http(Client::new(), api_base)
    }

    pub fn with_http(http: Client, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { http, api_base }
    }

    #[cfg(test)]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|err| FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        })?;
        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, route: CatalogRoute) -> Result<T, FetchError> {
        let url = route.url(&self.api_base);
        debug!(%url, "fetching catalog resource");
        let body = self.get_bytes(&url).await?;
        serde_json::from_slice(&body).map_err(|err| FetchError::Decode {
            url,
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn list_categories(&self) -> Result<Vec<Category>, FetchError> {
        self.get_json(CatalogRoute::Categories).await
    }

    async fn list_products(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Product>, FetchError> {
        self.get_json(CatalogRoute::products_for(category)).await
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.get_bytes(url).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
