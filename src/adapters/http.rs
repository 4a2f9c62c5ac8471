//! Catalog store backed by a remote JSON endpoint.
//!
//! Endpoint: GET <url> returning the catalog document

use std::time::Duration;

use async_trait::async_trait;

use super::CatalogStore;
use crate::domain::{Category, ContentItem};
use crate::library::{Catalog, CatalogError};

/// Remote catalog client
pub struct HttpCatalogStore {
    url: String,
    client: reqwest::Client,
}

impl HttpCatalogStore {
    /// Create a new client with a per-request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            url: url.into(),
            client,
        }
    }

    /// Fetch the whole catalog document
    async fn fetch(&self) -> Result<Catalog, CatalogError> {
        tracing::debug!("Fetching catalog from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Catalog>().await?)
    }
}

#[async_trait]
impl CatalogStore for HttpCatalogStore {
    fn name(&self) -> &str {
        &self.url
    }

    async fn list_items(&self) -> Result<Vec<ContentItem>, CatalogError> {
        Ok(self.fetch().await?.items)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.fetch().await?.categories_for_display())
    }

    async fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        Ok(self.fetch().await?.into_display_order())
    }
}
