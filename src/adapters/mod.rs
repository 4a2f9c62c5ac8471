//! Catalog store interfaces for external systems.
//!
//! Stores provide a unified read contract over wherever the catalog lives
//! (a JSON file on disk, or a remote endpoint serving the same document).

pub mod file;
pub mod http;

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Category, ContentItem};
use crate::library::{Catalog, CatalogError};

pub use file::FileCatalogStore;
pub use http::HttpCatalogStore;

/// Read contract of the catalog store
///
/// Both calls are idempotent. The engine never writes through a store.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Human-readable store name (for logs)
    fn name(&self) -> &str;

    /// All catalog items, in store order
    async fn list_items(&self) -> Result<Vec<ContentItem>, CatalogError>;

    /// All categories, in display order
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// Items and categories from one read of the store
    ///
    /// Stores that serve a whole document override this so a page view
    /// never mixes two catalog versions.
    async fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        let items = self.list_items().await?;
        let categories = self.list_categories().await?;
        Ok(Catalog::with_parts(categories, items))
    }
}

/// An already-materialized catalog is its own store
#[async_trait]
impl CatalogStore for Catalog {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_items(&self) -> Result<Vec<ContentItem>, CatalogError> {
        Ok(self.items.clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories_for_display())
    }
}

/// Check whether a catalog source names a remote endpoint
pub fn is_remote_source(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Open a store for a catalog source (file path or http(s) URL)
pub fn open_store(source: &str, timeout: Duration) -> Box<dyn CatalogStore> {
    if is_remote_source(source) {
        Box::new(HttpCatalogStore::new(source, timeout))
    } else {
        Box::new(FileCatalogStore::new(source))
    }
}
