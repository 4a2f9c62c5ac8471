//! Catalog store backed by a JSON file on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::CatalogStore;
use crate::domain::{Category, ContentItem};
use crate::library::{Catalog, CatalogError};

/// Reads the catalog document from a local path on every call
pub struct FileCatalogStore {
    path: PathBuf,
    name: String,
}

impl FileCatalogStore {
    /// Create a store for a catalog file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Path to the catalog file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogStore for FileCatalogStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_items(&self) -> Result<Vec<ContentItem>, CatalogError> {
        Ok(Catalog::load(&self.path).await?.items)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(Catalog::load(&self.path).await?.categories_for_display())
    }

    async fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        Ok(Catalog::load(&self.path).await?.into_display_order())
    }
}
