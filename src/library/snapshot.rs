//! Load state of the catalog as seen by a page view.
//!
//! The catalog is fetched once. Until that fetch resolves, and after it
//! fails, the query engine sees an empty catalog.

use serde::Serialize;

use crate::adapters::CatalogStore;
use crate::domain::{Category, ContentItem};

use super::catalog::Catalog;

/// Catalog as handed to the query engine
#[derive(Debug, Clone, Default)]
pub enum CatalogSnapshot {
    /// Fetch has not resolved yet
    #[default]
    Loading,

    /// Fetch resolved
    Loaded(Catalog),

    /// Fetch failed (reason for display only)
    Failed(String),
}

/// Load status surfaced alongside every view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogStatus {
    Loading,
    Loaded,
    Failed,
}

impl CatalogSnapshot {
    /// Items visible to the engine (empty unless loaded)
    pub fn items(&self) -> &[ContentItem] {
        match self {
            CatalogSnapshot::Loaded(catalog) => &catalog.items,
            _ => &[],
        }
    }

    /// Categories visible to the engine (empty unless loaded)
    pub fn categories(&self) -> &[Category] {
        match self {
            CatalogSnapshot::Loaded(catalog) => &catalog.categories,
            _ => &[],
        }
    }

    /// The loaded catalog, if any
    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            CatalogSnapshot::Loaded(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn status(&self) -> CatalogStatus {
        match self {
            CatalogSnapshot::Loading => CatalogStatus::Loading,
            CatalogSnapshot::Loaded(_) => CatalogStatus::Loaded,
            CatalogSnapshot::Failed(_) => CatalogStatus::Failed,
        }
    }
}

impl From<Catalog> for CatalogSnapshot {
    fn from(catalog: Catalog) -> Self {
        CatalogSnapshot::Loaded(catalog)
    }
}

/// Fetch the catalog from a store. Failures become `Failed`; no retry.
pub async fn fetch_snapshot(store: &dyn CatalogStore) -> CatalogSnapshot {
    match store.load_catalog().await {
        Ok(catalog) => {
            tracing::info!(
                "Loaded {} items in {} categories from {}",
                catalog.items.len(),
                catalog.categories.len(),
                store.name()
            );
            CatalogSnapshot::Loaded(catalog)
        }
        Err(e) => {
            tracing::warn!("Failed to load catalog from {}: {}", store.name(), e);
            CatalogSnapshot::Failed(e.to_string())
        }
    }
}
