//! Catalog of playbooks and categories.
//!
//! Simple JSON document, read-only from the query engine's point of view.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

use crate::domain::category::sort_for_display;
use crate::domain::{Category, ContentId, ContentItem};

/// Errors raised while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog server returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Catalog of all published playbooks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Category facet values
    #[serde(default)]
    pub categories: Vec<Category>,

    /// All cataloged items, in store order
    #[serde(default)]
    pub items: Vec<ContentItem>,
}

fn default_version() -> u32 {
    1
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            version: default_version(),
            categories: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Build a catalog from parts
    pub fn with_parts(categories: Vec<Category>, items: Vec<ContentItem>) -> Self {
        Self {
            version: default_version(),
            categories,
            items,
        }
    }

    /// Parse a catalog document
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog document from disk
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.display().to_string(),
                source,
            })?;

        Self::from_json(&content)
    }

    /// Get an item by ID
    pub fn get(&self, id: &ContentId) -> Option<&ContentItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Categories in facet display order
    pub fn categories_for_display(&self) -> Vec<Category> {
        let mut categories = self.categories.clone();
        sort_for_display(&mut categories);
        categories
    }

    /// Put the category list itself into display order
    pub fn into_display_order(mut self) -> Self {
        sort_for_display(&mut self.categories);
        self
    }

    /// Check whether a category name is known
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
