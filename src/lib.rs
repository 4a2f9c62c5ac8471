//! playbooks - Faceted browsing engine for a playbook catalog
//!
//! Searches, filters, sorts and tab-partitions a catalog of playbooks, and
//! keeps the browse state losslessly reflected in a URL query string so that
//! filtered views are shareable and back/forward-navigable.
//!
//! # Architecture
//!
//! The engine is a pure pipeline:
//! - The URL query string decodes into a `QueryState`
//! - `filter -> sort -> partition` produces the visible result set
//! - `aggregate` produces per-category counts (ignoring the category facet)
//! - Every facet mutation re-encodes the state into the URL
//!
//! Given the same `(catalog, QueryState)` pair the output is always the same.
//!
//! # Modules
//!
//! - `adapters`: Catalog store backends (JSON file, HTTP)
//! - `domain`: Data structures (ContentItem, Category, Difficulty)
//! - `library`: Catalog document and load snapshot
//! - `query`: The query engine (state, codec, pipeline stages, debounce)
//! - `session`: Per-page browse session with URL sync
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Browse with a shareable query
//! playbooks browse "?category=SEO&sort=popular"
//!
//! # Category facet counts for a search
//! playbooks categories "?search=voice"
//!
//! # Canonicalize a query string
//! playbooks url "sort=newest&category=SEO&utm_source=mail"
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod library;
pub mod query;
pub mod session;

// Re-export main types at crate root for convenience
pub use adapters::{CatalogStore, FileCatalogStore, HttpCatalogStore};
pub use domain::{Category, ContentId, ContentItem, Difficulty};
pub use library::{Catalog, CatalogError, CatalogSnapshot, CatalogStatus};
pub use query::{QueryCodec, QueryState, SortKey, Tab, View};
pub use session::{BrowseSession, Navigator, RecordingNavigator};
