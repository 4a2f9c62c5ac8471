//! Playbook catalog as read by the query engine.
//!
//! # Catalog Document
//!
//! ```text
//! catalog.json
//! ├── version       # format version (1)
//! ├── categories[]  # { name, order }
//! └── items[]       # { id, title, description, category, tags,
//!                   #   difficulty, popularity, published_at, featured }
//! ```

pub mod catalog;
pub mod snapshot;

pub use catalog::{Catalog, CatalogError};
pub use snapshot::{fetch_snapshot, CatalogSnapshot, CatalogStatus};
