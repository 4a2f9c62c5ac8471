//! Domain types for the playbook catalog.
//!
//! This module contains the read-only data the engine browses:
//! - ContentItem: One playbook entry
//! - Difficulty: Closed difficulty tier
//! - Category: Facet value with a display order

pub mod category;
pub mod item;

// Re-export commonly used types
pub use category::Category;
pub use item::{ContentId, ContentItem, Difficulty};
