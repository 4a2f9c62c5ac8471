//! Categories used for faceted navigation.

use serde::{Deserialize, Serialize};

/// A category facet value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Human-readable name, also the label items carry
    pub name: String,

    /// Display order in facet navigation (ascending)
    #[serde(default)]
    pub order: u32,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, order: u32) -> Self {
        Self {
            name: name.into(),
            order,
        }
    }
}

/// Sort categories into display order (by `order`, then by name)
pub fn sort_for_display(categories: &mut [Category]) {
    categories.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
}
