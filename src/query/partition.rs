//! Featured / regular split for tabbed display.

use serde::Serialize;

use crate::domain::ContentItem;

use super::state::Tab;

/// A sorted result set split on the featured flag. Both lists keep the
/// input's relative order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Partition<'a> {
    pub featured: Vec<&'a ContentItem>,
    pub regular: Vec<&'a ContentItem>,
}

impl<'a> Partition<'a> {
    pub fn len(&self) -> usize {
        self.featured.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.featured.is_empty() && self.regular.is_empty()
    }

    /// Items exposed for a tab: featured only, or featured followed by regular
    pub fn visible(&self, tab: Tab) -> Vec<&'a ContentItem> {
        match tab {
            Tab::Featured => self.featured.clone(),
            Tab::All => self
                .featured
                .iter()
                .chain(self.regular.iter())
                .copied()
                .collect(),
        }
    }
}

/// Split `results` into featured and regular items
pub fn partition<'a>(results: &[&'a ContentItem]) -> Partition<'a> {
    let (featured, regular): (Vec<&'a ContentItem>, Vec<&'a ContentItem>) =
        results.iter().copied().partition(|item| item.featured);
    Partition { featured, regular }
}

/// Restrict a result set to what a tab shows
pub fn apply_tab<'a>(results: Vec<&'a ContentItem>, tab: Tab) -> Vec<&'a ContentItem> {
    match tab {
        Tab::All => results,
        Tab::Featured => results.into_iter().filter(|item| item.featured).collect(),
    }
}
