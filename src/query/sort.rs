//! Result ordering.
//!
//! All orderings are stable: ties keep catalog order.

use std::cmp::Ordering;

use crate::domain::ContentItem;

use super::state::SortKey;

/// Compare two items under `key`
pub fn compare(a: &ContentItem, b: &ContentItem, key: SortKey) -> Ordering {
    match key {
        SortKey::Newest => b.published_at.cmp(&a.published_at),
        SortKey::Oldest => a.published_at.cmp(&b.published_at),
        SortKey::Popular => b.popularity.cmp(&a.popularity),
        SortKey::Title => compare_titles(&a.title, &b.title),
    }
}

/// Case-insensitive, by Unicode code point
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Sort items in place by `key`
pub fn sort(items: &mut [&ContentItem], key: SortKey) {
    items.sort_by(|a, b| compare(a, b, key));
}

/// Return a sorted copy
pub fn sorted<'a>(items: &[&'a ContentItem], key: SortKey) -> Vec<&'a ContentItem> {
    let mut items = items.to_vec();
    sort(&mut items, key);
    items
}
