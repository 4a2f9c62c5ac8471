//! Per-category counts for facet navigation.
//!
//! Counts answer "how many items would match if this category were
//! selected": search, difficulty and tab apply, the category facet does not.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Category, ContentItem};

use super::filter::{filter_with, Facets};
use super::partition::apply_tab;
use super::state::QueryState;

/// Count for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Counts for every category, in display order
///
/// Known categories come first (zero counts included). Labels found on items
/// but missing from the category list follow in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryCounts {
    entries: Vec<CategoryCount>,
}

impl CategoryCounts {
    /// Count for a category (0 if unknown)
    pub fn get(&self, name: &str) -> usize {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map_or(0, |e| e.count)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryCount> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a CategoryCounts {
    type Item = &'a CategoryCount;
    type IntoIter = std::slice::Iter<'a, CategoryCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Compute category counts for `state` over the catalog.
///
/// `categories` should already be in display order.
pub fn aggregate(
    items: &[ContentItem],
    categories: &[Category],
    state: &QueryState,
) -> CategoryCounts {
    let matching = apply_tab(filter_with(items, state, Facets::WITHOUT_CATEGORY), state.tab);

    let mut entries: Vec<CategoryCount> = Vec::with_capacity(categories.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    // A name listed twice keeps its first position
    for category in categories {
        if index.contains_key(&category.name) {
            continue;
        }
        index.insert(category.name.clone(), entries.len());
        entries.push(CategoryCount {
            name: category.name.clone(),
            count: 0,
        });
    }

    for item in matching {
        let slot = match index.get(&item.category) {
            Some(&i) => i,
            None => {
                entries.push(CategoryCount {
                    name: item.category.clone(),
                    count: 0,
                });
                index.insert(item.category.clone(), entries.len() - 1);
                entries.len() - 1
            }
        };
        entries[slot].count += 1;
    }

    CategoryCounts { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Difficulty;
    use crate::query::filter::filter;
    use crate::query::state::Tab;

    fn categories() -> Vec<Category> {
        vec![
            Category::new("SEO", 1),
            Category::new("Automation", 2),
            Category::new("Content", 3),
        ]
    }

    fn items() -> Vec<ContentItem> {
        vec![
            ContentItem::new("s1", "Voice SEO", "SEO", Difficulty::Beginner).featured(),
            ContentItem::new("s2", "Audits", "SEO", Difficulty::Advanced),
            ContentItem::new("a1", "Voice bots", "Automation", Difficulty::Beginner),
            ContentItem::new("a2", "Zaps", "Automation", Difficulty::Beginner),
            ContentItem::new("x1", "Voice misc", "Legacy", Difficulty::Beginner),
        ]
    }

    #[test]
    fn test_counts_ignore_category_facet() {
        let state = QueryState::new().with_category("SEO");
        let counts = aggregate(&items(), &categories(), &state);

        assert_eq!(counts.get("SEO"), 2);
        assert_eq!(counts.get("Automation"), 2);
        assert_eq!(counts.get("Content"), 0);
    }

    #[test]
    fn test_zero_count_categories_are_listed_in_order() {
        let counts = aggregate(&items(), &categories(), &QueryState::default());

        let names: Vec<_> = counts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["SEO", "Automation", "Content", "Legacy"]);
    }

    #[test]
    fn test_search_and_tab_apply() {
        let state = QueryState::new().with_search("voice");
        let counts = aggregate(&items(), &categories(), &state);
        assert_eq!(counts.get("SEO"), 1);
        assert_eq!(counts.get("Automation"), 1);
        assert_eq!(counts.get("Legacy"), 1);

        let state = QueryState::new().with_tab(Tab::Featured);
        let counts = aggregate(&items(), &categories(), &state);
        assert_eq!(counts.total(), 1);
        assert_eq!(counts.get("SEO"), 1);
    }

    #[test]
    fn test_total_matches_all_category_results() {
        let items = items();
        let state = QueryState::new()
            .with_difficulty(Difficulty::Beginner)
            .with_category("Content");

        let counts = aggregate(&items, &categories(), &state);
        let unrestricted = filter(&items, &state.clone().with_category("all"));

        assert_eq!(counts.total(), unrestricted.len());
    }

    #[test]
    fn test_duplicate_category_listed_once() {
        let categories = vec![
            Category::new("SEO", 1),
            Category::new("Automation", 2),
            Category::new("SEO", 3),
        ];
        let counts = aggregate(&items(), &categories, &QueryState::default());

        let names: Vec<_> = counts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["SEO", "Automation", "Legacy"]);
        assert_eq!(counts.get("SEO"), 2);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn test_empty_inputs() {
        let counts = aggregate(&[], &[], &QueryState::default());
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
    }
}
