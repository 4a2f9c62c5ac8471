//! Filter predicate engine.
//!
//! An item matches when every enabled, active facet predicate holds. A facet
//! at its default value is skipped. `Facets` selects which predicates are
//! enabled so the category aggregator can reuse this engine with the category
//! predicate switched off.

use crate::domain::ContentItem;

use super::state::{CategoryFilter, DifficultyFilter, QueryState};

/// Set of enabled predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facets {
    pub search: bool,
    pub category: bool,
    pub difficulty: bool,
}

impl Facets {
    /// Every predicate enabled
    pub const ALL: Facets = Facets {
        search: true,
        category: true,
        difficulty: true,
    };

    /// Everything except the category predicate
    pub const WITHOUT_CATEGORY: Facets = Facets {
        search: true,
        category: false,
        difficulty: true,
    };
}

impl Default for Facets {
    fn default() -> Self {
        Self::ALL
    }
}

/// Compiled predicate for one `QueryState`
#[derive(Debug, Clone)]
pub struct Predicate<'q> {
    needle: Option<String>,
    category: Option<&'q str>,
    difficulty: DifficultyFilter,
}

impl<'q> Predicate<'q> {
    /// Compile the enabled facets of `state`
    pub fn new(state: &'q QueryState, facets: Facets) -> Self {
        let needle = if facets.search && state.has_search() {
            Some(state.normalized_search())
        } else {
            None
        };

        let category = match (&state.category, facets.category) {
            (CategoryFilter::Named(name), true) => Some(name.as_str()),
            _ => None,
        };

        let difficulty = if facets.difficulty {
            state.difficulty
        } else {
            DifficultyFilter::All
        };

        Self {
            needle,
            category,
            difficulty,
        }
    }

    /// Logical AND of the active predicates
    pub fn matches(&self, item: &ContentItem) -> bool {
        self.matches_search(item) && self.matches_category(item) && self.matches_difficulty(item)
    }

    fn matches_search(&self, item: &ContentItem) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };

        item.title.to_lowercase().contains(needle)
            || item.description.to_lowercase().contains(needle)
            || item.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    fn matches_category(&self, item: &ContentItem) -> bool {
        self.category.map_or(true, |c| item.category == c)
    }

    fn matches_difficulty(&self, item: &ContentItem) -> bool {
        match self.difficulty {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(d) => item.difficulty == d,
        }
    }
}

/// Items matching every facet of `state`, in catalog order
pub fn filter<'a>(items: &'a [ContentItem], state: &QueryState) -> Vec<&'a ContentItem> {
    filter_with(items, state, Facets::ALL)
}

/// Items matching the enabled facets of `state`, in catalog order
pub fn filter_with<'a>(
    items: &'a [ContentItem],
    state: &QueryState,
    facets: Facets,
) -> Vec<&'a ContentItem> {
    let predicate = Predicate::new(state, facets);
    items.iter().filter(|item| predicate.matches(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Difficulty;

    fn items() -> Vec<ContentItem> {
        vec![
            ContentItem::new("voice", "Voice Search Basics", "SEO", Difficulty::Beginner)
                .with_tag("assistants"),
            ContentItem::new("audit", "Technical Audit", "SEO", Difficulty::Advanced)
                .with_description("Crawl budget and VOICE of the customer"),
            ContentItem::new("zap", "Zapier Flows", "Automation", Difficulty::Intermediate)
                .with_tags(["no-code", "Workflows"]),
        ]
    }

    fn ids(results: &[&ContentItem]) -> Vec<String> {
        results.iter().map(|i| i.id.to_string()).collect()
    }

    #[test]
    fn test_default_state_matches_everything() {
        let items = items();
        assert_eq!(filter(&items, &QueryState::default()).len(), 3);
    }

    #[test]
    fn test_search_title_description_and_tags() {
        let items = items();

        let state = QueryState::new().with_search("voice");
        assert_eq!(ids(&filter(&items, &state)), vec!["voice", "audit"]);

        let state = QueryState::new().with_search("  WORKFLOWS ");
        assert_eq!(ids(&filter(&items, &state)), vec!["zap"]);

        let state = QueryState::new().with_search("python");
        assert!(filter(&items, &state).is_empty());
    }

    #[test]
    fn test_category_is_exact() {
        let items = items();

        let state = QueryState::new().with_category("SEO");
        assert_eq!(filter(&items, &state).len(), 2);

        let state = QueryState::new().with_category("seo");
        assert!(filter(&items, &state).is_empty());
    }

    #[test]
    fn test_difficulty() {
        let items = items();
        let state = QueryState::new().with_difficulty(Difficulty::Advanced);
        assert_eq!(ids(&filter(&items, &state)), vec!["audit"]);
    }

    #[test]
    fn test_facets_are_anded() {
        let items = items();
        let state = QueryState::new()
            .with_search("voice")
            .with_category("SEO")
            .with_difficulty(Difficulty::Beginner);

        assert_eq!(ids(&filter(&items, &state)), vec!["voice"]);
    }

    #[test]
    fn test_disabled_category_predicate() {
        let items = items();
        let state = QueryState::new().with_category("Automation");

        assert_eq!(filter(&items, &state).len(), 1);
        assert_eq!(filter_with(&items, &state, Facets::WITHOUT_CATEGORY).len(), 3);
    }

    #[test]
    fn test_empty_catalog() {
        let state = QueryState::new().with_search("voice");
        assert!(filter(&[], &state).is_empty());
    }
}
