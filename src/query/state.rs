//! Query state: the complete set of current facet selections.
//!
//! Every field always holds one of its legal values. Facets at their default
//! value are inactive and are left out of the URL.

use serde::{Deserialize, Serialize};

use crate::domain::Difficulty;

/// Sentinel used for "no restriction" on category and difficulty
pub const ALL: &str = "all";

/// Category facet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Create a filter from a label; the "all" sentinel maps to `All`
    pub fn from_label(label: &str) -> Self {
        if label == ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(label.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL,
            CategoryFilter::Named(name) => name,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

/// Difficulty facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "tier")]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyFilter::All => ALL,
            DifficultyFilter::Only(d) => d.as_str(),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, DifficultyFilter::All)
    }
}

impl From<Difficulty> for DifficultyFilter {
    fn from(d: Difficulty) -> Self {
        DifficultyFilter::Only(d)
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Publication timestamp, newest first
    #[default]
    Newest,
    /// Publication timestamp, oldest first
    Oldest,
    /// Popularity counter, highest first
    Popular,
    /// Title A-Z, case-insensitive
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::Popular,
        SortKey::Title,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Popular => "popular",
            SortKey::Title => "title",
        }
    }

    /// Parse an exact URL value. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    All,
    Featured,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::All, Tab::Featured];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::Featured => "featured",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current facet selections for one page view
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QueryState {
    /// Raw search text as typed (trimmed when matching)
    pub search_term: String,

    pub category: CategoryFilter,

    pub difficulty: DifficultyFilter,

    pub sort_key: SortKey,

    pub tab: Tab,
}

impl QueryState {
    /// All facets at their defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.category = CategoryFilter::from_label(category.as_ref());
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<DifficultyFilter>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    pub fn with_sort(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = tab;
        self
    }

    /// Search term as used for matching (trimmed, lowercased)
    pub fn normalized_search(&self) -> String {
        self.search_term.trim().to_lowercase()
    }

    /// Whether the search facet restricts anything
    pub fn has_search(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    /// Whether any filtering facet (search, category, difficulty, tab) is active
    pub fn has_active_filters(&self) -> bool {
        self.has_search()
            || !self.category.is_all()
            || !self.difficulty.is_all()
            || self.tab != Tab::All
    }

    /// Reset every facet to its default ("clear filters")
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = QueryState::new();

        assert_eq!(state.search_term, "");
        assert_eq!(state.category, CategoryFilter::All);
        assert_eq!(state.difficulty, DifficultyFilter::All);
        assert_eq!(state.sort_key, SortKey::Newest);
        assert_eq!(state.tab, Tab::All);
        assert!(!state.has_active_filters());
    }

    #[test]
    fn test_category_sentinel() {
        assert_eq!(CategoryFilter::from_label("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_label("SEO"),
            CategoryFilter::Named("SEO".to_string())
        );
        assert_eq!(CategoryFilter::All.as_str(), "all");
    }

    #[test]
    fn test_sort_key_parse() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SortKey::parse("Newest"), None);
        assert_eq!(SortKey::parse("random"), None);
    }

    #[test]
    fn test_whitespace_search_is_inactive() {
        let state = QueryState::new().with_search("   ");
        assert!(!state.has_search());
        assert!(!state.has_active_filters());

        let state = QueryState::new().with_search("  Voice ");
        assert_eq!(state.normalized_search(), "voice");
    }

    #[test]
    fn test_clear_restores_defaults() {
        let mut state = QueryState::new()
            .with_search("voice")
            .with_category("SEO")
            .with_difficulty(Difficulty::Advanced)
            .with_sort(SortKey::Title)
            .with_tab(Tab::Featured);

        assert!(state.has_active_filters());
        state.clear();
        assert_eq!(state, QueryState::default());
    }
}
