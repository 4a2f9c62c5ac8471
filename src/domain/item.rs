//! Catalog entries ("playbooks").
//!
//! Items are owned by the catalog store. The query engine only ever reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content identifier (catalog slug)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Create a content ID from a slug
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Difficulty tier of a playbook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// All tiers, easiest first
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// Exact (case-sensitive) label used in URLs and catalog files
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    /// Parse an exact label. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::parse(s).ok_or_else(|| anyhow::anyhow!("Unknown difficulty: {}", s))
    }
}

/// A single playbook in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique content identifier
    pub id: ContentId,

    /// Human-readable title
    pub title: String,

    /// Short description shown on cards
    #[serde(default)]
    pub description: String,

    /// Category label
    pub category: String,

    /// Free-form tags, in authored order
    #[serde(default)]
    pub tags: Vec<String>,

    /// Difficulty tier
    pub difficulty: Difficulty,

    /// Popularity counter (maintained by the store)
    #[serde(default)]
    pub popularity: u64,

    /// When the playbook was published
    pub published_at: DateTime<Utc>,

    /// Flagged for priority display
    #[serde(default)]
    pub featured: bool,
}

impl ContentItem {
    /// Create a new item published now
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: ContentId::new(id),
            title: title.into(),
            description: String::new(),
            category: category.into(),
            tags: Vec::new(),
            difficulty,
            popularity: 0,
            published_at: Utc::now(),
            featured: false,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set the popularity counter
    pub fn with_popularity(mut self, popularity: u64) -> Self {
        self.popularity = popularity;
        self
    }

    /// Set the publication timestamp
    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = published_at;
        self
    }

    /// Mark the item as featured
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_is_case_sensitive() {
        assert_eq!(Difficulty::parse("Beginner"), Some(Difficulty::Beginner));
        assert_eq!(Difficulty::parse("Advanced"), Some(Difficulty::Advanced));
        assert_eq!(Difficulty::parse("beginner"), None);
        assert_eq!(Difficulty::parse("foo"), None);
        assert!("Expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_item_deserialization_defaults() {
        let json = r#"{
            "id": "local-seo",
            "title": "Local SEO",
            "category": "SEO",
            "difficulty": "Intermediate",
            "published_at": "2024-05-01T00:00:00Z"
        }"#;

        let item: ContentItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.id.as_str(), "local-seo");
        assert_eq!(item.difficulty, Difficulty::Intermediate);
        assert!(item.tags.is_empty());
        assert!(item.description.is_empty());
        assert_eq!(item.popularity, 0);
        assert!(!item.featured);
    }

    #[test]
    fn test_item_builder() {
        let item = ContentItem::new("voice", "Voice Search Basics", "SEO", Difficulty::Beginner)
            .with_description("Optimize for assistants")
            .with_tags(["voice search", "seo"])
            .with_popularity(42)
            .featured();

        assert_eq!(item.tags, vec!["voice search", "seo"]);
        assert_eq!(item.popularity, 42);
        assert!(item.featured);
    }
}
