//! Bidirectional mapping between `QueryState` and a URL query string.
//!
//! Decoding is fail-soft: a missing, unknown or malformed value falls back to
//! that facet's default. Encoding emits only non-default facets, in a fixed
//! parameter order, so the output is the canonical query for a state.
//!
//! ```text
//! ?search=voice%20search&category=SEO&difficulty=Beginner&sort=popular
//! ```

use std::borrow::Cow;

use crate::domain::{Category, Difficulty};

use super::state::{CategoryFilter, DifficultyFilter, QueryState, SortKey, Tab, ALL};

pub const PARAM_SEARCH: &str = "search";
pub const PARAM_CATEGORY: &str = "category";
pub const PARAM_DIFFICULTY: &str = "difficulty";
pub const PARAM_SORT: &str = "sort";
pub const PARAM_TAB: &str = "tab";

/// Query string codec
///
/// `tab` is a page-local selection and is only written to (and read from)
/// the URL when `persist_tab` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryCodec {
    persist_tab: bool,
}

/// Last raw value seen for each recognized parameter
#[derive(Default)]
struct RawParams<'a> {
    search: Option<Cow<'a, str>>,
    category: Option<Cow<'a, str>>,
    difficulty: Option<Cow<'a, str>>,
    sort: Option<Cow<'a, str>>,
    tab: Option<Cow<'a, str>>,
}

impl QueryCodec {
    /// Codec with the reference behavior (tab kept out of the URL)
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec that also persists the tab selection
    pub fn with_tab_persistence(persist_tab: bool) -> Self {
        Self { persist_tab }
    }

    pub fn persists_tab(&self) -> bool {
        self.persist_tab
    }

    /// Decode a query string (with or without a leading `?`).
    ///
    /// `categories` is the set of known category names; any other category
    /// value is treated as absent.
    pub fn decode(&self, query: &str, categories: &[Category]) -> QueryState {
        let raw = parse_params(query);
        let mut state = QueryState::default();

        if let Some(search) = raw.search {
            state.search_term = search.into_owned();
        }

        if let Some(category) = raw.category {
            if category == ALL {
                state.category = CategoryFilter::All;
            } else if categories.iter().any(|c| c.name == category) {
                state.category = CategoryFilter::Named(category.into_owned());
            } else {
                tracing::debug!("Ignoring unknown category parameter: {}", category);
            }
        }

        if let Some(difficulty) = raw.difficulty {
            match Difficulty::parse(&difficulty) {
                Some(d) => state.difficulty = DifficultyFilter::Only(d),
                None if difficulty == ALL => {}
                None => tracing::debug!("Ignoring unknown difficulty parameter: {}", difficulty),
            }
        }

        if let Some(sort) = raw.sort {
            match SortKey::parse(&sort) {
                Some(key) => state.sort_key = key,
                None => tracing::debug!("Ignoring unknown sort parameter: {}", sort),
            }
        }

        if self.persist_tab {
            if let Some(tab) = raw.tab {
                match Tab::parse(&tab) {
                    Some(tab) => state.tab = tab,
                    None => tracing::debug!("Ignoring unknown tab parameter: {}", tab),
                }
            }
        }

        state
    }

    /// Encode a state as its canonical query string (no leading `?`).
    ///
    /// All-default state encodes to the empty string.
    pub fn encode(&self, state: &QueryState) -> String {
        let mut params = Vec::new();

        if !state.search_term.is_empty() {
            params.push(format!(
                "{}={}",
                PARAM_SEARCH,
                urlencoding::encode(&state.search_term)
            ));
        }
        if let CategoryFilter::Named(ref name) = state.category {
            params.push(format!("{}={}", PARAM_CATEGORY, urlencoding::encode(name)));
        }
        if let DifficultyFilter::Only(d) = state.difficulty {
            params.push(format!("{}={}", PARAM_DIFFICULTY, d.as_str()));
        }
        if state.sort_key != SortKey::default() {
            params.push(format!("{}={}", PARAM_SORT, state.sort_key.as_str()));
        }
        if self.persist_tab && state.tab != Tab::default() {
            params.push(format!("{}={}", PARAM_TAB, state.tab.as_str()));
        }

        params.join("&")
    }

    /// Build an address for `path` carrying the encoded state
    pub fn href(&self, path: &str, state: &QueryState) -> String {
        let query = self.encode(state);
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        }
    }

    /// Re-encode a query string in canonical form
    pub fn canonicalize(&self, query: &str, categories: &[Category]) -> String {
        self.encode(&self.decode(query, categories))
    }
}

/// Decode with the default codec
pub fn decode(query: &str, categories: &[Category]) -> QueryState {
    QueryCodec::default().decode(query, categories)
}

/// Encode with the default codec
pub fn encode(state: &QueryState) -> String {
    QueryCodec::default().encode(state)
}

/// Split a query string into the recognized parameters. Later occurrences
/// win; undecodable values are dropped.
fn parse_params(query: &str) -> RawParams<'_> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut raw = RawParams::default();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));

        let slot = match key {
            PARAM_SEARCH => &mut raw.search,
            PARAM_CATEGORY => &mut raw.category,
            PARAM_DIFFICULTY => &mut raw.difficulty,
            PARAM_SORT => &mut raw.sort,
            PARAM_TAB => &mut raw.tab,
            _ => continue,
        };

        *slot = decode_component(value);
    }

    raw
}

/// Percent-decode one value, treating `+` as a space
fn decode_component(value: &str) -> Option<Cow<'_, str>> {
    if value.contains('+') {
        let spaced = value.replace('+', " ");
        return urlencoding::decode(&spaced)
            .ok()
            .map(|v| Cow::Owned(v.into_owned()));
    }
    urlencoding::decode(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![Category::new("SEO", 1), Category::new("Voice & Chat", 2)]
    }

    #[test]
    fn test_decode_empty_query() {
        assert_eq!(decode("", &categories()), QueryState::default());
        assert_eq!(decode("?", &categories()), QueryState::default());
    }

    #[test]
    fn test_decode_all_params() {
        let state = decode(
            "?search=voice%20search&category=SEO&difficulty=Advanced&sort=title",
            &categories(),
        );

        assert_eq!(state.search_term, "voice search");
        assert_eq!(state.category, CategoryFilter::Named("SEO".to_string()));
        assert_eq!(state.difficulty, DifficultyFilter::Only(Difficulty::Advanced));
        assert_eq!(state.sort_key, SortKey::Title);
    }

    #[test]
    fn test_decode_unknown_values_fall_back() {
        let state = decode(
            "difficulty=foo&category=Nope&sort=random&tab=featured",
            &categories(),
        );
        assert_eq!(state, QueryState::default());
    }

    #[test]
    fn test_decode_difficulty_is_case_sensitive() {
        let state = decode("difficulty=beginner", &categories());
        assert_eq!(state.difficulty, DifficultyFilter::All);
    }

    #[test]
    fn test_decode_ignores_unrecognized_params() {
        let state = decode("utm_source=mail&sort=popular&page=3", &categories());
        assert_eq!(state, QueryState::new().with_sort(SortKey::Popular));
    }

    #[test]
    fn test_decode_plus_as_space() {
        let state = decode("search=voice+search", &categories());
        assert_eq!(state.search_term, "voice search");
    }

    #[test]
    fn test_decode_last_occurrence_wins() {
        let state = decode("sort=title&sort=oldest", &categories());
        assert_eq!(state.sort_key, SortKey::Oldest);

        // A bad later value still resets the facet to its default
        let state = decode("sort=title&sort=bogus", &categories());
        assert_eq!(state.sort_key, SortKey::Newest);
    }

    #[test]
    fn test_decode_invalid_percent_encoding() {
        let state = decode("search=%FF%FE&sort=popular", &categories());
        assert_eq!(state.search_term, "");
        assert_eq!(state.sort_key, SortKey::Popular);
    }

    #[test]
    fn test_encode_defaults_is_empty() {
        assert_eq!(encode(&QueryState::default()), "");
    }

    #[test]
    fn test_encode_only_non_defaults() {
        let state = QueryState::new()
            .with_category("Voice & Chat")
            .with_sort(SortKey::Popular);

        assert_eq!(encode(&state), "category=Voice%20%26%20Chat&sort=popular");
    }

    #[test]
    fn test_tab_persistence() {
        let state = QueryState::new().with_tab(Tab::Featured);

        assert_eq!(QueryCodec::new().encode(&state), "");

        let codec = QueryCodec::with_tab_persistence(true);
        assert_eq!(codec.encode(&state), "tab=featured");
        assert_eq!(codec.decode("tab=featured", &[]), state);
        assert_eq!(codec.decode("tab=pinned", &[]), QueryState::default());
    }

    #[test]
    fn test_href() {
        let codec = QueryCodec::new();
        assert_eq!(codec.href("/playbooks", &QueryState::default()), "/playbooks");
        assert_eq!(
            codec.href("/playbooks", &QueryState::new().with_sort(SortKey::Oldest)),
            "/playbooks?sort=oldest"
        );
    }

    #[test]
    fn test_canonicalize_reorders_and_drops() {
        let codec = QueryCodec::new();
        assert_eq!(
            codec.canonicalize("?sort=newest&ref=x&category=SEO&search=a+b", &categories()),
            "search=a%20b&category=SEO"
        );
    }
}
