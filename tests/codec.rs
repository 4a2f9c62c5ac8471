//! Query Codec Integration Tests
//!
//! Decode defaulting and encode/decode round trips over the facet space.

use playbooks::domain::{Category, Difficulty};
use playbooks::query::{
    decode, encode, CategoryFilter, DifficultyFilter, QueryCodec, QueryState, SortKey, Tab,
};

fn categories() -> Vec<Category> {
    vec![
        Category::new("SEO", 1),
        Category::new("Automation", 2),
        Category::new("Voice & Chat", 3),
        Category::new("all-in-one", 4),
    ]
}

/// Every legal state built from the known categories and a few search terms
fn legal_states() -> Vec<QueryState> {
    let searches = [
        "",
        "voice",
        "voice search",
        "  padded  ",
        "a+b=c&d",
        "100% ROI?",
        "café",
        "#growth",
    ];
    let mut category_labels = vec!["all".to_string()];
    category_labels.extend(categories().into_iter().map(|c| c.name));

    let mut states = Vec::new();
    for search in searches {
        for category in &category_labels {
            let difficulties = std::iter::once(DifficultyFilter::All)
                .chain(Difficulty::ALL.into_iter().map(DifficultyFilter::Only));
            for difficulty in difficulties {
                for sort in SortKey::ALL {
                    for tab in Tab::ALL {
                        states.push(
                            QueryState::new()
                                .with_search(search)
                                .with_category(category)
                                .with_difficulty(difficulty)
                                .with_sort(sort)
                                .with_tab(tab),
                        );
                    }
                }
            }
        }
    }
    states
}

#[test]
fn test_round_trip_with_persisted_tab() {
    let codec = QueryCodec::with_tab_persistence(true);
    let categories = categories();

    for state in legal_states() {
        let encoded = codec.encode(&state);
        assert_eq!(codec.decode(&encoded, &categories), state, "query: {}", encoded);
    }
}

#[test]
fn test_round_trip_keeps_url_facets_without_tab() {
    let codec = QueryCodec::new();
    let categories = categories();

    for state in legal_states() {
        let decoded = codec.decode(&codec.encode(&state), &categories);
        assert_eq!(decoded, state.clone().with_tab(Tab::All));
    }
}

#[test]
fn test_canonical_queries_are_fixed_points() {
    let codec = QueryCodec::with_tab_persistence(true);
    let categories = categories();

    for state in legal_states() {
        let canonical = codec.encode(&state);
        assert_eq!(codec.canonicalize(&canonical, &categories), canonical);
    }
}

#[test]
fn test_decode_never_yields_illegal_values() {
    let categories = categories();
    let queries = [
        "difficulty=foo",
        "difficulty=BEGINNER&sort=Newest",
        "category=seo",
        "category=&sort=",
        "sort=popular&sort=",
        "tab=everything",
        "search",
        "=&&=&",
        "category=%E0%A4%A",
        "difficulty=Beginner%00",
    ];

    for query in queries {
        let state = decode(query, &categories);

        if let CategoryFilter::Named(ref name) = state.category {
            assert!(categories.iter().any(|c| &c.name == name), "{}", query);
        }
        assert_eq!(state.tab, Tab::All);
    }

    assert_eq!(decode("difficulty=foo", &categories).difficulty, DifficultyFilter::All);
    assert_eq!(decode("category=seo", &categories).category, CategoryFilter::All);
    assert_eq!(decode("sort=popular&sort=", &categories).sort_key, SortKey::Newest);
}

#[test]
fn test_category_named_all_is_the_sentinel() {
    let categories = categories();

    let state = decode("category=all", &categories);
    assert_eq!(state.category, CategoryFilter::All);
    assert_eq!(encode(&state), "");

    // A real category that merely starts with "all" is kept
    let state = decode("category=all-in-one", &categories);
    assert_eq!(state.category, CategoryFilter::Named("all-in-one".to_string()));
}

#[test]
fn test_encode_is_minimal() {
    assert_eq!(encode(&QueryState::default()), "");
    assert_eq!(
        encode(&QueryState::new().with_search("voice search")),
        "search=voice%20search"
    );
    assert_eq!(
        encode(
            &QueryState::new()
                .with_sort(SortKey::Title)
                .with_difficulty(Difficulty::Intermediate)
        ),
        "difficulty=Intermediate&sort=title"
    );
}
