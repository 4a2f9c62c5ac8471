//! One page view's browse session.
//!
//! The session owns the `QueryState` and the catalog snapshot. Every facet
//! mutation re-encodes the state and hands the query string to the
//! `Navigator`, which replaces the page address without a full navigation.
//! Views are recomputed from scratch on demand.
//!
//! Typed search text goes through a `Debouncer` first: `type_search` records
//! a keystroke and `poll_search` commits the term once typing pauses.

use std::time::{Duration, Instant};

use crate::domain::Difficulty;
use crate::library::CatalogSnapshot;
use crate::query::debounce::DEFAULT_DEBOUNCE;
use crate::query::{
    self, CategoryFilter, DifficultyFilter, Debouncer, QueryCodec, QueryState, SortKey, Tab,
    View,
};

/// Host navigation collaborator
pub trait Navigator {
    /// Replace the current query string in place (no new history entry)
    fn replace_query(&mut self, query: &str);
}

/// Navigator that remembers every replacement (CLI and tests)
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    pub replacements: Vec<String>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The query string currently in the address bar
    pub fn current(&self) -> Option<&str> {
        self.replacements.last().map(String::as_str)
    }
}

impl Navigator for RecordingNavigator {
    fn replace_query(&mut self, query: &str) {
        self.replacements.push(query.to_string());
    }
}

/// Browse state for a single page view
pub struct BrowseSession<N: Navigator> {
    codec: QueryCodec,
    navigator: N,
    snapshot: CatalogSnapshot,
    state: QueryState,
    /// Address the page was opened with, kept until the first mutation so
    /// that categories can be resolved once the catalog arrives
    initial_query: Option<String>,
    search_input: Debouncer<String>,
}

impl<N: Navigator> BrowseSession<N> {
    /// Open a session from the page's query string. The catalog starts out
    /// as `Loading`.
    pub fn new(codec: QueryCodec, navigator: N, url_query: &str) -> Self {
        Self {
            codec,
            navigator,
            snapshot: CatalogSnapshot::Loading,
            state: codec.decode(url_query, &[]),
            initial_query: Some(url_query.to_string()),
            search_input: Debouncer::new(DEFAULT_DEBOUNCE),
        }
    }

    /// Use `delay` as the quiet period for typed search text
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_input = Debouncer::new(delay);
        self
    }

    /// Hand the session a resolved (or failed) catalog
    pub fn set_snapshot(&mut self, snapshot: CatalogSnapshot) {
        self.snapshot = snapshot;

        if let Some(ref query) = self.initial_query {
            let tab = self.state.tab;
            self.state = self.codec.decode(query, self.snapshot.categories());
            if !self.codec.persists_tab() {
                self.state.tab = tab;
            }
        }
    }

    /// Back/forward navigation landed on `url_query`: adopt it without
    /// writing the address again
    pub fn restore(&mut self, url_query: &str) {
        let tab = self.state.tab;
        self.state = self.codec.decode(url_query, self.snapshot.categories());
        if !self.codec.persists_tab() {
            self.state.tab = tab;
        }
        self.initial_query = None;
        self.search_input.cancel();
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn codec(&self) -> &QueryCodec {
        &self.codec
    }

    /// Recompute the view for the current state
    pub fn view(&self) -> View<'_> {
        query::run(&self.snapshot, &self.state, &self.codec)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
        self.commit();
    }

    /// Record a keystroke in the search box; nothing changes until
    /// `poll_search` sees a pause of the debounce delay
    pub fn type_search(&mut self, term: impl Into<String>, now: Instant) {
        self.search_input.push(term.into(), now);
    }

    /// Commit the typed term if typing has paused. Returns whether the
    /// state changed.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.search_input.poll(now) {
            Some(term) => {
                self.set_search(term);
                true
            }
            None => false,
        }
    }

    /// When a pending search term becomes due
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search_input.deadline()
    }

    /// Commit the typed term right away (e.g. on Enter)
    pub fn submit_search(&mut self) -> bool {
        match self.search_input.flush() {
            Some(term) => {
                self.set_search(term);
                true
            }
            None => false,
        }
    }

    /// Select a category by label. Labels the catalog does not list select
    /// all categories, as they would after a reload.
    pub fn set_category(&mut self, label: &str) {
        let category = match CategoryFilter::from_label(label) {
            CategoryFilter::Named(name) if !self.is_known_category(&name) => {
                tracing::debug!("Ignoring unknown category selection: {}", name);
                CategoryFilter::All
            }
            category => category,
        };
        self.state.category = category;
        self.commit();
    }

    pub fn set_difficulty(&mut self, difficulty: Option<Difficulty>) {
        self.state.difficulty = difficulty.map_or(DifficultyFilter::All, DifficultyFilter::Only);
        self.commit();
    }

    pub fn set_sort(&mut self, sort_key: SortKey) {
        self.state.sort_key = sort_key;
        self.commit();
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.state.tab = tab;
        self.commit();
    }

    /// Reset every facet and strip the recognized parameters from the URL
    pub fn clear_filters(&mut self) {
        self.search_input.cancel();
        self.state.clear();
        self.commit();
    }

    fn is_known_category(&self, name: &str) -> bool {
        self.snapshot
            .catalog()
            .is_some_and(|catalog| catalog.has_category(name))
    }

    fn commit(&mut self) {
        self.initial_query = None;
        let query = self.codec.encode(&self.state);
        tracing::debug!("Replacing query string: {:?}", query);
        self.navigator.replace_query(&query);
    }
}
