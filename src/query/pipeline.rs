//! The browse pipeline: `filter -> sort -> partition`, plus category counts.
//!
//! Pure and synchronous. The same `(catalog, state)` pair always produces
//! the same `View`, which is what lets the URL stand in for the view.

use serde::Serialize;

use crate::domain::ContentItem;
use crate::library::{CatalogSnapshot, CatalogStatus};

use super::aggregate::{aggregate, CategoryCounts};
use super::codec::QueryCodec;
use super::filter::filter;
use super::partition::{partition, Partition};
use super::sort::sort;
use super::state::QueryState;

/// Everything a page needs to render one state of the catalog
#[derive(Debug, Clone, Serialize)]
pub struct View<'a> {
    /// Items to render for the current tab (featured first)
    pub items: Vec<&'a ContentItem>,

    /// Featured/regular split of the sorted result set
    #[serde(flatten)]
    pub partition: Partition<'a>,

    /// Facet option counts
    pub category_counts: CategoryCounts,

    /// Catalog load status
    pub status: CatalogStatus,

    /// Canonical query string for this state
    pub query: String,
}

impl<'a> View<'a> {
    /// Number of visible items
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// A loaded catalog with nothing matching ("try adjusting filters")
    pub fn is_no_results(&self) -> bool {
        self.status == CatalogStatus::Loaded && self.items.is_empty()
    }
}

/// Filter and sort the catalog: the full result set before tab selection
pub fn results<'a>(items: &'a [ContentItem], state: &QueryState) -> Vec<&'a ContentItem> {
    let mut results = filter(items, state);
    sort(&mut results, state.sort_key);
    results
}

/// Run the whole pipeline for one state
pub fn run<'a>(snapshot: &'a CatalogSnapshot, state: &QueryState, codec: &QueryCodec) -> View<'a> {
    let items = snapshot.items();
    let categories = snapshot
        .catalog()
        .map(|c| c.categories_for_display())
        .unwrap_or_default();

    let sorted = results(items, state);
    let partition = partition(&sorted);
    let visible = partition.visible(state.tab);
    let category_counts = aggregate(items, &categories, state);

    tracing::debug!(
        search = %state.search_term,
        category = state.category.as_str(),
        difficulty = state.difficulty.as_str(),
        sort = state.sort_key.as_str(),
        tab = state.tab.as_str(),
        matched = sorted.len(),
        visible = visible.len(),
        "Pipeline run"
    );

    View {
        items: visible,
        partition,
        category_counts,
        status: snapshot.status(),
        query: codec.encode(state),
    }
}
