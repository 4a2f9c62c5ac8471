//! Faceted query engine.
//!
//! This module contains:
//! - State: Facet selections (`QueryState`)
//! - Codec: `QueryState` <-> URL query string
//! - Filter / Sort / Partition / Aggregate: the pure pipeline stages
//! - Pipeline: `run(catalog, state) -> View`
//! - Debounce: timing adapter for search input

pub mod aggregate;
pub mod codec;
pub mod debounce;
pub mod filter;
pub mod partition;
pub mod pipeline;
pub mod sort;
pub mod state;

// Re-export commonly used types
pub use aggregate::{aggregate, CategoryCount, CategoryCounts};
pub use codec::{decode, encode, QueryCodec};
pub use debounce::{spawn_debouncer, Debouncer};
pub use filter::{filter, filter_with, Facets};
pub use partition::{partition, Partition};
pub use pipeline::{run, View};
pub use sort::sort;
pub use state::{CategoryFilter, DifficultyFilter, QueryState, SortKey, Tab};
