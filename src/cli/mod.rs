//! Command-line interface for playbooks.
//!
//! Provides commands for browsing the catalog with URL-style queries,
//! inspecting facet counts, normalizing query strings, and showing items.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::adapters::open_store;
use crate::config::{self, ResolvedConfig};
use crate::domain::{ContentId, ContentItem, Difficulty};
use crate::library::{fetch_snapshot, Catalog, CatalogSnapshot};
use crate::query::{SortKey, Tab, View};
use crate::session::{BrowseSession, RecordingNavigator};

/// playbooks - Search, filter and sort the playbook catalog
#[derive(Parser, Debug)]
#[command(name = "playbooks")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the catalog
    Browse {
        /// URL query string (e.g. "?category=SEO&sort=popular")
        #[arg(default_value = "")]
        query: String,

        #[command(flatten)]
        facets: FacetArgs,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show per-category counts for a query
    Categories {
        /// URL query string
        #[arg(default_value = "")]
        query: String,
    },

    /// Print the canonical form of a query string
    Url {
        /// URL query string
        query: String,
    },

    /// Show details of a playbook
    Show {
        /// Content ID (prefix match)
        content_id: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Facet overrides applied on top of the decoded query
#[derive(Args, Debug, Default)]
pub struct FacetArgs {
    /// Free-text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category name, or "all"
    #[arg(short, long)]
    pub category: Option<String>,

    /// Difficulty tier
    #[arg(short, long, value_enum)]
    pub difficulty: Option<DifficultyArg>,

    /// Sort order
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Tab selection
    #[arg(long, value_enum)]
    pub tab: Option<TabArg>,
}

/// Difficulty for CLI (maps to Difficulty)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DifficultyArg {
    All,
    Beginner,
    Intermediate,
    Advanced,
}

impl From<DifficultyArg> for Option<Difficulty> {
    fn from(d: DifficultyArg) -> Self {
        match d {
            DifficultyArg::All => None,
            DifficultyArg::Beginner => Some(Difficulty::Beginner),
            DifficultyArg::Intermediate => Some(Difficulty::Intermediate),
            DifficultyArg::Advanced => Some(Difficulty::Advanced),
        }
    }
}

/// Sort order for CLI (maps to SortKey)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Newest,
    Oldest,
    Popular,
    Title,
}

impl From<SortArg> for SortKey {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Newest => SortKey::Newest,
            SortArg::Oldest => SortKey::Oldest,
            SortArg::Popular => SortKey::Popular,
            SortArg::Title => SortKey::Title,
        }
    }
}

/// Tab for CLI (maps to Tab)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TabArg {
    All,
    Featured,
}

impl From<TabArg> for Tab {
    fn from(t: TabArg) -> Self {
        match t {
            TabArg::All => Tab::All,
            TabArg::Featured => Tab::Featured,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Browse {
                query,
                facets,
                json,
            } => browse(&query, facets, json).await,
            Commands::Categories { query } => show_categories(&query).await,
            Commands::Url { query } => canonical_url(&query).await,
            Commands::Show { content_id } => show_content(&content_id).await,
            Commands::Config => show_config(),
        }
    }
}

/// Fetch the configured catalog; a failed fetch is reported, not retried
async fn load_snapshot(cfg: &ResolvedConfig) -> Result<CatalogSnapshot> {
    let store = open_store(&cfg.catalog_source, cfg.browse.fetch_timeout);

    match fetch_snapshot(store.as_ref()).await {
        CatalogSnapshot::Failed(reason) => {
            anyhow::bail!("Couldn't load the catalog from {}: {}", store.name(), reason)
        }
        snapshot => Ok(snapshot),
    }
}

/// Open a session for `query` and apply flag overrides as user mutations
async fn open_session(
    query: &str,
    facets: FacetArgs,
) -> Result<BrowseSession<RecordingNavigator>> {
    let cfg = config::config()?;
    let snapshot = load_snapshot(cfg).await?;

    let mut session = BrowseSession::new(cfg.browse.codec(), RecordingNavigator::new(), query)
        .with_search_debounce(cfg.browse.search_debounce);
    session.set_snapshot(snapshot);

    if let Some(search) = facets.search {
        session.type_search(search, Instant::now());
        session.submit_search();
    }
    if let Some(category) = facets.category {
        session.set_category(&category);
    }
    if let Some(difficulty) = facets.difficulty {
        session.set_difficulty(difficulty.into());
    }
    if let Some(sort) = facets.sort {
        session.set_sort(sort.into());
    }
    if let Some(tab) = facets.tab {
        session.set_tab(tab.into());
    }

    Ok(session)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn print_items(items: &[&ContentItem]) {
    println!(
        "{:<24} {:<16} {:<13} {:>6}  {:<40}",
        "ID", "CATEGORY", "DIFFICULTY", "VIEWS", "TITLE"
    );
    println!("{}", "-".repeat(104));

    for item in items {
        let marker = if item.featured { "*" } else { " " };
        println!(
            "{:<24} {:<16} {:<13} {:>6} {}{:<40}",
            truncate(item.id.as_str(), 24),
            truncate(&item.category, 16),
            item.difficulty.as_str(),
            item.popularity,
            marker,
            truncate(&item.title, 40)
        );
    }
}

fn print_view(view: &View<'_>) {
    if view.is_no_results() {
        println!("No playbooks match. Try adjusting your filters.");
        println!("Clear filters: playbooks browse \"\"");
    } else {
        print_items(&view.items);
        println!(
            "\n{} shown ({} featured, {} regular)",
            view.total(),
            view.partition.featured.len(),
            view.partition.regular.len()
        );
    }

    println!("\nCategories:");
    for count in &view.category_counts {
        println!("  {:<24} {}", count.name, count.count);
    }

    if view.query.is_empty() {
        println!("\nQuery: (none)");
    } else {
        println!("\nQuery: ?{}", view.query);
    }
}

/// Browse the catalog
async fn browse(query: &str, facets: FacetArgs, json: bool) -> Result<()> {
    let session = open_session(query, facets).await?;
    let view = session.view();

    if json {
        let output = serde_json::to_string_pretty(&view).context("Failed to serialize view")?;
        println!("{}", output);
    } else {
        print_view(&view);
    }

    Ok(())
}

/// Show per-category counts
async fn show_categories(query: &str) -> Result<()> {
    let session = open_session(query, FacetArgs::default()).await?;
    let view = session.view();

    println!("{:<24} {:>6}", "CATEGORY", "COUNT");
    println!("{}", "-".repeat(31));
    for count in &view.category_counts {
        println!("{:<24} {:>6}", count.name, count.count);
    }
    println!("\nTotal: {}", view.category_counts.total());

    Ok(())
}

/// Print the canonical query string
async fn canonical_url(query: &str) -> Result<()> {
    let cfg = config::config()?;
    let snapshot = load_snapshot(cfg).await?;

    let canonical = cfg
        .browse
        .codec()
        .canonicalize(query, snapshot.categories());

    if canonical.is_empty() {
        println!("(empty)");
    } else {
        println!("?{}", canonical);
    }

    Ok(())
}

/// Show details of a playbook
async fn show_content(content_id: &str) -> Result<()> {
    let cfg = config::config()?;
    let snapshot = load_snapshot(cfg).await?;
    let catalog = snapshot.catalog().cloned().unwrap_or_else(Catalog::new);

    let item = catalog
        .get(&ContentId::new(content_id))
        .or_else(|| {
            catalog
                .items
                .iter()
                .find(|i| i.id.as_str().starts_with(content_id))
        })
        .ok_or_else(|| anyhow::anyhow!("Playbook not found: {}", content_id))?;

    println!("  ID:          {}", item.id);
    println!("  Title:       {}", item.title);
    println!("  Category:    {}", item.category);
    println!("  Difficulty:  {}", item.difficulty);
    println!("  Popularity:  {}", item.popularity);
    println!("  Published:   {}", item.published_at);
    println!("  Featured:    {}", if item.featured { "yes" } else { "no" });
    if !item.tags.is_empty() {
        println!("  Tags:        {}", item.tags.join(", "));
    }
    if !item.description.is_empty() {
        println!("\n{}", item.description);
    }

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("Playbooks Configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:    {}", cfg.home.display());
    println!(
        "  Catalog: {} ({})",
        cfg.catalog_source,
        if cfg.catalog_is_remote() { "remote" } else { "file" }
    );
    println!();
    println!("Browse:");
    println!("  Search debounce: {}ms", cfg.browse.search_debounce.as_millis());
    println!("  Persist tab:     {}", cfg.browse.persist_tab);
    println!("  Fetch timeout:   {}s", cfg.browse.fetch_timeout.as_secs());

    Ok(())
}
