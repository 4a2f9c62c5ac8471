//! Configuration for the playbook browser.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (PLAYBOOKS_HOME, PLAYBOOKS_CATALOG)
//! 2. Config file (.playbooks/config.yaml)
//! 3. Defaults (~/.playbooks, ~/.playbooks/catalog.json)
//!
//! Config file discovery:
//! - Searches current directory and parents for .playbooks/config.yaml
//! - Relative catalog paths are resolved against the project root
//!   (the parent of .playbooks/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::is_remote_source;
use crate::query::debounce::{clamp_delay, DEFAULT_DEBOUNCE};
use crate::query::QueryCodec;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file (relative to project root) or http(s) URL
    pub source: Option<String>,
    /// HTTP fetch timeout
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowseConfig {
    pub search_debounce_ms: Option<u64>,
    pub persist_tab: Option<bool>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to playbooks home
    pub home: PathBuf,
    /// Catalog source: absolute path or URL
    pub catalog_source: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Browse settings
    pub browse: BrowseSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseSettings {
    pub search_debounce: Duration,
    pub persist_tab: bool,
    pub fetch_timeout: Duration,
}

impl Default for BrowseSettings {
    fn default() -> Self {
        Self {
            search_debounce: DEFAULT_DEBOUNCE,
            persist_tab: false,
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

impl BrowseSettings {
    /// Query codec matching these settings
    pub fn codec(&self) -> QueryCodec {
        QueryCodec::with_tab_persistence(self.persist_tab)
    }
}

impl ResolvedConfig {
    /// Whether the catalog is fetched over HTTP
    pub fn catalog_is_remote(&self) -> bool {
        is_remote_source(&self.catalog_source)
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".playbooks").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a catalog source that may be relative to the project root
fn resolve_source(base: &Path, source: &str) -> String {
    if is_remote_source(source) {
        return source.to_string();
    }

    let path = PathBuf::from(source);
    if path.is_absolute() {
        source.to_string()
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(source))
            .display()
            .to_string()
    }
}

/// Merge file settings over defaults
fn browse_settings(config: &ConfigFile) -> BrowseSettings {
    let defaults = BrowseSettings::default();

    BrowseSettings {
        search_debounce: config
            .browse
            .search_debounce_ms
            .map(|ms| clamp_delay(Duration::from_millis(ms)))
            .unwrap_or(defaults.search_debounce),
        persist_tab: config.browse.persist_tab.unwrap_or(defaults.persist_tab),
        fetch_timeout: config
            .catalog
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(defaults.fetch_timeout),
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let home = match std::env::var("PLAYBOOKS_HOME") {
        Ok(env_home) => PathBuf::from(env_home),
        Err(_) => dirs::home_dir()
            .context("Failed to determine home directory")?
            .join(".playbooks"),
    };

    let config_file = find_config_file();

    let (file_source, browse) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Project root is the parent of .playbooks/
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        let source = config
            .catalog
            .source
            .as_deref()
            .map(|s| resolve_source(base_dir, s));

        (source, browse_settings(&config))
    } else {
        (None, BrowseSettings::default())
    };

    let catalog_source = std::env::var("PLAYBOOKS_CATALOG")
        .ok()
        .or(file_source)
        .unwrap_or_else(|| home.join("catalog.json").display().to_string());

    Ok(ResolvedConfig {
        home,
        catalog_source,
        config_file,
        browse,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let playbooks_dir = temp.path().join(".playbooks");
        std::fs::create_dir_all(&playbooks_dir).unwrap();

        let config_path = playbooks_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
catalog:
  source: ./content/catalog.json
  timeout_seconds: 3
browse:
  search_debounce_ms: 250
  persist_tab: true
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(
            config.catalog.source,
            Some("./content/catalog.json".to_string())
        );

        let browse = browse_settings(&config);
        assert_eq!(browse.search_debounce, Duration::from_millis(250));
        assert_eq!(browse.fetch_timeout, Duration::from_secs(3));
        assert!(browse.persist_tab);
        assert!(browse.codec().persists_tab());
    }

    #[test]
    fn test_debounce_is_clamped() {
        let config: ConfigFile = serde_yaml::from_str(
            r#"
version: "1.0"
browse:
  search_debounce_ms: 5
"#,
        )
        .unwrap();

        let browse = browse_settings(&config);
        assert_eq!(browse.search_debounce, Duration::from_millis(150));
        assert!(!browse.persist_tab);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: ConfigFile = serde_yaml::from_str("version: \"1.0\"").unwrap();
        assert_eq!(browse_settings(&config), BrowseSettings::default());
        assert!(config.catalog.source.is_none());
    }

    #[test]
    fn test_resolve_source() {
        let base = PathBuf::from("/home/user/site");

        assert_eq!(
            resolve_source(&base, "./content/catalog.json"),
            "/home/user/site/./content/catalog.json"
        );
        assert_eq!(
            resolve_source(&base, "/srv/catalog.json"),
            "/srv/catalog.json"
        );
        assert_eq!(
            resolve_source(&base, "https://cdn.example.com/catalog.json"),
            "https://cdn.example.com/catalog.json"
        );
    }
}
