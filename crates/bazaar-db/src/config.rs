//! # Catalog Configuration
//!
//! Where the product database lives and how catalog pages are sized.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BAZAAR_DATABASE_PATH=/srv/bazaar/catalog.db                        │
//! │     BAZAAR_MAX_CONNECTIONS=5                                           │
//! │     BAZAAR_PAGE_SIZE=10                                                │
//! │     BAZAAR_MAX_PAGE_SIZE=100                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/bazaar/bazaar.toml (Linux)                               │
//! │     ~/Library/Application Support/com.bazaar.catalog/bazaar.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     platform data dir, 5 connections, 10 per page, 100 max             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # bazaar.toml
//! [database]
//! path = "/srv/bazaar/catalog.db"
//! max_connections = 5
//!
//! [catalog]
//! page_size = 10
//! max_page_size = 100
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use crate::pool::DbConfig;

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but couldn't be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`CatalogConfig`].
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value was present but unusable.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. `None` means the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
        }
    }
}

/// `[catalog]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Products per page when the caller doesn't ask for a size.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Largest page a caller may request.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

// =============================================================================
// Catalog Configuration
// =============================================================================

/// Complete configuration for the product store and catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl CatalogConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`bazaar.toml`), if it exists
    /// 3. `BAZAAR_*` environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading catalog config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Missing sections and keys take their defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `BAZAAR_*` overrides read through `lookup`.
    ///
    /// Unparsable numbers are reported, not skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("BAZAAR_DATABASE_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup("BAZAAR_MAX_CONNECTIONS") {
            self.database.max_connections = parse_count("BAZAAR_MAX_CONNECTIONS", &raw)?;
        }

        if let Some(raw) = lookup("BAZAAR_PAGE_SIZE") {
            self.catalog.page_size = parse_count("BAZAAR_PAGE_SIZE", &raw)?;
        }

        if let Some(raw) = lookup("BAZAAR_MAX_PAGE_SIZE") {
            self.catalog.max_page_size = parse_count("BAZAAR_MAX_PAGE_SIZE", &raw)?;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::invalid(
                "database.max_connections",
                "must be greater than 0",
            ));
        }

        if self.catalog.page_size == 0 {
            return Err(ConfigError::invalid("catalog.page_size", "must be greater than 0"));
        }

        if self.catalog.max_page_size == 0 {
            return Err(ConfigError::invalid(
                "catalog.max_page_size",
                "must be greater than 0",
            ));
        }

        if self.catalog.page_size > self.catalog.max_page_size {
            return Err(ConfigError::invalid(
                "catalog.page_size",
                format!(
                    "{} exceeds max_page_size {}",
                    self.catalog.page_size, self.catalog.max_page_size
                ),
            ));
        }

        Ok(())
    }

    /// Returns the database file path, falling back to the platform data dir.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.bazaar.catalog/bazaar.db`
    /// - **Windows**: `%APPDATA%\bazaar\catalog\data\bazaar.db`
    /// - **Linux**: `~/.local/share/catalog/bazaar.db`
    pub fn database_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().join("bazaar.db")))
            .unwrap_or_else(|| PathBuf::from("bazaar.db"))
    }

    /// Builds the pool configuration for [`crate::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path()).max_connections(self.database.max_connections)
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("bazaar.toml"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "bazaar", "catalog")
    }
}

fn parse_count(key: &str, raw: &str) -> ConfigResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| ConfigError::invalid(key, format!("'{}' is not a count: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.catalog.page_size, 10);
        assert_eq!(config.catalog.max_page_size, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CatalogConfig::from_toml(
            r#"
            [catalog]
            page_size = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.page_size, 25);
        assert_eq!(config.catalog.max_page_size, 100);
        assert_eq!(config.database, DatabaseSettings::default());
    }

    #[test]
    fn test_full_toml() {
        let config = CatalogConfig::from_toml(
            r#"
            [database]
            path = "/srv/bazaar/catalog.db"
            max_connections = 8

            [catalog]
            page_size = 20
            max_page_size = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.database_path(), PathBuf::from("/srv/bazaar/catalog.db"));
        assert_eq!(config.db_config().max_connections, 8);
        assert_eq!(config.catalog.max_page_size, 50);
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = CatalogConfig::from_toml("[catalog]\npage_size = \"ten\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = CatalogConfig::default();
        config
            .apply_overrides(env(&[
                ("BAZAAR_DATABASE_PATH", "/tmp/bazaar-test.db"),
                ("BAZAAR_PAGE_SIZE", " 30 "),
                ("BAZAAR_MAX_PAGE_SIZE", "60"),
            ]))
            .unwrap();

        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/bazaar-test.db")));
        assert_eq!(config.catalog.page_size, 30);
        assert_eq!(config.catalog.max_page_size, 60);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_unparsable_env_is_rejected() {
        let mut config = CatalogConfig::default();
        let err = config
            .apply_overrides(env(&[("BAZAAR_MAX_CONNECTIONS", "lots")]))
            .unwrap_err();

        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "BAZAAR_MAX_CONNECTIONS"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validation() {
        let mut config = CatalogConfig::default();

        config.catalog.page_size = 0;
        assert!(config.validate().is_err());

        config.catalog.page_size = 200;
        assert!(config.validate().is_err());

        config.catalog.page_size = 100;
        assert!(config.validate().is_ok());

        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("bazaar-config-that-does-not-exist.toml");
        let config = CatalogConfig::load(Some(path)).unwrap();
        assert_eq!(config.catalog, CatalogSettings::default());
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!("bazaar-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[catalog]\npage_size = 7\n").unwrap();

        let config = CatalogConfig::load(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.catalog.page_size, 7);
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&CatalogConfig::default()).unwrap();
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[catalog]"));
    }
}
