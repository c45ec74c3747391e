//! # Backend Configuration
//!
//! Where the catalog lives and how the identity provider signs tokens.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FUSION_SNAPSHOT_PATH=/data/catalog.json                            │
//! │     FUSION_TOKEN_SECRET=...                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/fusioncart/backend.toml (Linux)                          │
//! │     ~/Library/Application Support/com.fusioncart.app/backend.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! snapshot_path = "/data/catalog.json"
//! restaurants_path = "restaurants"
//! menu_field = "menu"
//!
//! [identity]
//! token_secret = "change-me"
//! token_lifetime_secs = 3600
//! allow_anonymous = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{BackendError, BackendResult};
use crate::tree::split_path;

/// Secret used when none is configured. Only suitable for local runs.
pub const DEV_TOKEN_SECRET: &str = "fusioncart-dev-secret";

// =============================================================================
// Catalog Settings
// =============================================================================

/// Where restaurant and menu records live in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// JSON snapshot loaded at startup.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// Tree path holding one child per restaurant.
    #[serde(default = "default_restaurants_path")]
    pub restaurants_path: String,

    /// Child of a restaurant record holding its menu.
    #[serde(default = "default_menu_field")]
    pub menu_field: String,
}

fn default_restaurants_path() -> String {
    "restaurants".to_string()
}

fn default_menu_field() -> String {
    "menu".to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            snapshot_path: None,
            restaurants_path: default_restaurants_path(),
            menu_field: default_menu_field(),
        }
    }
}

// =============================================================================
// Identity Settings
// =============================================================================

/// Identity provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySettings {
    /// HS256 secret for ID tokens.
    #[serde(default = "default_token_secret")]
    pub token_secret: String,

    /// ID token lifetime (seconds).
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_secs: i64,

    /// Whether guests may sign in without an account.
    #[serde(default = "default_true")]
    pub allow_anonymous: bool,
}

fn default_token_secret() -> String {
    DEV_TOKEN_SECRET.to_string()
}

fn default_token_lifetime() -> i64 {
    3600
}

fn default_true() -> bool {
    true
}

impl Default for IdentitySettings {
    fn default() -> Self {
        IdentitySettings {
            token_secret: default_token_secret(),
            token_lifetime_secs: default_token_lifetime(),
            allow_anonymous: true,
        }
    }
}

// =============================================================================
// Main Backend Configuration
// =============================================================================

/// Complete backend configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub identity: IdentitySettings,
}

impl BackendConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (backend.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> BackendResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading backend config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load backend config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> BackendResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| BackendError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Backend config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> BackendResult<()> {
        split_path(&self.catalog.restaurants_path).map_err(|e| {
            BackendError::InvalidConfig(format!("restaurants_path: {}", e))
        })?;

        fusion_core::validation::validate_tree_key(&self.catalog.menu_field)
            .map_err(|e| BackendError::InvalidConfig(format!("menu_field: {}", e)))?;

        if self.identity.token_secret.is_empty() {
            return Err(BackendError::InvalidConfig(
                "token_secret must not be empty".into(),
            ));
        }

        if self.identity.token_lifetime_secs <= 0 {
            return Err(BackendError::InvalidConfig(
                "token_lifetime_secs must be greater than 0".into(),
            ));
        }

        if self.identity.token_secret == DEV_TOKEN_SECRET {
            warn!("Using the development token secret; set FUSION_TOKEN_SECRET");
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("FUSION_SNAPSHOT_PATH") {
            debug!(path = %path, "Overriding snapshot path from environment");
            self.catalog.snapshot_path = Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("FUSION_RESTAURANTS_PATH") {
            self.catalog.restaurants_path = path;
        }

        if let Ok(secret) = std::env::var("FUSION_TOKEN_SECRET") {
            debug!("Overriding token secret from environment");
            self.identity.token_secret = secret;
        }

        if let Ok(lifetime) = std::env::var("FUSION_TOKEN_LIFETIME_SECS") {
            match lifetime.parse::<i64>() {
                Ok(secs) => self.identity.token_lifetime_secs = secs,
                Err(_) => warn!(value = %lifetime, "Ignoring non-numeric FUSION_TOKEN_LIFETIME_SECS"),
            }
        }

        if let Ok(flag) = std::env::var("FUSION_ALLOW_ANONYMOUS") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.identity.allow_anonymous = true,
                "0" | "false" | "no" => self.identity.allow_anonymous = false,
                _ => warn!(value = %flag, "Unknown FUSION_ALLOW_ANONYMOUS value"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "fusioncart", "app")
            .map(|dirs| dirs.config_dir().join("backend.toml"))
    }

    /// Default location of the catalog snapshot.
    pub fn default_snapshot_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "fusioncart", "app")
            .map(|dirs| dirs.data_dir().join("catalog.json"))
    }

    /// Configured snapshot path, falling back to the platform data dir.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.catalog
            .snapshot_path
            .clone()
            .or_else(Self::default_snapshot_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BackendConfig::default();
        assert_eq!(config.catalog.restaurants_path, "restaurants");
        assert_eq!(config.catalog.menu_field, "menu");
        assert_eq!(config.identity.token_lifetime_secs, 3600);
        assert!(config.identity.allow_anonymous);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = BackendConfig::default();

        config.catalog.restaurants_path = "bad.path".into();
        assert!(config.validate().is_err());

        config.catalog.restaurants_path = "catalog/restaurants".into();
        assert!(config.validate().is_ok());

        config.catalog.menu_field = String::new();
        assert!(config.validate().is_err());

        config.catalog.menu_field = "menu".into();
        config.identity.token_lifetime_secs = 0;
        assert!(config.validate().is_err());

        config.identity.token_lifetime_secs = 60;
        config.identity.token_secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: BackendConfig = toml::from_str(
            r#"
            [identity]
            allow_anonymous = false
            "#,
        )
        .unwrap();
        assert!(!config.identity.allow_anonymous);
        assert_eq!(config.identity.token_lifetime_secs, 3600);
        assert_eq!(config.catalog.menu_field, "menu");
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("backend.toml");

        let mut config = BackendConfig::default();
        config.catalog.snapshot_path = Some(dir.path().join("catalog.json"));
        config.identity.token_secret = "file-secret".into();
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[catalog]"));
        assert!(contents.contains("[identity]"));

        let loaded: BackendConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BackendConfig::load_or_default(Some(dir.path().join("absent.toml")));
        assert_eq!(config.catalog.restaurants_path, "restaurants");
    }
}
