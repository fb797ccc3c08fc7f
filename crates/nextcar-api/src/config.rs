//! # Client Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     NEXTCAR_API_URL=http://10.0.0.5:8080                               │
//! │     NEXTCAR_DB_PATH=/tmp/nextcar.db                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/nextcar/nextcar.toml (Linux)                             │
//! │     ~/Library/Application Support/com.nextcar.nextcar/nextcar.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://192.168.0.2:8080, nextcar.db in the data dir                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://192.168.0.2:8080"
//!
//! [storage]
//! database_path = "/home/ana/.local/share/nextcar/nextcar.db"
//!
//! [picker]
//! quality = 0.5
//! allows_editing = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://192.168.0.2:8080";

pub const ENV_API_URL: &str = "NEXTCAR_API_URL";
pub const ENV_DB_PATH: &str = "NEXTCAR_DB_PATH";

const CONFIG_FILE_NAME: &str = "nextcar.toml";
const DB_FILE_NAME: &str = "nextcar.db";

// =============================================================================
// Sections
// =============================================================================

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Session store file. Defaults to `nextcar.db` in the platform data dir.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

/// `[picker]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerSettings {
    /// JPEG quality requested from the picker, in `(0, 1]`.
    #[serde(default = "default_quality")]
    pub quality: f32,

    #[serde(default = "default_true")]
    pub allows_editing: bool,
}

fn default_quality() -> f32 {
    0.5
}

fn default_true() -> bool {
    true
}

impl Default for PickerSettings {
    fn default() -> Self {
        PickerSettings {
            quality: default_quality(),
            allows_editing: true,
        }
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub picker: PickerSettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (nextcar.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
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
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if !(self.picker.quality > 0.0 && self.picker.quality <= 1.0) {
            return Err(ClientError::InvalidConfig(format!(
                "picker.quality must be in (0, 1], got: {}",
                self.picker.quality
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL) {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "nextcar", "nextcar")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    /// Session store file: the configured path, else the platform data dir,
    /// else the working directory.
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().join(DB_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "http://192.168.0.2:8080");
        assert_eq!(config.picker.quality, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.api.base_url = "ws://localhost:8080".into();
        assert!(config.validate().is_err());

        config.api.base_url = "not a url".into();
        assert!(config.validate().is_err());

        config.api.base_url = "https://api.nextcar.com.br".into();
        assert!(config.validate().is_ok());

        config.picker.quality = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_URL, "http://10.0.0.5:9000"),
            (ENV_DB_PATH, "/tmp/other.db"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.base_url(), "http://10.0.0.5:9000");
        assert_eq!(config.database_path(), PathBuf::from("/tmp/other.db"));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nextcar.toml");
        std::fs::write(&path, "[picker]\nquality = 0.8\nallows_editing = false\n").unwrap();

        let config = ClientConfig::load(Some(path)).unwrap();
        assert_eq!(config.picker.quality, 0.8);
        assert!(!config.picker.allows_editing);

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[picker]\nquality = \"high\"\n").unwrap();
        assert!(matches!(
            ClientConfig::load(Some(bad)),
            Err(ClientError::ConfigLoadFailed(_))
        ));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ClientConfig = toml::from_str("[api]\n").unwrap();
        assert_eq!(config.base_url(), DEFAULT_API_URL);
        assert!(config.picker.allows_editing);
    }
}
