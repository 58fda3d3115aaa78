//! Application configuration for offergen.
//!
//! User config lives at `~/.offergen/offergen.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{OffergenError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "offergen.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".offergen";

// ---------------------------------------------------------------------------
// Config structs (matching offergen.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Page fetch settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Tax-registry lookup settings.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Page load timeout in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with page requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_fetch_timeout() -> u64 {
    30
}
fn default_user_agent() -> String {
    concat!("offergen/", env!("CARGO_PKG_VERSION")).into()
}

/// `[registry]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Tax-registry lookup endpoint.
    #[serde(default = "default_registry_endpoint")]
    pub endpoint: String,

    /// Hard upper bound on one lookup; exceeding it is treated as "no record".
    #[serde(default = "default_registry_timeout")]
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_registry_endpoint(),
            timeout_secs: default_registry_timeout(),
        }
    }
}

impl RegistryConfig {
    /// Lookup timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_registry_endpoint() -> String {
    "https://www.portal.nalog.gov.by/grp/getData".into()
}
fn default_registry_timeout() -> u64 {
    5
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Record output format: "json" or "text".
    #[serde(default = "default_output_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

fn default_output_format() -> String {
    "json".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.offergen/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| OffergenError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.offergen/offergen.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| OffergenError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| OffergenError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| OffergenError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| OffergenError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| OffergenError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
