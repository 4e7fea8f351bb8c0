//! Configuration loading
//!
//! SimpliTab reads an optional TOML file. Every field is optional; values not
//! present fall back to the compiled defaults below. A missing file is not an
//! error (warning + defaults), a malformed file is.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "SIMPLITAB_CONFIG";

/// Default generative model
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Default generative service base URL
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default listen address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

/// Default listen port
pub const DEFAULT_PORT: u16 = 5740;

/// Default reasoning token budget requested from the model
pub const DEFAULT_THINKING_BUDGET: u32 = 2500;

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Credential for the generative service
    pub gemini_api_key: Option<String>,
    /// Model name, e.g. "gemini-3-pro-preview"
    pub model: Option<String>,
    /// Base URL of the generative service (overridable for testing/proxies)
    pub api_base_url: Option<String>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub thinking_budget: Option<u32>,
    /// Outbound request timeout; unset means no timeout
    pub request_timeout_secs: Option<u64>,
    pub logging: LoggingConfig,
}

/// `[logging]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter directive (RUST_LOG still wins)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Platform config file location: `<config dir>/simplitab/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("simplitab").join("config.toml"))
}

/// Resolve which config file to read
///
/// Priority order:
/// 1. Command-line argument
/// 2. `SIMPLITAB_CONFIG` environment variable
/// 3. Platform default location
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path()
}

/// Load a TOML config file
///
/// A missing file yields `TomlConfig::default()`; unreadable or malformed
/// files are reported as `Error::Config`.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(
            "Config file {} not found, using compiled defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;

    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Validate a credential value (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
