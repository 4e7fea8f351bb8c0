//! Service configuration resolution
//!
//! Combines command-line overrides, environment and the TOML file into a
//! [`ServiceConfig`]. The API key follows CLI → ENV → TOML priority.

use crate::services::GeminiConfig;
use simplitab_common::config::{
    is_valid_key, TomlConfig, DEFAULT_API_BASE_URL, DEFAULT_BIND_ADDRESS, DEFAULT_MODEL,
    DEFAULT_PORT, DEFAULT_THINKING_BUDGET,
};
use simplitab_common::{Error, Result};
use std::time::Duration;
use tracing::{info, warn};

/// Primary environment variable holding the API key
pub const API_KEY_ENV: &str = "SIMPLITAB_API_KEY";

/// Fallback environment variable used by Google's own tooling
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_key: Option<String>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub model: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_address: String,
    pub port: u16,
    pub gemini: GeminiConfig,
}

impl ServiceConfig {
    pub fn resolve(cli: &CliOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let api_key = resolve_api_key(cli.api_key.as_deref(), toml_config)?;

        let gemini = GeminiConfig {
            api_key,
            model: cli
                .model
                .clone()
                .or_else(|| toml_config.model.clone())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: toml_config
                .api_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            thinking_budget: Some(toml_config.thinking_budget.unwrap_or(DEFAULT_THINKING_BUDGET)),
            timeout: toml_config.request_timeout_secs.map(Duration::from_secs),
        };

        Ok(Self {
            bind_address: cli
                .bind_address
                .clone()
                .or_else(|| toml_config.bind_address.clone())
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port: cli.port.or(toml_config.port).unwrap_or(DEFAULT_PORT),
            gemini,
        })
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Resolve the generative-service API key
///
/// **Priority:** CLI → `SIMPLITAB_API_KEY` → `GEMINI_API_KEY` → TOML
pub fn resolve_api_key(cli_key: Option<&str>, toml_config: &TomlConfig) -> Result<String> {
    let candidates = [
        ("command line", cli_key.map(str::to_string)),
        ("environment", std::env::var(API_KEY_ENV).ok()),
        ("environment", std::env::var(GEMINI_API_KEY_ENV).ok()),
        ("TOML", toml_config.gemini_api_key.clone()),
    ];

    let valid: Vec<(&str, String)> = candidates
        .into_iter()
        .filter_map(|(source, key)| key.filter(|k| is_valid_key(k)).map(|k| (source, k)))
        .collect();

    if valid.len() > 1 {
        let sources: Vec<&str> = valid.iter().map(|(source, _)| *source).collect();
        warn!(
            "API key found in multiple sources: {}. Using {} (highest priority).",
            sources.join(", "),
            sources[0]
        );
    }

    match valid.into_iter().next() {
        Some((source, key)) => {
            info!("API key loaded from {}", source);
            Ok(key.trim().to_string())
        }
        None => Err(Error::Config(format!(
            "Gemini API key not configured. Please configure using one of:\n\
             1. Command line: --api-key your-key-here\n\
             2. Environment: {}=your-key-here (or {})\n\
             3. TOML config: ~/.config/simplitab/config.toml (gemini_api_key = \"your-key\")",
            API_KEY_ENV, GEMINI_API_KEY_ENV
        ))),
    }
}
