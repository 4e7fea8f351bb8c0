//! simplitab - Beginner guitar riff simplifier
//!
//! Serves the web UI and forwards each submission to the Gemini
//! `generateContent` API.

use anyhow::Result;
use clap::Parser;
use simplitab::config::{CliOverrides, ServiceConfig};
use simplitab::services::GeminiClient;
use simplitab::{build_router, AppState};
use simplitab_common::config::{load_toml_config, resolve_config_path, TomlConfig};
use simplitab_common::events::EventBus;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "simplitab", version, about = "Beginner guitar riff simplifier")]
struct Args {
    /// Path to config.toml (default: <config dir>/simplitab/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Gemini API key (overrides environment and config file)
    #[arg(long)]
    api_key: Option<String>,

    /// Listen address
    #[arg(long, env = "SIMPLITAB_BIND")]
    bind: Option<String>,

    /// Listen port
    #[arg(long, env = "SIMPLITAB_PORT")]
    port: Option<u16>,

    /// Gemini model name
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing starts so its log level can seed the filter
    let config_path = resolve_config_path(args.config.as_deref());
    let toml_result = match &config_path {
        Some(path) => load_toml_config(path),
        None => Ok(TomlConfig::default()),
    };
    let log_level = toml_result
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    info!(
        "Starting SimpliTab v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let toml_config = toml_result?;
    if let Some(path) = &config_path {
        info!("Config file: {}", path.display());
    }

    let cli = CliOverrides {
        api_key: args.api_key,
        bind_address: args.bind,
        port: args.port,
        model: args.model,
    };
    let config = ServiceConfig::resolve(&cli, &toml_config)?;

    let client = GeminiClient::new(config.gemini.clone())?;
    info!("Generative model: {}", client.model());

    let event_bus = EventBus::new(100);
    let state = AppState::new(Arc::new(client), event_bus);
    let app = build_router(state);

    let address = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
