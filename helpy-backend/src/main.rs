//! Helpy backend server
//!
//! Entry point: configuration loading, state construction and HTTP server startup.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use helpy_backend::bootstrap::build_state;

mod cli;
mod tracing_setup;

use cli::CliArgs;
use tracing_setup::install_tracing_from_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = load_config(args.config_path.as_deref())?;
    install_tracing_from_config(&config.logging)?;
    tracing::info!(config_path = ?args.config_path, "configuration loaded");

    let state = build_state(&config).await?;
    let app = helpy_backend::build_router(Arc::new(state));

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "server listening"
    );

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Load and validate configuration from file (if any), defaults and environment.
fn load_config(path: Option<&str>) -> anyhow::Result<helpy_config::Config> {
    let config = match path {
        Some(p) => helpy_config::load_config(Some(p)),
        None => helpy_config::load_config::<&std::path::Path>(None),
    }
    .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?;
    helpy_config::validate_config(&config)
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    Ok(config)
}
