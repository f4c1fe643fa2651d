mod api_client;
mod app;
mod cli;
mod config;
mod errors;
mod evaluation;
mod models;
mod render;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (.env is honored if present)
    let config = Config::from_env()?;

    // Initialize structured logging
    let default_level = if cli.verbose { "debug" } else { config.rust_log.as_str() };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), default_level))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Tailor v{}, backend {}", env!("CARGO_PKG_VERSION"), config.api_base_url);

    app::run(cli, config).await
}
