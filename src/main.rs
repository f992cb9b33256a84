//! Financial Formulas Server
//!
//! Builds the formula catalogue once and serves queries over HTTP.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use financial_formulas::config::DEFAULT_LOG_FILTER;
use financial_formulas::server::run_server;
use financial_formulas::{Catalogue, QueryEngine, ServerConfig};

// ──────────────────────────────────────────────────────────────────────────────
// MAIN ENTRY POINT
// ──────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    info!("Configuration: {:?}", config);

    // The catalogue is built exactly once; a failure here is fatal
    let catalogue = Arc::new(Catalogue::standard().context("Failed to build formula catalogue")?);
    info!("📚 Formulas: {} registered", catalogue.len());

    let engine = QueryEngine::new(catalogue).with_policy(config.binding);

    run_server(&config, engine).await
}
