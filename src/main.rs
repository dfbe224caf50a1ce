// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use ai_overview_node::{
    api::{start_server, AppState},
    overview::{BatchCoordinator, OverviewConfig},
    version,
};
use anyhow::{anyhow, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// AI overview report server
#[derive(Parser, Debug)]
#[command(name = "ai-overview-node")]
#[command(version)]
#[command(about = "Serves AI overview reports for batches of search queries", long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    info!("Starting {}", version::get_version_string());

    let config = OverviewConfig::from_env();
    config.validate().map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    let coordinator = BatchCoordinator::from_config(&config).map_err(|e| anyhow!(e))?;
    if !coordinator.is_configured() {
        // Requests will fail with a configuration error until it is set
        warn!("SERP_API_KEY is not set");
    }
    let state = AppState::new(coordinator, &config);

    start_server(state, SocketAddr::new(args.host, args.port)).await
}
