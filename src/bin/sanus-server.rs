// ABOUTME: Sanus nutrition API server binary
// ABOUTME: Loads configuration, opens the database and serves the REST API until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

//! # Sanus Server Binary
//!
//! Starts the nutrition API with environment configuration. Command-line
//! flags override the port and database location.

use anyhow::{Context, Result};
use clap::Parser;
use sanus_server::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
    middleware::build_app,
    resources::ServerResources,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "sanus-server")]
#[command(about = "Sanus nutrition API - food search, daily values and consumption ledger")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. `sqlite:./data/sanus.db`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database = DatabaseUrl::parse_url(&database_url);
    }

    logging::init_from_env()?;
    info!("Starting Sanus nutrition API");
    info!("{}", config.summary());

    sanus_providers::initialize_shared_client(
        config.http_client.timeout_secs,
        config.http_client.connect_timeout_secs,
    );

    let database = Database::new(&config.database).await?;
    let config = Arc::new(config);
    let resources = Arc::new(ServerResources::from_config(database, Arc::clone(&config)));
    let app = build_app(&resources);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(address = %address, "HTTP server listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "HTTP server error");
        return Err(e.into());
    }

    info!("Sanus nutrition API stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
