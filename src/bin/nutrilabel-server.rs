// ABOUTME: HTTP server binary for recipe nutrition analysis and FSSAI label checks
// ABOUTME: Loads configuration, prepares the ingredient store, and serves the axum router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # NutriLabel Server Binary
//!
//! ```bash
//! # Gemini-backed estimation
//! GEMINI_API_KEY=... cargo run --bin nutrilabel-server
//!
//! # Local model through Ollama, custom port
//! LLM_PROVIDER=ollama cargo run --bin nutrilabel-server -- --http-port 9000
//! ```

use std::future::pending;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use nutrilabel_server::config::ServerConfig;
use nutrilabel_server::database::Database;
use nutrilabel_server::logging;
use nutrilabel_server::resources::ServerResources;
use nutrilabel_server::routes;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "nutrilabel-server")]
#[command(about = "NutriLabel - recipe nutrition analysis and FSSAI compliance API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    config.validate()?;

    logging::init_from_env()?;
    info!("{}", config.summary());

    let database = Database::connect(&config.database).await?;
    prepare_ingredient_store(&database, config.database.auto_seed).await?;

    let config = Arc::new(config);
    let resources = Arc::new(ServerResources::new(database, Arc::clone(&config))?);
    let app = routes::router(resources);

    let address = format!("{}:{}", config.host, config.http_port);
    let listener = TcpListener::bind(&address).await?;
    info!(address = %address, "NutriLabel server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("NutriLabel server stopped");
    Ok(())
}

/// Seed the reference ingredients into an empty store
async fn prepare_ingredient_store(database: &Database, auto_seed: bool) -> Result<()> {
    let store = database.ingredients();
    let count = store.count().await?;
    if count > 0 {
        info!(ingredients = count, "Ingredient store ready");
    } else if auto_seed {
        let report = store.seed_defaults().await?;
        info!(inserted = report.inserted, "Seeded empty ingredient store");
    } else {
        info!("Ingredient store is empty; POST /api/seed-ingredients to populate it");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
