// ABOUTME: Ingredient store seeding utility for the NutriLabel server
// ABOUTME: Upserts the reference ingredient set into the configured SQLite database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Ingredient seeder for the NutriLabel server.
//!
//! Usage:
//! ```bash
//! # Seed the database named by DATABASE_URL
//! cargo run --bin seed-ingredients
//!
//! # Override database URL
//! cargo run --bin seed-ingredients -- --database-url sqlite:./data/nutrilabel.db
//!
//! # Verbose output
//! cargo run --bin seed-ingredients -- -v
//! ```

use anyhow::Result;
use clap::Parser;
use nutrilabel_server::config::{DatabaseConfig, DatabaseUrl};
use nutrilabel_server::database::Database;
use std::env;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "seed-ingredients",
    about = "NutriLabel ingredient store seeder",
    long_about = "Insert or update the reference ingredients used by the database stage"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    FmtSubscriber::builder().with_max_level(level).init();

    let url = match args.database_url {
        Some(url) => url,
        None => env::var("DATABASE_URL")
            .unwrap_or_else(|_| DatabaseUrl::default().to_connection_string()),
    };
    let config = DatabaseConfig {
        url: DatabaseUrl::parse_url(&url)?,
        ..DatabaseConfig::default()
    };

    info!(database = %config.url, "Connecting to database");
    let database = Database::connect(&config).await?;

    let store = database.ingredients();
    let report = store.seed_defaults().await?;
    let stored = store.count().await?;

    println!(
        "Seeded ingredients database: {} inserted, {} updated ({} in seed set, {} stored)",
        report.inserted, report.updated, report.total, stored
    );
    Ok(())
}
