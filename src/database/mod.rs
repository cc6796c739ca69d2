// ABOUTME: SQLite connection pool, schema migrations, and access to table managers
// ABOUTME: Backs the persistent ingredient store and saved recipe history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! A single `SQLite` pool holds two tables:
//!
//! - `ingredients`: the name-indexed ingredient store consulted by the pipeline
//! - `recipes`: recipes saved by callers together with their analysis

/// Persistent ingredient store
pub mod ingredients;
/// Saved recipe history
pub mod recipes;
/// Reference ingredient seed data
pub mod seed_ingredients;

pub use ingredients::{IngredientRecord, IngredientStore, SeedReport, StoredNutrition};
pub use recipes::{CreateRecipeRequest, RecipeRecord, RecipesManager};

use nutrilabel_core::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info};

use crate::config::{DatabaseConfig, DatabaseUrl};
use crate::constants::limits;

/// Database manager for ingredient and recipe storage
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database described by `config` and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        Self::open(&config.url, config.max_connections).await
    }

    /// Open a private in-memory database with migrations applied
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn in_memory() -> AppResult<Self> {
        Self::open(&DatabaseUrl::Memory, 1).await
    }

    /// Open `url` with a pool of up to `max_connections`
    ///
    /// In-memory databases are limited to one long-lived connection, since each
    /// `SQLite` memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn open(url: &DatabaseUrl, max_connections: u32) -> AppResult<Self> {
        if let DatabaseUrl::SQLite { path } = url {
            ensure_parent_dir(path).await?;
        }

        let options = SqliteConnectOptions::from_str(&url.to_connection_string())?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(limits::DATABASE_ACQUIRE_TIMEOUT_SECS));
        let pool_options = if url.is_memory() {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        info!(database = %url, "Database connection established");

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Ingredient store backed by this database
    #[must_use]
    pub fn ingredients(&self) -> IngredientStore {
        IngredientStore::new(self.pool.clone())
    }

    /// Recipe history backed by this database
    #[must_use]
    pub fn recipes(&self) -> RecipesManager {
        RecipesManager::new(self.pool.clone())
    }

    /// Check that the database answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_ingredients().await?;
        self.migrate_recipes().await?;
        debug!("Database migrations complete");
        Ok(())
    }

    async fn migrate_ingredients(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ingredient_name TEXT NOT NULL,
                name_key TEXT NOT NULL UNIQUE,
                energy_kcal REAL NOT NULL DEFAULT 0,
                protein_g REAL NOT NULL DEFAULT 0,
                carbohydrates_g REAL NOT NULL DEFAULT 0,
                total_sugars_g REAL NOT NULL DEFAULT 0,
                added_sugars_g REAL NOT NULL DEFAULT 0,
                total_fat_g REAL NOT NULL DEFAULT 0,
                saturated_fat_g REAL NOT NULL DEFAULT 0,
                trans_fat_g REAL NOT NULL DEFAULT 0,
                cholesterol_mg REAL NOT NULL DEFAULT 0,
                sodium_mg REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create ingredients table: {e}")))?;

        Ok(())
    }

    async fn migrate_recipes(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                owner TEXT,
                name TEXT NOT NULL,
                serving_size REAL NOT NULL,
                ingredients TEXT NOT NULL,
                nutrition TEXT,
                fssai_compliant INTEGER,
                source TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipes table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recipes_owner_created ON recipes(owner, created_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipes index: {e}")))?;

        Ok(())
    }
}

/// Create the directory holding a database file if it is missing
async fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::database(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })
        }
        _ => Ok(()),
    }
}
