// ABOUTME: Persistent ingredient store with tiered case-insensitive name lookup
// ABOUTME: Implements the database ingredient backend and the seed upsert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::Utc;
use nutrilabel_core::errors::{AppError, AppResult};
use nutrilabel_core::models::{NutrientProfile, ResolutionResult, ResolutionSource};
use nutrilabel_intelligence::matching::{normalize_name, query_plan, MatchTier, NameQuery};
use nutrilabel_intelligence::IngredientResolver;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use super::seed_ingredients::{SeedIngredient, SEED_INGREDIENTS};

const SELECT_COLUMNS: &str = "id, ingredient_name, energy_kcal, protein_g, carbohydrates_g, \
     total_sugars_g, added_sugars_g, total_fat_g, saturated_fat_g, trans_fat_g, \
     cholesterol_mg, sodium_mg, created_at, updated_at";

/// Per-100g values as stored in the `ingredients` table
///
/// The store has no fiber column.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StoredNutrition {
    /// Energy (kcal)
    pub energy_kcal: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Carbohydrates (g)
    pub carbohydrates_g: f64,
    /// Total sugars (g)
    pub total_sugars_g: f64,
    /// Added sugars (g)
    pub added_sugars_g: f64,
    /// Total fat (g)
    pub total_fat_g: f64,
    /// Saturated fat (g)
    pub saturated_fat_g: f64,
    /// Trans fat (g)
    pub trans_fat_g: f64,
    /// Cholesterol (mg)
    pub cholesterol_mg: f64,
    /// Sodium (mg)
    pub sodium_mg: f64,
}

impl StoredNutrition {
    /// Convert to the pipeline's nutrient profile
    ///
    /// Fiber is always 0 because the store does not record it.
    #[must_use]
    pub fn to_profile(&self) -> NutrientProfile {
        NutrientProfile {
            calories: self.energy_kcal,
            protein: self.protein_g,
            fat: self.total_fat_g,
            saturated_fat: self.saturated_fat_g,
            carbohydrates: self.carbohydrates_g,
            sugar: self.total_sugars_g,
            sodium: self.sodium_mg,
            fiber: 0.0,
        }
        .sanitized()
    }
}

/// One row of the ingredient store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRecord {
    /// Row id (insertion order)
    pub id: i64,
    /// Display name
    pub ingredient_name: String,
    /// Per-100g values
    pub nutrition_per_100g: StoredNutrition,
    /// RFC 3339 creation time
    pub created_at: String,
    /// RFC 3339 last update time
    pub updated_at: String,
}

/// Outcome of a seed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    /// Rows created
    pub inserted: usize,
    /// Existing rows whose values were replaced
    pub updated: usize,
    /// Size of the seed set
    pub total: usize,
}

/// Ingredient store database operations
#[derive(Clone)]
pub struct IngredientStore {
    pool: SqlitePool,
}

impl IngredientStore {
    /// Create a new ingredient store
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Tiered lookup: exact name, then substring, then each word of 3+ characters
    ///
    /// Fragments are matched literally. Within a tier the earliest inserted row wins.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn find(&self, name: &str) -> AppResult<Option<(MatchTier, IngredientRecord)>> {
        for query in query_plan(name) {
            if let Some(record) = self.find_one(&query).await? {
                debug!(
                    ingredient = %name,
                    matched = %record.ingredient_name,
                    tier = ?query.tier,
                    "ingredient store hit"
                );
                return Ok(Some((query.tier, record)));
            }
        }
        Ok(None)
    }

    async fn find_one(&self, query: &NameQuery) -> AppResult<Option<IngredientRecord>> {
        let predicate = match query.tier {
            MatchTier::Exact => "name_key = ?1",
            MatchTier::Substring | MatchTier::Word => "instr(name_key, ?1) > 0",
        };
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM ingredients WHERE {predicate} ORDER BY id LIMIT 1"
        );

        let row = sqlx::query(&sql)
            .bind(&query.fragment)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to query ingredients: {e}")))?;

        row.map(|r| row_to_record(&r)).transpose()
    }

    /// Get an ingredient by exact (case-insensitive) name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_by_name(&self, name: &str) -> AppResult<Option<IngredientRecord>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM ingredients WHERE name_key = ?1"
        );
        let row = sqlx::query(&sql)
            .bind(normalize_name(name))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get ingredient: {e}")))?;

        row.map(|r| row_to_record(&r)).transpose()
    }

    /// Insert or replace the values of an ingredient
    ///
    /// Names are keyed by [`normalize_name`], so case variants (including
    /// non-ASCII letters) update the existing row and keep its display name.
    /// Returns `true` when a new row was created.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the write fails
    pub async fn upsert(&self, name: &str, nutrition: &StoredNutrition) -> AppResult<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::missing_field("ingredient_name"));
        }

        let now = Utc::now().to_rfc3339();
        let row = sqlx::query(
            r"
            INSERT INTO ingredients (
                ingredient_name, name_key, energy_kcal, protein_g, carbohydrates_g,
                total_sugars_g, added_sugars_g, total_fat_g, saturated_fat_g,
                trans_fat_g, cholesterol_mg, sodium_mg, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)
            ON CONFLICT(name_key) DO UPDATE SET
                energy_kcal = excluded.energy_kcal,
                protein_g = excluded.protein_g,
                carbohydrates_g = excluded.carbohydrates_g,
                total_sugars_g = excluded.total_sugars_g,
                added_sugars_g = excluded.added_sugars_g,
                total_fat_g = excluded.total_fat_g,
                saturated_fat_g = excluded.saturated_fat_g,
                trans_fat_g = excluded.trans_fat_g,
                cholesterol_mg = excluded.cholesterol_mg,
                sodium_mg = excluded.sodium_mg,
                updated_at = excluded.updated_at
            RETURNING created_at
            ",
        )
        .bind(name)
        .bind(normalize_name(name))
        .bind(nutrition.energy_kcal)
        .bind(nutrition.protein_g)
        .bind(nutrition.carbohydrates_g)
        .bind(nutrition.total_sugars_g)
        .bind(nutrition.added_sugars_g)
        .bind(nutrition.total_fat_g)
        .bind(nutrition.saturated_fat_g)
        .bind(nutrition.trans_fat_g)
        .bind(nutrition.cholesterol_mg)
        .bind(nutrition.sodium_mg)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert ingredient: {e}")))?;

        // An updated row keeps its original creation time
        let created_at: String = row.try_get("created_at")?;
        Ok(created_at == now)
    }

    /// Upsert every item of `items`
    ///
    /// # Errors
    ///
    /// Returns an error on the first failed write
    pub async fn seed_with(&self, items: &[SeedIngredient]) -> AppResult<SeedReport> {
        let mut report = SeedReport {
            inserted: 0,
            updated: 0,
            total: items.len(),
        };

        for item in items {
            if self.upsert(item.name, &item.nutrition).await? {
                report.inserted += 1;
            } else {
                report.updated += 1;
            }
        }

        info!(
            inserted = report.inserted,
            updated = report.updated,
            total = report.total,
            "Seeded ingredient store"
        );
        Ok(report)
    }

    /// Upsert the reference seed set
    ///
    /// # Errors
    ///
    /// Returns an error on the first failed write
    pub async fn seed_defaults(&self) -> AppResult<SeedReport> {
        self.seed_with(SEED_INGREDIENTS).await
    }

    /// Number of stored ingredients
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM ingredients")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count ingredients: {e}")))?;
        Ok(row.try_get("total")?)
    }
}

#[async_trait]
impl IngredientResolver for IngredientStore {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Database
    }

    async fn resolve(&self, name: &str) -> AppResult<ResolutionResult> {
        Ok(self.find(name).await?.map_or_else(ResolutionResult::unmatched, |(_, record)| {
            ResolutionResult::matched(
                record.nutrition_per_100g.to_profile(),
                ResolutionSource::Database,
            )
        }))
    }
}

fn row_to_record(row: &SqliteRow) -> AppResult<IngredientRecord> {
    Ok(IngredientRecord {
        id: row.try_get("id")?,
        ingredient_name: row.try_get("ingredient_name")?,
        nutrition_per_100g: StoredNutrition {
            energy_kcal: row.try_get("energy_kcal")?,
            protein_g: row.try_get("protein_g")?,
            carbohydrates_g: row.try_get("carbohydrates_g")?,
            total_sugars_g: row.try_get("total_sugars_g")?,
            added_sugars_g: row.try_get("added_sugars_g")?,
            total_fat_g: row.try_get("total_fat_g")?,
            saturated_fat_g: row.try_get("saturated_fat_g")?,
            trans_fat_g: row.try_get("trans_fat_g")?,
            cholesterol_mg: row.try_get("cholesterol_mg")?,
            sodium_mg: row.try_get("sodium_mg")?,
        },
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
