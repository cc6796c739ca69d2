// ABOUTME: Database operations for saved recipes and their nutrition analysis
// ABOUTME: Stores ingredient lines and the aggregate profile as JSON columns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use nutrilabel_core::constants::{DEFAULT_SERVING_SIZE_G, MAX_RECIPE_LIST_LIMIT};
use nutrilabel_core::errors::{AppError, AppResult};
use nutrilabel_core::models::{AggregateProfile, AnalysisSource, IngredientLine};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// A saved recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    /// Unique recipe ID
    pub id: Uuid,
    /// Caller-supplied owner label, if any
    pub owner: Option<String>,
    /// Recipe name
    pub name: String,
    /// Serving size in grams
    pub serving_size: f64,
    /// Ingredient lines as submitted
    pub ingredients: Vec<IngredientLine>,
    /// Aggregate analysis saved with the recipe
    pub nutrition: Option<AggregateProfile>,
    /// Compliance flag saved with the recipe
    pub fssai_compliant: Option<bool>,
    /// Which stage produced `nutrition`
    pub source: Option<AnalysisSource>,
    /// When the recipe was saved
    pub created_at: DateTime<Utc>,
}

/// Request to save a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    /// Recipe name
    #[serde(default)]
    pub name: String,
    /// Optional owner label
    #[serde(default)]
    pub owner: Option<String>,
    /// Serving size in grams (defaults to 100)
    #[serde(default)]
    pub serving_size: Option<f64>,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
    /// Aggregate analysis to store alongside
    #[serde(default)]
    pub nutrition: Option<AggregateProfile>,
    /// Compliance flag (taken from `nutrition` when omitted)
    #[serde(default)]
    pub fssai_compliant: Option<bool>,
    /// Provenance of `nutrition`
    #[serde(default)]
    pub source: Option<AnalysisSource>,
}

impl CreateRecipeRequest {
    /// Check required fields
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, the ingredient list is empty,
    /// or the serving size is not a positive number
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }
        if self.ingredients.is_empty() {
            return Err(AppError::missing_field("ingredients"));
        }
        if let Some(size) = self.serving_size {
            if !size.is_finite() || size <= 0.0 {
                return Err(AppError::invalid_input(
                    "servingSize must be a positive number of grams",
                ));
            }
        }
        Ok(())
    }
}

/// Recipe history database operations
#[derive(Clone)]
pub struct RecipesManager {
    pool: SqlitePool,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Save a recipe
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the insert fails
    pub async fn create(&self, request: &CreateRecipeRequest) -> AppResult<RecipeRecord> {
        request.validate()?;

        let now = Utc::now();
        let id = Uuid::new_v4();
        let serving_size = request.serving_size.unwrap_or(DEFAULT_SERVING_SIZE_G);
        let fssai_compliant = request
            .fssai_compliant
            .or_else(|| request.nutrition.as_ref().map(|n| n.fssai_compliant));
        let owner = request
            .owner
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(ToOwned::to_owned);

        let ingredients_json = serde_json::to_string(&request.ingredients)?;
        let nutrition_json = request
            .nutrition
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r"
            INSERT INTO recipes (
                id, owner, name, serving_size, ingredients, nutrition,
                fssai_compliant, source, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(id.to_string())
        .bind(&owner)
        .bind(request.name.trim())
        .bind(serving_size)
        .bind(&ingredients_json)
        .bind(&nutrition_json)
        .bind(fssai_compliant)
        .bind(request.source.as_ref().map(AnalysisSource::as_str))
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;

        Ok(RecipeRecord {
            id,
            owner,
            name: request.name.trim().to_owned(),
            serving_size,
            ingredients: request.ingredients.clone(),
            nutrition: request.nutrition.clone(),
            fssai_compliant,
            source: request.source,
            created_at: now,
        })
    }

    /// List saved recipes, newest first
    ///
    /// `limit` is clamped to `1..=50`; `None` means 50.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row cannot be decoded
    pub async fn list(
        &self,
        owner: Option<&str>,
        limit: Option<u32>,
    ) -> AppResult<Vec<RecipeRecord>> {
        let limit = limit
            .unwrap_or(MAX_RECIPE_LIST_LIMIT)
            .clamp(1, MAX_RECIPE_LIST_LIMIT);

        let rows = sqlx::query(
            r"
            SELECT id, owner, name, serving_size, ingredients, nutrition,
                   fssai_compliant, source, created_at
            FROM recipes
            WHERE ($1 IS NULL OR owner = $1)
            ORDER BY created_at DESC, rowid DESC
            LIMIT $2
            ",
        )
        .bind(owner)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        rows.iter().map(row_to_recipe).collect()
    }

    /// Get a recipe by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get(&self, id: Uuid) -> AppResult<Option<RecipeRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, owner, name, serving_size, ingredients, nutrition,
                   fssai_compliant, source, created_at
            FROM recipes WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        row.as_ref().map(row_to_recipe).transpose()
    }
}

fn row_to_recipe(row: &SqliteRow) -> AppResult<RecipeRecord> {
    let id_str: String = row.try_get("id")?;
    let ingredients_json: String = row.try_get("ingredients")?;
    let nutrition_json: Option<String> = row.try_get("nutrition")?;
    let source_str: Option<String> = row.try_get("source")?;
    let created_at_str: String = row.try_get("created_at")?;

    Ok(RecipeRecord {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        owner: row.try_get("owner")?,
        name: row.try_get("name")?,
        serving_size: row.try_get("serving_size")?,
        ingredients: serde_json::from_str(&ingredients_json)?,
        nutrition: nutrition_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?,
        fssai_compliant: row.try_get("fssai_compliant")?,
        source: source_str.as_deref().and_then(AnalysisSource::parse),
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| AppError::internal(format!("Invalid timestamp: {e}")))?
            .with_timezone(&Utc),
    })
}
