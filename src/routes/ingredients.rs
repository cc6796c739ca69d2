// ABOUTME: Ingredient store routes for seeding reference data and diagnosing name lookups
// ABOUTME: Search runs only the persistent-store tiered resolver for a single name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use nutrilabel_core::errors::AppError;
use nutrilabel_core::models::{ResolutionResult, ResolutionSource};
use nutrilabel_intelligence::MatchTier;
use serde::{Deserialize, Serialize};

use crate::resources::ServerResources;

/// Body returned after seeding
#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResponse {
    /// Always true when the seed completed
    pub success: bool,
    /// Summary of inserted and updated rows
    pub message: String,
    /// Size of the seed set
    pub total: usize,
}

/// Query parameters of the lookup diagnostic
#[derive(Debug, Default, Deserialize)]
pub struct IngredientSearchQuery {
    /// Ingredient name to resolve
    #[serde(default)]
    pub q: String,
}

/// Body of the lookup diagnostic
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSearchResponse {
    /// Name as queried
    pub query: String,
    /// Resolution result of the store backend
    #[serde(flatten)]
    pub result: ResolutionResult,
    /// Stored name that matched, if any
    pub matched_name: Option<String>,
    /// Tier that produced the match, if any
    pub tier: Option<MatchTier>,
}

/// Ingredient routes implementation
pub struct IngredientRoutes;

impl IngredientRoutes {
    /// Create the ingredient routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/seed-ingredients", post(Self::handle_seed))
            .route("/api/ingredients/search", get(Self::handle_search))
            .with_state(resources)
    }

    async fn handle_seed(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let report = resources.database.ingredients().seed_defaults().await?;

        Ok(Json(SeedResponse {
            success: true,
            message: format!(
                "Seeded ingredients database: {} inserted, {} updated",
                report.inserted, report.updated
            ),
            total: report.total,
        })
        .into_response())
    }

    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<IngredientSearchQuery>,
    ) -> Result<Response, AppError> {
        let name = query.q.trim();
        if name.is_empty() {
            return Err(AppError::missing_field("q"));
        }

        let response = match resources.database.ingredients().find(name).await? {
            Some((tier, record)) => IngredientSearchResponse {
                query: name.to_owned(),
                result: ResolutionResult::matched(
                    record.nutrition_per_100g.to_profile(),
                    ResolutionSource::Database,
                ),
                matched_name: Some(record.ingredient_name),
                tier: Some(tier),
            },
            None => IngredientSearchResponse {
                query: name.to_owned(),
                result: ResolutionResult::unmatched(),
                matched_name: None,
                tier: None,
            },
        };

        Ok(Json(response).into_response())
    }
}
