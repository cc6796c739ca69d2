// ABOUTME: Saved recipe routes for storing analyses and listing recipe history
// ABOUTME: Thin handlers over the recipes manager with owner filtering and a capped listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use nutrilabel_core::errors::AppError;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::json_body;
use crate::database::{CreateRecipeRequest, RecipeRecord};
use crate::resources::ServerResources;

/// Query parameters of the recipe listing
#[derive(Debug, Default, Deserialize)]
pub struct ListRecipesQuery {
    /// Only recipes saved with this owner label
    pub owner: Option<String>,
    /// Maximum number of recipes (capped at 50)
    pub limit: Option<u32>,
}

/// Body of a successful save
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// The stored recipe
    pub recipe: RecipeRecord,
}

/// Body of a listing
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeListResponse {
    /// Recipes, newest first
    pub recipes: Vec<RecipeRecord>,
}

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create the recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/recipes",
                post(Self::handle_create).get(Self::handle_list),
            )
            .with_state(resources)
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;
        let recipe = resources.database.recipes().create(&request).await?;

        info!(recipe_id = %recipe.id, name = %recipe.name, "Recipe saved");
        Ok((StatusCode::CREATED, Json(RecipeResponse { recipe })).into_response())
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListRecipesQuery>,
    ) -> Result<Response, AppError> {
        let owner = query
            .owner
            .as_deref()
            .map(str::trim)
            .filter(|owner| !owner.is_empty());

        let recipes = resources.database.recipes().list(owner, query.limit).await?;
        Ok(Json(RecipeListResponse { recipes }).into_response())
    }
}
