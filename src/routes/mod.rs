// ABOUTME: Route module organization for the NutriLabel HTTP API
// ABOUTME: Combines analysis, recipe, ingredient, and health routes under one middleware stack
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the NutriLabel server
//!
//! Each domain module contains route definitions and thin handlers that
//! delegate to the analyzer or the database managers.

/// Recipe analysis route
pub mod analyze;
/// Health check and readiness routes
pub mod health;
/// Ingredient store seeding and lookup routes
pub mod ingredients;
/// Saved recipe routes
pub mod recipes;

pub use analyze::AnalyzeRoutes;
pub use health::HealthRoutes;
pub use ingredients::IngredientRoutes;
pub use recipes::RecipeRoutes;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router};
use nutrilabel_core::errors::{AppError, AppResult};

use crate::middleware;
use crate::resources::ServerResources;

/// Build the complete application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    let origins = resources.config.cors_origins.clone();

    let app = Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(AnalyzeRoutes::routes(Arc::clone(&resources)))
        .merge(RecipeRoutes::routes(Arc::clone(&resources)))
        .merge(IngredientRoutes::routes(resources));

    middleware::apply(app, &origins)
}

/// Unwrap a JSON body, turning extractor rejections into `{ "error": ... }` 400s
///
/// # Errors
///
/// Returns `InvalidInput` describing why the body could not be parsed
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
}
