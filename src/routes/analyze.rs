// ABOUTME: Recipe analysis route running the staged nutrition pipeline
// ABOUTME: Client errors pass through; internal failures are logged and replaced generically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use nutrilabel_core::constants::messages;
use nutrilabel_core::errors::AppError;
use nutrilabel_core::models::AnalysisRequest;
use tracing::error;

use super::json_body;
use crate::analysis::AnalysisReport;
use crate::resources::ServerResources;

/// Analysis routes implementation
pub struct AnalyzeRoutes;

impl AnalyzeRoutes {
    /// Create the analysis routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/ai/analyze", post(Self::handle_analyze))
            .with_state(resources)
    }

    /// `POST /api/ai/analyze`
    async fn handle_analyze(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<AnalysisRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;

        let outcome = resources
            .analyzer
            .analyze(&request)
            .await
            .map_err(Self::public_error)?;

        let report = AnalysisReport::new(outcome, request.serving_size_g());
        Ok(Json(report).into_response())
    }

    fn public_error(e: AppError) -> AppError {
        if e.code.is_client_error() {
            e
        } else {
            error!(error = %e, code = ?e.code, "Recipe analysis failed");
            AppError::internal(messages::ANALYSIS_FAILED)
        }
    }
}
