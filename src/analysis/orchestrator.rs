// ABOUTME: Staged nutrition analysis: ingredient store, then remote estimate, then static table
// ABOUTME: Each stage reports a tagged outcome that decides whether the pipeline stops or moves on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pipeline Orchestrator
//!
//! ```text
//! Database ──complete──▶ done (source "database")
//!    │ partial / no match / store error
//!    ▼
//! Remote ──estimate──▶ done (source "ai")
//!    │ │ zeroed + non-compliant ──▶ rejected (400)
//!    │ error / disabled
//!    ▼
//! LocalFallback ──any match──▶ done (source "local-fallback")
//!    │ nothing matched ──▶ rejected (400)
//! ```
//!
//! Stages run strictly one after another within a request.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use nutrilabel_core::constants::messages;
use nutrilabel_core::errors::{AppError, AppResult};
use nutrilabel_core::models::{AnalysisOutcome, AnalysisRequest, AnalysisSource};
use nutrilabel_intelligence::{
    aggregate, resolve_lines, total_grams, ComplianceEvaluator, IngredientResolver,
    NutritionTable,
};
use tracing::{info, instrument, warn};

use super::estimator::RemoteEstimator;

/// One strategy of the analysis pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Persistent ingredient store
    Database,
    /// Whole-recipe language model estimate
    Remote,
    /// Built-in static table
    LocalFallback,
}

impl PipelineStage {
    /// First stage of every request
    pub const FIRST: Self = Self::Database;

    /// Stage entered when this one does not finish the request
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Database => Some(Self::Remote),
            Self::Remote => Some(Self::LocalFallback),
            Self::LocalFallback => None,
        }
    }

    /// Stable name used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Remote => "remote",
            Self::LocalFallback => "local-fallback",
        }
    }
}

impl Display for PipelineStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a stage concluded
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    /// Final result; the pipeline stops here
    Complete(AnalysisOutcome),
    /// Some ingredients resolved, but not all; the pipeline moves on
    Partial(AnalysisOutcome),
    /// The backend could not be used or matched nothing; the pipeline moves on
    Unavailable(String),
    /// The input is not food; the request fails with a client error
    Rejected(String),
}

/// Runs the staged analysis for one request
#[derive(Clone)]
pub struct NutritionAnalyzer {
    store: Arc<dyn IngredientResolver>,
    estimator: Option<RemoteEstimator>,
    table: Arc<NutritionTable>,
    compliance: ComplianceEvaluator,
}

impl NutritionAnalyzer {
    /// Create an analyzer without a remote stage
    #[must_use]
    pub fn new(
        store: Arc<dyn IngredientResolver>,
        table: Arc<NutritionTable>,
        compliance: ComplianceEvaluator,
    ) -> Self {
        Self {
            store,
            estimator: None,
            table,
            compliance,
        }
    }

    /// Enable the remote estimation stage
    #[must_use]
    pub fn with_estimator(mut self, estimator: RemoteEstimator) -> Self {
        self.estimator = Some(estimator);
        self
    }

    /// Whether the remote stage is configured
    #[must_use]
    pub const fn remote_enabled(&self) -> bool {
        self.estimator.is_some()
    }

    /// Analyze a recipe
    ///
    /// # Errors
    ///
    /// Returns a client error when the request is invalid or no stage
    /// recognizes any food, and an internal error if no stage produced a result.
    #[instrument(skip(self, request), fields(ingredients = request.ingredients.len()))]
    pub async fn analyze(&self, request: &AnalysisRequest) -> AppResult<AnalysisOutcome> {
        request.validate()?;
        total_grams(&request.ingredients)?;

        let mut stage = Some(PipelineStage::FIRST);
        while let Some(current) = stage {
            match self.run_stage(current, request).await {
                StageOutcome::Complete(outcome) => {
                    info!(
                        stage = %current,
                        source = %outcome.source,
                        unmatched = outcome.unmatched_ingredients.len(),
                        "Analysis complete"
                    );
                    return Ok(outcome);
                }
                StageOutcome::Partial(outcome) => {
                    warn!(
                        stage = %current,
                        unmatched = ?outcome.unmatched_ingredients,
                        "Partial match, trying next stage"
                    );
                }
                StageOutcome::Unavailable(reason) => {
                    warn!(
                        stage = %current,
                        reason = %reason,
                        "Stage unavailable, trying next stage"
                    );
                }
                StageOutcome::Rejected(message) => {
                    info!(stage = %current, "Input rejected");
                    return Err(AppError::content_rejected(message));
                }
            }
            stage = current.next();
        }

        Err(AppError::internal("No analysis stage produced a result"))
    }

    /// Run a single stage
    pub async fn run_stage(
        &self,
        stage: PipelineStage,
        request: &AnalysisRequest,
    ) -> StageOutcome {
        match stage {
            PipelineStage::Database => self.database_stage(request).await,
            PipelineStage::Remote => self.remote_stage(request).await,
            PipelineStage::LocalFallback => self.local_stage(request).await,
        }
    }

    async fn database_stage(&self, request: &AnalysisRequest) -> StageOutcome {
        let resolved = match resolve_lines(self.store.as_ref(), &request.ingredients).await {
            Ok(resolved) => resolved,
            Err(e) => return StageOutcome::Unavailable(format!("ingredient store failed: {e}")),
        };

        let aggregation = aggregate(&resolved);
        if !aggregation.any_matched() {
            return StageOutcome::Unavailable("no ingredient found in the store".to_owned());
        }

        let outcome = aggregation.into_outcome(AnalysisSource::Database, &self.compliance);
        if outcome.is_complete() {
            StageOutcome::Complete(outcome)
        } else {
            StageOutcome::Partial(outcome)
        }
    }

    async fn remote_stage(&self, request: &AnalysisRequest) -> StageOutcome {
        let Some(estimator) = &self.estimator else {
            return StageOutcome::Unavailable("remote estimation is not configured".to_owned());
        };

        let estimate = match estimator
            .estimate(&request.ingredients, request.serving_size_g())
            .await
        {
            Ok(estimate) => estimate,
            Err(e) => return StageOutcome::Unavailable(format!("remote estimation failed: {e}")),
        };

        if estimate.is_rejection() {
            let message = if estimate.fssai_notes.is_empty() {
                messages::MODEL_REJECTED_INPUT.to_owned()
            } else {
                estimate.fssai_notes
            };
            return StageOutcome::Rejected(message);
        }

        StageOutcome::Complete(AnalysisOutcome {
            nutrition: estimate.into_profile(),
            source: AnalysisSource::Ai,
            unmatched_ingredients: Vec::new(),
        })
    }

    async fn local_stage(&self, request: &AnalysisRequest) -> StageOutcome {
        let resolved = match resolve_lines(self.table.as_ref(), &request.ingredients).await {
            Ok(resolved) => resolved,
            Err(e) => return StageOutcome::Unavailable(format!("static table failed: {e}")),
        };

        let aggregation = aggregate(&resolved);
        if !aggregation.any_matched() {
            return StageOutcome::Rejected(messages::NO_VALID_INGREDIENTS.to_owned());
        }

        StageOutcome::Complete(
            aggregation.into_outcome(AnalysisSource::LocalFallback, &self.compliance),
        )
    }
}
