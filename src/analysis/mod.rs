// ABOUTME: Nutrition analysis pipeline combining the store, remote model, and static table
// ABOUTME: Exposes the staged analyzer, the remote estimator, and the analyze response shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Whole-recipe remote estimation
pub mod estimator;
/// Stage sequencing
pub mod orchestrator;

pub use estimator::{parse_estimate, RemoteEstimate, RemoteEstimator};
pub use orchestrator::{NutritionAnalyzer, PipelineStage, StageOutcome};

use nutrilabel_core::models::{AggregateProfile, AnalysisOutcome, AnalysisSource, NutrientProfile};
use serde::{Deserialize, Serialize};

/// Body returned by the analyze endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Per-100g aggregate with compliance verdict
    pub nutrition: AggregateProfile,
    /// Stage that produced the result
    pub source: AnalysisSource,
    /// Names the producing stage could not resolve
    pub unmatched_ingredients: Vec<String>,
    /// Serving size in grams
    pub serving_size: f64,
    /// Nutrients for one serving
    pub per_serving: NutrientProfile,
}

impl AnalysisReport {
    /// Attach the per-serving view to a pipeline outcome
    #[must_use]
    pub fn new(outcome: AnalysisOutcome, serving_size_g: f64) -> Self {
        let per_serving = outcome
            .nutrition
            .nutrients
            .scaled(serving_size_g / 100.0)
            .rounded();
        Self {
            nutrition: outcome.nutrition,
            source: outcome.source,
            unmatched_ingredients: outcome.unmatched_ingredients,
            serving_size: serving_size_g,
            per_serving,
        }
    }
}
