// ABOUTME: Shared data models for the nutrition resolution pipeline
// ABOUTME: Re-exports nutrient profiles, ingredient lines, and analysis results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod analysis;
mod nutrition;

pub use analysis::{
    AggregateProfile, AnalysisOutcome, AnalysisRequest, AnalysisSource, ResolutionResult,
    ResolutionSource,
};
pub use nutrition::{IngredientLine, NutrientProfile};
