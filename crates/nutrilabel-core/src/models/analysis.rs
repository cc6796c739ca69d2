// ABOUTME: Resolution and analysis result models shared by the pipeline stages
// ABOUTME: Includes the analyze request payload and its validation rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use super::nutrition::{IngredientLine, NutrientProfile};
use crate::constants::DEFAULT_SERVING_SIZE_G;
use crate::errors::{AppError, AppResult};

/// Where a single ingredient's profile came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// Remote language-model estimate
    Remote,
    /// Persistent ingredient store
    Database,
    /// Built-in static nutrition table
    Static,
    /// No backend produced a match
    Unmatched,
}

/// Outcome of resolving one ingredient name
///
/// Built through [`ResolutionResult::matched`] or [`ResolutionResult::unmatched`],
/// which keep `matched` true exactly when `profile` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Per-100g profile when matched
    pub profile: Option<NutrientProfile>,
    /// Whether a backend recognized the name
    pub matched: bool,
    /// Backend that produced the profile
    pub source: ResolutionSource,
}

impl ResolutionResult {
    /// A successful match from `source`
    #[must_use]
    pub fn matched(profile: NutrientProfile, source: ResolutionSource) -> Self {
        Self {
            profile: Some(profile.sanitized()),
            matched: true,
            source,
        }
    }

    /// No backend recognized the name
    #[must_use]
    pub const fn unmatched() -> Self {
        Self {
            profile: None,
            matched: false,
            source: ResolutionSource::Unmatched,
        }
    }

    /// Whether a profile was found
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        self.matched && self.profile.is_some()
    }
}

/// Normalized per-100g nutrition of a whole recipe plus compliance verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateProfile {
    /// Per-100g nutrient values, rounded to one decimal
    #[serde(flatten)]
    pub nutrients: NutrientProfile,
    /// True when no regulatory threshold is exceeded
    pub fssai_compliant: bool,
    /// Human-readable compliance notes
    pub fssai_notes: String,
}

/// Backend family that produced a complete analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisSource {
    /// Remote language model
    Ai,
    /// Persistent ingredient store
    Database,
    /// Built-in static nutrition table
    LocalFallback,
}

impl AnalysisSource {
    /// Wire name (`ai`, `database`, `local-fallback`)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Database => "database",
            Self::LocalFallback => "local-fallback",
        }
    }

    /// Parse a wire name
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ai" => Some(Self::Ai),
            "database" => Some(Self::Database),
            "local-fallback" => Some(Self::LocalFallback),
            _ => None,
        }
    }

    /// Name used when citing the data source in compliance notes
    #[must_use]
    pub const fn citation(&self) -> &'static str {
        match self {
            Self::Ai => "AI estimate",
            Self::Database => "database",
            Self::LocalFallback => "local nutrition table",
        }
    }
}

impl Display for AnalysisSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one pipeline stage that produced a usable profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    /// Aggregated profile and compliance verdict
    pub nutrition: AggregateProfile,
    /// Stage that produced it
    pub source: AnalysisSource,
    /// Ingredient names the stage could not resolve, in input order
    pub unmatched_ingredients: Vec<String>,
}

impl AnalysisOutcome {
    /// True when every ingredient resolved
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unmatched_ingredients.is_empty()
    }
}

/// Request body of the analyze endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Ingredient lines, in caller order
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
    /// Serving size in grams used for the per-serving view
    #[serde(default)]
    pub serving_size: Option<f64>,
}

impl AnalysisRequest {
    /// Build a request with the default serving size
    #[must_use]
    pub const fn new(ingredients: Vec<IngredientLine>) -> Self {
        Self {
            ingredients,
            serving_size: None,
        }
    }

    /// Serving size in grams, defaulting to 100
    #[must_use]
    pub fn serving_size_g(&self) -> f64 {
        self.serving_size.unwrap_or(DEFAULT_SERVING_SIZE_G)
    }

    /// Validate shape and values before any backend is consulted
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` or `MissingRequiredField` describing the first offending field.
    pub fn validate(&self) -> AppResult<()> {
        if self.ingredients.is_empty() {
            return Err(AppError::invalid_input("Ingredients array is required"));
        }

        for (index, line) in self.ingredients.iter().enumerate() {
            if line.name.trim().is_empty() {
                return Err(AppError::missing_field(&format!(
                    "ingredients[{index}].name"
                )));
            }
            if !line.quantity.is_finite() || line.quantity <= 0.0 {
                return Err(AppError::invalid_input(format!(
                    "Ingredient '{}' must have a positive quantity",
                    line.name.trim()
                )));
            }
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
