// ABOUTME: Mass-weighted aggregation of per-ingredient profiles into a per-100g recipe profile
// ABOUTME: Unmatched lines dilute the composite by contributing weight but no nutrients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrilabel_core::models::{
    AggregateProfile, AnalysisOutcome, AnalysisSource, IngredientLine, NutrientProfile,
    ResolutionResult,
};

use crate::compliance::ComplianceEvaluator;
use crate::units::normalize_to_grams;

/// Aggregated nutrition of a recipe before compliance evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Per-100g composite, rounded to 0.1
    pub nutrients: NutrientProfile,
    /// Total recipe weight in grams, unmatched lines included
    pub total_grams: f64,
    /// Number of lines that resolved
    pub matched_count: usize,
    /// Names of lines that did not resolve, in input order
    pub unmatched: Vec<String>,
}

impl Aggregation {
    /// Whether at least one line resolved
    #[must_use]
    pub const fn any_matched(&self) -> bool {
        self.matched_count > 0
    }

    /// Run compliance rules and package the result for `source`
    #[must_use]
    pub fn into_outcome(
        self,
        source: AnalysisSource,
        evaluator: &ComplianceEvaluator,
    ) -> AnalysisOutcome {
        let verdict = evaluator.evaluate(&self.nutrients, &self.unmatched, source);
        AnalysisOutcome {
            nutrition: AggregateProfile {
                nutrients: self.nutrients,
                fssai_compliant: verdict.compliant,
                fssai_notes: verdict.notes,
            },
            source,
            unmatched_ingredients: self.unmatched,
        }
    }
}

/// Combine resolved lines into a per-100g composite
///
/// Each matched profile contributes `profile * grams / 100`. Every line's grams,
/// matched or not, go into the total weight; the sum is then rescaled by
/// `100 / total_grams`, or by 1 when the total is zero.
#[must_use]
pub fn aggregate(resolved: &[(IngredientLine, ResolutionResult)]) -> Aggregation {
    let mut totals = NutrientProfile::zero();
    let mut total_grams = 0.0;
    let mut matched_count = 0;
    let mut unmatched = Vec::new();

    for (line, result) in resolved {
        let grams = normalize_to_grams(line.quantity, &line.unit);
        match &result.profile {
            Some(profile) => {
                totals.accumulate(profile, grams / 100.0);
                matched_count += 1;
            }
            None => unmatched.push(line.name.clone()),
        }
        total_grams += grams;
    }

    let norm_factor = if total_grams > 0.0 {
        100.0 / total_grams
    } else {
        1.0
    };

    Aggregation {
        nutrients: totals.scaled(norm_factor).rounded(),
        total_grams,
        matched_count,
        unmatched,
    }
}
