// ABOUTME: FSSAI threshold rules applied to an aggregated per-100g profile
// ABOUTME: Produces the compliance flag and human-readable notes for a label
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrilabel_core::constants::messages::UNMATCHED_NOTE_PREFIX;
use nutrilabel_core::constants::thresholds;
use nutrilabel_core::models::{AnalysisSource, NutrientProfile};
use serde::{Deserialize, Serialize};

/// Per-100g limits above which a recipe is non-compliant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplianceThresholds {
    /// Sodium limit (mg)
    pub sodium_mg: f64,
    /// Sugar limit (g)
    pub sugar_g: f64,
    /// Saturated fat limit (g)
    pub saturated_fat_g: f64,
}

impl Default for ComplianceThresholds {
    fn default() -> Self {
        Self {
            sodium_mg: thresholds::SODIUM_LIMIT_MG,
            sugar_g: thresholds::SUGAR_LIMIT_G,
            saturated_fat_g: thresholds::SATURATED_FAT_LIMIT_G,
        }
    }
}

/// Outcome of the compliance rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceVerdict {
    /// False when any nutrient threshold is exceeded
    pub compliant: bool,
    /// Issues joined into sentences, or an affirmative note when there are none
    pub notes: String,
}

/// Applies threshold rules to aggregated profiles
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplianceEvaluator {
    thresholds: ComplianceThresholds,
}

impl ComplianceEvaluator {
    /// Create an evaluator with custom thresholds
    #[must_use]
    pub const fn new(thresholds: ComplianceThresholds) -> Self {
        Self { thresholds }
    }

    /// Active thresholds
    #[must_use]
    pub const fn thresholds(&self) -> &ComplianceThresholds {
        &self.thresholds
    }

    /// Evaluate a per-100g profile
    ///
    /// All rules are checked independently. A note about unmatched ingredients
    /// is informational and never flips compliance on its own.
    #[must_use]
    pub fn evaluate(
        &self,
        profile: &NutrientProfile,
        unmatched: &[String],
        source: AnalysisSource,
    ) -> ComplianceVerdict {
        let mut issues: Vec<String> = Vec::new();

        if profile.sodium > self.thresholds.sodium_mg {
            issues.push("High sodium content exceeds recommended limits".to_owned());
        }
        if profile.sugar > self.thresholds.sugar_g {
            issues.push("High sugar content per 100g".to_owned());
        }
        if profile.saturated_fat > self.thresholds.saturated_fat_g {
            issues.push("High saturated fat content".to_owned());
        }
        if !unmatched.is_empty() {
            issues.push(format!(
                "{UNMATCHED_NOTE_PREFIX} {}: {}",
                source.citation(),
                unmatched.join(", ")
            ));
        }

        if issues.is_empty() {
            return ComplianceVerdict {
                compliant: true,
                notes: format!(
                    "All mandatory FSSAI nutrition label fields are present. Values from the {} are within acceptable ranges.",
                    source.citation()
                ),
            };
        }

        let compliant = issues
            .iter()
            .all(|issue| issue.starts_with(UNMATCHED_NOTE_PREFIX));

        ComplianceVerdict {
            compliant,
            notes: format!("{}.", issues.join(". ")),
        }
    }
}
