// ABOUTME: Per-100g nutrient profile and ingredient line models
// ABOUTME: Canonical unit of exchange between resolvers, aggregator, and compliance rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Default unit when a request omits one
const DEFAULT_UNIT: &str = "g";

/// Nutrient values per 100 grams of the substance they describe
///
/// Every component of the pipeline exchanges nutrition data in this shape.
/// Sodium is in milligrams, energy in kcal, everything else in grams.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientProfile {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Total fat (g)
    pub fat: f64,
    /// Saturated fat (g)
    pub saturated_fat: f64,
    /// Carbohydrates (g)
    pub carbohydrates: f64,
    /// Total sugars (g)
    pub sugar: f64,
    /// Sodium (mg)
    pub sodium: f64,
    /// Dietary fiber (g)
    pub fiber: f64,
}

impl NutrientProfile {
    /// Build a profile from values in field order
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        calories: f64,
        protein: f64,
        fat: f64,
        saturated_fat: f64,
        carbohydrates: f64,
        sugar: f64,
        sodium: f64,
        fiber: f64,
    ) -> Self {
        Self {
            calories,
            protein,
            fat,
            saturated_fat,
            carbohydrates,
            sugar,
            sodium,
            fiber,
        }
    }

    /// All-zero profile
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Apply `f` to every nutrient field
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            calories: f(self.calories),
            protein: f(self.protein),
            fat: f(self.fat),
            saturated_fat: f(self.saturated_fat),
            carbohydrates: f(self.carbohydrates),
            sugar: f(self.sugar),
            sodium: f(self.sodium),
            fiber: f(self.fiber),
        }
    }

    /// Clamp negative and non-finite values to zero
    ///
    /// Profiles coming from the language model or an imported store record are
    /// untrusted; every profile handed to the aggregator must be non-negative.
    #[must_use]
    pub fn sanitized(self) -> Self {
        self.map(|v| if v.is_finite() && v > 0.0 { v } else { 0.0 })
    }

    /// Multiply every field by `factor`
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    /// Accumulate `other * factor` into this profile
    pub fn accumulate(&mut self, other: &Self, factor: f64) {
        self.calories += other.calories * factor;
        self.protein += other.protein * factor;
        self.fat += other.fat * factor;
        self.saturated_fat += other.saturated_fat * factor;
        self.carbohydrates += other.carbohydrates * factor;
        self.sugar += other.sugar * factor;
        self.sodium += other.sodium * factor;
        self.fiber += other.fiber * factor;
    }

    /// Round every field to the nearest 0.1
    #[must_use]
    pub fn rounded(self) -> Self {
        self.map(|v| (v * 10.0).round() / 10.0)
    }

    /// True when calories and all three macronutrients are zero
    #[must_use]
    pub fn has_zero_macros(&self) -> bool {
        [self.calories, self.protein, self.fat, self.carbohydrates]
            .iter()
            .all(|v| v.abs() < f64::EPSILON)
    }

    /// True when every field is non-negative and finite
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [
            self.calories,
            self.protein,
            self.fat,
            self.saturated_fat,
            self.carbohydrates,
            self.sugar,
            self.sodium,
            self.fiber,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// One ingredient of a recipe as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    /// Free-text ingredient name
    pub name: String,
    /// Quantity in `unit`
    pub quantity: f64,
    /// Unit string (case-insensitive; unknown units are treated as grams)
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_owned()
}

impl IngredientLine {
    /// Create an ingredient line
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }

    /// Create an ingredient line measured in grams
    #[must_use]
    pub fn grams(name: impl Into<String>, quantity: f64) -> Self {
        Self::new(name, quantity, DEFAULT_UNIT)
    }
}
