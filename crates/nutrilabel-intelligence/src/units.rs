// ABOUTME: Unit normalization for ingredient quantities
// ABOUTME: Converts (quantity, unit) pairs to grams with a fixed multiplier table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrilabel_core::errors::{AppError, AppResult};
use nutrilabel_core::models::IngredientLine;

/// Weight conversion constants (to grams)
const GRAMS_PER_KG: f64 = 1000.0;

/// Volume conversion constants (to grams, water density)
const GRAMS_PER_ML: f64 = 1.0;
const GRAMS_PER_LITRE: f64 = 1000.0;
const GRAMS_PER_TBSP: f64 = 15.0;
const GRAMS_PER_TSP: f64 = 5.0;
const GRAMS_PER_CUP: f64 = 240.0;

/// Count conversion constant (average piece)
const GRAMS_PER_PIECE: f64 = 50.0;

/// Multiplier that converts one `unit` into grams
///
/// Matching is case-insensitive. Unknown units, including `g` and an empty
/// string, use the identity multiplier so the quantity is taken as grams.
/// Volumes assume the density of water; `ml` is 1:1 with grams.
#[must_use]
pub fn grams_per_unit(unit: &str) -> f64 {
    match unit.trim().to_lowercase().as_str() {
        "kg" => GRAMS_PER_KG,
        "ml" => GRAMS_PER_ML,
        "l" | "liter" | "litre" => GRAMS_PER_LITRE,
        "tbsp" | "tablespoon" => GRAMS_PER_TBSP,
        "tsp" | "teaspoon" => GRAMS_PER_TSP,
        "cup" | "cups" => GRAMS_PER_CUP,
        "piece" | "pieces" | "nos" | "pcs" => GRAMS_PER_PIECE,
        _ => 1.0,
    }
}

/// Convert a quantity in `unit` to grams
///
/// Never fails. Non-negative quantities always yield non-negative grams.
///
/// ```rust
/// use nutrilabel_intelligence::units::normalize_to_grams;
///
/// assert_eq!(normalize_to_grams(2.0, "Cups"), 480.0);
/// assert_eq!(normalize_to_grams(30.0, "handful"), 30.0);
/// ```
#[must_use]
pub fn normalize_to_grams(quantity: f64, unit: &str) -> f64 {
    quantity * grams_per_unit(unit)
}

/// Total recipe mass in grams
///
/// # Errors
///
/// Returns `InvalidInput` when a line, or the sum of all lines, does not
/// convert to a finite number of grams.
pub fn total_grams(lines: &[IngredientLine]) -> AppResult<f64> {
    let mut total = 0.0;
    for line in lines {
        let grams = normalize_to_grams(line.quantity, &line.unit);
        if !grams.is_finite() {
            return Err(AppError::invalid_input(format!(
                "Ingredient '{}' has a quantity too large to convert to grams",
                line.name.trim()
            )));
        }
        total += grams;
    }

    if total.is_finite() {
        Ok(total)
    } else {
        Err(AppError::invalid_input("Total recipe weight is too large"))
    }
}
