// ABOUTME: Shared constants for request defaults and client-facing messages
// ABOUTME: Kept in one place so handlers and pipeline stages agree on wording
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Serving size in grams when the caller does not supply one
pub const DEFAULT_SERVING_SIZE_G: f64 = 100.0;

/// Maximum number of recipes returned by a listing
pub const MAX_RECIPE_LIST_LIMIT: u32 = 50;

/// Client-facing messages
pub mod messages {
    /// Returned when the static table recognizes none of the ingredients
    pub const NO_VALID_INGREDIENTS: &str =
        "No valid food ingredients recognized. Please enter real food items like rice, chicken, tomato, etc.";

    /// Returned when the language model zeroes out the recipe without an explanation
    pub const MODEL_REJECTED_INPUT: &str =
        "The ingredients could not be recognized as real food items.";

    /// Generic message replacing internal failures on the analyze route
    pub const ANALYSIS_FAILED: &str = "Failed to analyze recipe";

    /// Prefix of the compliance note listing unresolved ingredients
    pub const UNMATCHED_NOTE_PREFIX: &str = "Some ingredients were not found in the";
}

/// Default regulatory thresholds (per 100g)
pub mod thresholds {
    /// Sodium limit in milligrams
    pub const SODIUM_LIMIT_MG: f64 = 2300.0;
    /// Sugar limit in grams
    pub const SUGAR_LIMIT_G: f64 = 50.0;
    /// Saturated fat limit in grams
    pub const SATURATED_FAT_LIMIT_G: f64 = 20.0;
}
