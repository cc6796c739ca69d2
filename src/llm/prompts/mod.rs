// ABOUTME: Prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the nutrition estimation system prompt and recipe user prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

use std::fmt::Write;

use nutrilabel_core::models::IngredientLine;

/// System prompt for whole-recipe nutrition estimation
///
/// Instructs the model to answer per 100g, to apply FSSAI thresholds, and to
/// zero out every field when the input is not food.
pub const NUTRITION_ESTIMATOR_PROMPT: &str = include_str!("nutrition_estimator.md");

/// Render the user prompt listing every ingredient line and the serving size
#[must_use]
pub fn recipe_prompt(lines: &[IngredientLine], serving_size_g: f64) -> String {
    let mut prompt = String::from("Recipe ingredients:\n");
    for line in lines {
        // Writing to a String cannot fail
        let _ = writeln!(prompt, "- {} {} {}", line.quantity, line.unit, line.name);
    }
    let _ = write!(
        prompt,
        "\nServing size: {serving_size_g}g\nCalculate nutrition per 100g."
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_prompt_lists_lines() {
        let prompt = recipe_prompt(
            &[
                IngredientLine::new("Rice", 2.0, "cup"),
                IngredientLine::grams("Salt", 5.0),
            ],
            150.0,
        );
        assert!(prompt.contains("- 2 cup Rice"));
        assert!(prompt.contains("- 5 g Salt"));
        assert!(prompt.contains("Serving size: 150g"));
    }

    #[test]
    fn test_system_prompt_has_rejection_rule() {
        assert!(NUTRITION_ESTIMATOR_PROMPT.contains("set every nutrient field to 0"));
    }
}
