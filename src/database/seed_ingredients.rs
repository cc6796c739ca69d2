// ABOUTME: Reference ingredient records used to seed the persistent ingredient store
// ABOUTME: Values per 100g; seeding is an upsert keyed on case-insensitive name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Reference seed set for the ingredient store
//!
//! Applied by `POST /api/seed-ingredients`, by the `seed-ingredients` binary,
//! and at startup when `AUTO_SEED_INGREDIENTS` is on and the store is empty.
//!
//! ```bash
//! cargo run --bin seed-ingredients
//! ```

use super::ingredients::StoredNutrition;

/// One seed row: name plus per-100g values
#[derive(Debug, Clone, Copy)]
pub struct SeedIngredient {
    /// Display name stored in `ingredient_name`
    pub name: &'static str,
    /// Per-100g values
    pub nutrition: StoredNutrition,
}

/// Values in column order: energy, protein, carbohydrates, total sugars,
/// added sugars, total fat, saturated fat, trans fat, cholesterol, sodium
const fn seed(name: &'static str, v: [f64; 10]) -> SeedIngredient {
    SeedIngredient {
        name,
        nutrition: StoredNutrition {
            energy_kcal: v[0],
            protein_g: v[1],
            carbohydrates_g: v[2],
            total_sugars_g: v[3],
            added_sugars_g: v[4],
            total_fat_g: v[5],
            saturated_fat_g: v[6],
            trans_fat_g: v[7],
            cholesterol_mg: v[8],
            sodium_mg: v[9],
        },
    }
}

/// Reference ingredients, in insertion order
#[rustfmt::skip]
pub const SEED_INGREDIENTS: &[SeedIngredient] = &[
    seed("Egg", [155.0, 13.0, 1.1, 1.1, 0.0, 11.0, 3.3, 0.0, 373.0, 124.0]),
    seed("Rice", [130.0, 2.7, 28.0, 0.1, 0.0, 0.3, 0.1, 0.0, 0.0, 1.0]),
    seed("Wheat Flour", [364.0, 10.0, 76.0, 0.3, 0.0, 1.0, 0.2, 0.0, 0.0, 2.0]),
    seed("Potato", [77.0, 2.0, 17.0, 0.8, 0.0, 0.1, 0.0, 0.0, 0.0, 6.0]),
    seed("Onion", [40.0, 1.1, 9.3, 4.2, 0.0, 0.1, 0.0, 0.0, 0.0, 4.0]),
    seed("Tomato", [18.0, 0.9, 3.9, 2.6, 0.0, 0.2, 0.0, 0.0, 0.0, 5.0]),
    seed("Milk", [42.0, 3.4, 5.0, 5.0, 0.0, 1.0, 0.6, 0.0, 5.0, 44.0]),
    seed("Butter", [717.0, 0.9, 0.1, 0.1, 0.0, 81.0, 51.0, 3.0, 215.0, 11.0]),
    seed("Cheese", [402.0, 25.0, 1.3, 0.5, 0.0, 33.0, 21.0, 1.0, 105.0, 621.0]),
    seed("Chicken", [239.0, 27.0, 0.0, 0.0, 0.0, 14.0, 3.8, 0.0, 88.0, 82.0]),
    seed("Cooking Oil", [884.0, 0.0, 0.0, 0.0, 0.0, 100.0, 14.0, 0.0, 0.0, 0.0]),
    seed("Sugar", [387.0, 0.0, 100.0, 100.0, 100.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
    seed("Salt", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 38758.0]),
    seed("Garlic", [149.0, 6.4, 33.0, 1.0, 0.0, 0.5, 0.1, 0.0, 0.0, 17.0]),
    seed("Ginger", [80.0, 1.8, 18.0, 1.7, 0.0, 0.8, 0.2, 0.0, 0.0, 13.0]),
    seed("Carrot", [41.0, 0.9, 10.0, 4.7, 0.0, 0.2, 0.0, 0.0, 0.0, 69.0]),
    seed("Cabbage", [25.0, 1.3, 6.0, 3.2, 0.0, 0.1, 0.0, 0.0, 0.0, 18.0]),
    seed("Spinach", [23.0, 2.9, 3.6, 0.4, 0.0, 0.4, 0.1, 0.0, 0.0, 79.0]),
    seed("Paneer", [265.0, 18.0, 1.2, 1.0, 0.0, 20.0, 13.0, 0.0, 56.0, 22.0]),
    seed("Yogurt", [59.0, 3.5, 4.7, 4.7, 0.0, 3.3, 2.1, 0.0, 13.0, 46.0]),
    seed("Green Peas", [81.0, 5.4, 14.0, 5.7, 0.0, 0.4, 0.1, 0.0, 0.0, 5.0]),
    seed("Capsicum", [20.0, 0.9, 4.6, 2.4, 0.0, 0.2, 0.0, 0.0, 0.0, 3.0]),
    seed("Banana", [89.0, 1.1, 23.0, 12.0, 0.0, 0.3, 0.1, 0.0, 0.0, 1.0]),
    seed("Apple", [52.0, 0.3, 14.0, 10.0, 0.0, 0.2, 0.0, 0.0, 0.0, 1.0]),
    seed("Honey", [304.0, 0.3, 82.0, 82.0, 82.0, 0.0, 0.0, 0.0, 0.0, 4.0]),
];
