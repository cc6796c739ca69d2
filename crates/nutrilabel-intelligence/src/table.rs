// ABOUTME: Built-in static nutrition table used as the last-resort ingredient backend
// ABOUTME: Ordered per-100g entries with alias keys and tiered in-memory lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use nutrilabel_core::errors::AppResult;
use nutrilabel_core::models::{NutrientProfile, ResolutionResult, ResolutionSource};
use tracing::debug;

use crate::matching::{find_in_entries, normalize_name, MatchTier};
use crate::resolver::IngredientResolver;

/// Per-100g values of common ingredients (USDA/IFCT averages)
///
/// Singular, plural, and regional names are separate keys. Order matters:
/// within a matching tier the first declared key wins.
#[rustfmt::skip]
const BUILTIN_ENTRIES: &[(&str, NutrientProfile)] = &[
    // grains, flours, noodles
    ("rice", NutrientProfile::new(130.0, 2.7, 0.3, 0.1, 28.0, 0.1, 1.0, 0.4)),
    ("white rice", NutrientProfile::new(130.0, 2.7, 0.3, 0.1, 28.0, 0.1, 1.0, 0.4)),
    ("brown rice", NutrientProfile::new(123.0, 2.7, 1.0, 0.2, 26.0, 0.4, 4.0, 1.8)),
    ("basmati rice", NutrientProfile::new(121.0, 3.5, 0.4, 0.1, 25.0, 0.1, 1.0, 0.4)),
    ("noodle", NutrientProfile::new(138.0, 4.5, 2.1, 0.3, 25.0, 0.6, 234.0, 1.0)),
    ("noodles", NutrientProfile::new(138.0, 4.5, 2.1, 0.3, 25.0, 0.6, 234.0, 1.0)),
    ("maggi noodle", NutrientProfile::new(390.0, 8.0, 15.0, 7.0, 56.0, 2.5, 860.0, 2.0)),
    ("maggi noodles", NutrientProfile::new(390.0, 8.0, 15.0, 7.0, 56.0, 2.5, 860.0, 2.0)),
    ("maggie noodle", NutrientProfile::new(390.0, 8.0, 15.0, 7.0, 56.0, 2.5, 860.0, 2.0)),
    ("maggie noodles", NutrientProfile::new(390.0, 8.0, 15.0, 7.0, 56.0, 2.5, 860.0, 2.0)),
    ("pasta", NutrientProfile::new(157.0, 5.8, 0.9, 0.2, 31.0, 0.6, 1.0, 1.8)),
    ("macaroni", NutrientProfile::new(157.0, 5.8, 0.9, 0.2, 31.0, 0.6, 1.0, 1.8)),
    ("spaghetti", NutrientProfile::new(157.0, 5.8, 0.9, 0.2, 31.0, 0.6, 1.0, 1.8)),
    ("bread", NutrientProfile::new(265.0, 9.0, 3.2, 0.7, 49.0, 5.0, 491.0, 2.7)),
    ("wheat flour", NutrientProfile::new(340.0, 10.0, 1.5, 0.3, 72.0, 0.3, 2.0, 2.7)),
    ("atta", NutrientProfile::new(340.0, 12.0, 1.7, 0.3, 69.0, 0.4, 2.0, 11.0)),
    ("maida", NutrientProfile::new(350.0, 10.0, 1.0, 0.2, 74.0, 0.3, 2.0, 2.7)),
    ("oats", NutrientProfile::new(389.0, 17.0, 7.0, 1.2, 66.0, 1.0, 2.0, 11.0)),
    ("roti", NutrientProfile::new(300.0, 9.0, 3.7, 0.6, 56.0, 1.8, 409.0, 4.0)),
    ("chapati", NutrientProfile::new(300.0, 9.0, 3.7, 0.6, 56.0, 1.8, 409.0, 4.0)),
    ("poha", NutrientProfile::new(358.0, 6.6, 1.2, 0.3, 77.0, 1.5, 5.0, 2.4)),
    ("flattened rice", NutrientProfile::new(358.0, 6.6, 1.2, 0.3, 77.0, 1.5, 5.0, 2.4)),
    // seasonings and spices
    ("maggi tastemaker", NutrientProfile::new(290.0, 9.0, 8.0, 3.5, 45.0, 5.0, 6200.0, 3.0)),
    ("tastemaker", NutrientProfile::new(290.0, 9.0, 8.0, 3.5, 45.0, 5.0, 6200.0, 3.0)),
    ("masala", NutrientProfile::new(325.0, 14.0, 15.0, 2.5, 45.0, 5.0, 2000.0, 15.0)),
    ("salt", NutrientProfile::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 38758.0, 0.0)),
    ("turmeric", NutrientProfile::new(354.0, 8.0, 10.0, 3.1, 65.0, 3.2, 38.0, 21.0)),
    ("turmeric powder", NutrientProfile::new(354.0, 8.0, 10.0, 3.1, 65.0, 3.2, 38.0, 21.0)),
    ("chili powder", NutrientProfile::new(282.0, 12.0, 14.0, 2.5, 50.0, 7.2, 30.0, 35.0)),
    ("red chili powder", NutrientProfile::new(282.0, 12.0, 14.0, 2.5, 50.0, 7.2, 30.0, 35.0)),
    ("cumin", NutrientProfile::new(375.0, 18.0, 22.0, 1.5, 44.0, 2.3, 168.0, 11.0)),
    ("cumin seeds", NutrientProfile::new(375.0, 18.0, 22.0, 1.5, 44.0, 2.3, 168.0, 11.0)),
    ("jeera", NutrientProfile::new(375.0, 18.0, 22.0, 1.5, 44.0, 2.3, 168.0, 11.0)),
    ("coriander powder", NutrientProfile::new(298.0, 12.0, 18.0, 1.0, 55.0, 0.0, 35.0, 42.0)),
    ("garam masala", NutrientProfile::new(379.0, 14.0, 15.0, 3.0, 45.0, 3.0, 60.0, 27.0)),
    ("pepper", NutrientProfile::new(251.0, 10.0, 3.3, 1.4, 64.0, 0.6, 20.0, 25.0)),
    ("black pepper", NutrientProfile::new(251.0, 10.0, 3.3, 1.4, 64.0, 0.6, 20.0, 25.0)),
    ("mustard seeds", NutrientProfile::new(508.0, 26.0, 36.0, 1.6, 28.0, 7.0, 13.0, 12.0)),
    // vegetables
    ("onion", NutrientProfile::new(40.0, 1.1, 0.1, 0.0, 9.3, 4.2, 4.0, 1.7)),
    ("tomato", NutrientProfile::new(18.0, 0.9, 0.2, 0.0, 3.9, 2.6, 5.0, 1.2)),
    ("potato", NutrientProfile::new(77.0, 2.0, 0.1, 0.0, 17.0, 0.8, 6.0, 2.2)),
    ("carrot", NutrientProfile::new(41.0, 0.9, 0.2, 0.0, 10.0, 4.7, 69.0, 2.8)),
    ("capsicum", NutrientProfile::new(20.0, 0.9, 0.2, 0.0, 4.6, 2.4, 3.0, 1.7)),
    ("bell pepper", NutrientProfile::new(20.0, 0.9, 0.2, 0.0, 4.6, 2.4, 3.0, 1.7)),
    ("green chilli", NutrientProfile::new(40.0, 2.0, 0.2, 0.0, 9.0, 5.3, 7.0, 1.5)),
    ("green chili", NutrientProfile::new(40.0, 2.0, 0.2, 0.0, 9.0, 5.3, 7.0, 1.5)),
    ("garlic", NutrientProfile::new(149.0, 6.4, 0.5, 0.1, 33.0, 1.0, 17.0, 2.1)),
    ("ginger", NutrientProfile::new(80.0, 1.8, 0.8, 0.2, 18.0, 1.7, 13.0, 2.0)),
    ("spinach", NutrientProfile::new(23.0, 2.9, 0.4, 0.1, 3.6, 0.4, 79.0, 2.2)),
    ("palak", NutrientProfile::new(23.0, 2.9, 0.4, 0.1, 3.6, 0.4, 79.0, 2.2)),
    ("cabbage", NutrientProfile::new(25.0, 1.3, 0.1, 0.0, 5.8, 3.2, 18.0, 2.5)),
    ("cauliflower", NutrientProfile::new(25.0, 1.9, 0.3, 0.0, 5.0, 1.9, 30.0, 2.0)),
    ("broccoli", NutrientProfile::new(34.0, 2.8, 0.4, 0.0, 7.0, 1.7, 33.0, 2.6)),
    ("peas", NutrientProfile::new(81.0, 5.4, 0.4, 0.1, 14.0, 5.7, 5.0, 5.1)),
    ("green peas", NutrientProfile::new(81.0, 5.4, 0.4, 0.1, 14.0, 5.7, 5.0, 5.1)),
    ("matar", NutrientProfile::new(81.0, 5.4, 0.4, 0.1, 14.0, 5.7, 5.0, 5.1)),
    ("corn", NutrientProfile::new(96.0, 3.4, 1.5, 0.2, 21.0, 4.5, 1.0, 2.4)),
    ("mushroom", NutrientProfile::new(22.0, 3.1, 0.3, 0.0, 3.3, 2.0, 5.0, 1.0)),
    ("cucumber", NutrientProfile::new(16.0, 0.7, 0.1, 0.0, 3.6, 1.7, 2.0, 0.5)),
    ("lettuce", NutrientProfile::new(15.0, 1.4, 0.2, 0.0, 2.9, 1.3, 28.0, 1.3)),
    ("beetroot", NutrientProfile::new(43.0, 1.6, 0.2, 0.0, 10.0, 7.0, 78.0, 2.8)),
    ("sweet potato", NutrientProfile::new(86.0, 1.6, 0.1, 0.0, 20.0, 4.2, 55.0, 3.0)),
    ("lady finger", NutrientProfile::new(33.0, 1.9, 0.2, 0.0, 7.0, 1.5, 7.0, 3.2)),
    ("bhindi", NutrientProfile::new(33.0, 1.9, 0.2, 0.0, 7.0, 1.5, 7.0, 3.2)),
    ("okra", NutrientProfile::new(33.0, 1.9, 0.2, 0.0, 7.0, 1.5, 7.0, 3.2)),
    ("brinjal", NutrientProfile::new(25.0, 1.0, 0.2, 0.0, 6.0, 3.5, 2.0, 3.0)),
    ("eggplant", NutrientProfile::new(25.0, 1.0, 0.2, 0.0, 6.0, 3.5, 2.0, 3.0)),
    // fruit
    ("banana", NutrientProfile::new(89.0, 1.1, 0.3, 0.1, 23.0, 12.0, 1.0, 2.6)),
    ("apple", NutrientProfile::new(52.0, 0.3, 0.2, 0.0, 14.0, 10.0, 1.0, 2.4)),
    ("mango", NutrientProfile::new(60.0, 0.8, 0.4, 0.1, 15.0, 14.0, 1.0, 1.6)),
    ("lemon", NutrientProfile::new(29.0, 1.1, 0.3, 0.0, 9.0, 2.5, 2.0, 2.8)),
    ("lemon juice", NutrientProfile::new(22.0, 0.4, 0.2, 0.0, 6.9, 2.5, 1.0, 0.3)),
    ("coconut", NutrientProfile::new(354.0, 3.3, 33.0, 30.0, 15.0, 6.2, 20.0, 9.0)),
    // dairy
    ("milk", NutrientProfile::new(61.0, 3.2, 3.3, 1.9, 4.8, 5.0, 43.0, 0.0)),
    ("full cream milk", NutrientProfile::new(61.0, 3.2, 3.3, 1.9, 4.8, 5.0, 43.0, 0.0)),
    ("curd", NutrientProfile::new(61.0, 3.5, 3.3, 2.1, 4.7, 4.7, 36.0, 0.0)),
    ("yogurt", NutrientProfile::new(61.0, 3.5, 3.3, 2.1, 4.7, 4.7, 36.0, 0.0)),
    ("paneer", NutrientProfile::new(265.0, 18.0, 21.0, 13.0, 1.2, 0.5, 18.0, 0.0)),
    ("cheese", NutrientProfile::new(402.0, 25.0, 33.0, 21.0, 1.3, 0.5, 621.0, 0.0)),
    ("butter", NutrientProfile::new(717.0, 0.9, 81.0, 51.0, 0.1, 0.1, 643.0, 0.0)),
    ("ghee", NutrientProfile::new(900.0, 0.0, 100.0, 62.0, 0.0, 0.0, 0.0, 0.0)),
    ("cream", NutrientProfile::new(195.0, 2.8, 19.0, 12.0, 4.0, 3.5, 40.0, 0.0)),
    // meat, fish, eggs, soy
    ("chicken", NutrientProfile::new(239.0, 27.0, 14.0, 3.8, 0.0, 0.0, 82.0, 0.0)),
    ("chicken breast", NutrientProfile::new(165.0, 31.0, 3.6, 1.0, 0.0, 0.0, 74.0, 0.0)),
    ("egg", NutrientProfile::new(155.0, 13.0, 11.0, 3.3, 1.1, 1.1, 124.0, 0.0)),
    ("eggs", NutrientProfile::new(155.0, 13.0, 11.0, 3.3, 1.1, 1.1, 124.0, 0.0)),
    ("mutton", NutrientProfile::new(294.0, 25.0, 21.0, 9.0, 0.0, 0.0, 72.0, 0.0)),
    ("fish", NutrientProfile::new(206.0, 22.0, 12.0, 2.5, 0.0, 0.0, 59.0, 0.0)),
    ("prawn", NutrientProfile::new(99.0, 24.0, 0.3, 0.1, 0.2, 0.0, 111.0, 0.0)),
    ("prawns", NutrientProfile::new(99.0, 24.0, 0.3, 0.1, 0.2, 0.0, 111.0, 0.0)),
    ("shrimp", NutrientProfile::new(99.0, 24.0, 0.3, 0.1, 0.2, 0.0, 111.0, 0.0)),
    ("tofu", NutrientProfile::new(76.0, 8.0, 4.8, 0.7, 1.9, 0.6, 7.0, 0.3)),
    ("soya chunks", NutrientProfile::new(345.0, 52.0, 0.5, 0.1, 33.0, 0.0, 1.0, 13.0)),
    // pulses
    ("dal", NutrientProfile::new(116.0, 9.0, 0.4, 0.1, 20.0, 0.8, 2.0, 8.0)),
    ("toor dal", NutrientProfile::new(343.0, 22.0, 1.7, 0.3, 63.0, 3.0, 15.0, 15.0)),
    ("moong dal", NutrientProfile::new(347.0, 24.0, 1.2, 0.3, 63.0, 4.0, 15.0, 16.0)),
    ("chana dal", NutrientProfile::new(360.0, 20.0, 5.0, 0.5, 60.0, 5.0, 24.0, 17.0)),
    ("urad dal", NutrientProfile::new(341.0, 26.0, 1.6, 0.2, 59.0, 1.0, 38.0, 18.0)),
    ("masoor dal", NutrientProfile::new(352.0, 25.0, 1.1, 0.2, 60.0, 2.0, 6.0, 11.0)),
    ("rajma", NutrientProfile::new(333.0, 24.0, 0.8, 0.2, 60.0, 2.2, 24.0, 25.0)),
    ("kidney beans", NutrientProfile::new(333.0, 24.0, 0.8, 0.2, 60.0, 2.2, 24.0, 25.0)),
    ("chickpeas", NutrientProfile::new(364.0, 19.0, 6.0, 0.6, 61.0, 11.0, 24.0, 17.0)),
    ("chole", NutrientProfile::new(364.0, 19.0, 6.0, 0.6, 61.0, 11.0, 24.0, 17.0)),
    // oils and fats
    ("oil", NutrientProfile::new(884.0, 0.0, 100.0, 14.0, 0.0, 0.0, 0.0, 0.0)),
    ("cooking oil", NutrientProfile::new(884.0, 0.0, 100.0, 14.0, 0.0, 0.0, 0.0, 0.0)),
    ("vegetable oil", NutrientProfile::new(884.0, 0.0, 100.0, 14.0, 0.0, 0.0, 0.0, 0.0)),
    ("sunflower oil", NutrientProfile::new(884.0, 0.0, 100.0, 10.0, 0.0, 0.0, 0.0, 0.0)),
    ("olive oil", NutrientProfile::new(884.0, 0.0, 100.0, 14.0, 0.0, 0.0, 2.0, 0.0)),
    ("mustard oil", NutrientProfile::new(884.0, 0.0, 100.0, 12.0, 0.0, 0.0, 0.0, 0.0)),
    ("coconut oil", NutrientProfile::new(862.0, 0.0, 100.0, 82.0, 0.0, 0.0, 0.0, 0.0)),
    // sweeteners
    ("sugar", NutrientProfile::new(387.0, 0.0, 0.0, 0.0, 100.0, 100.0, 1.0, 0.0)),
    ("jaggery", NutrientProfile::new(383.0, 0.4, 0.1, 0.0, 98.0, 84.0, 30.0, 0.0)),
    ("honey", NutrientProfile::new(304.0, 0.3, 0.0, 0.0, 82.0, 82.0, 4.0, 0.2)),
    // nuts and seeds
    ("almond", NutrientProfile::new(579.0, 21.0, 50.0, 3.8, 22.0, 4.4, 1.0, 13.0)),
    ("almonds", NutrientProfile::new(579.0, 21.0, 50.0, 3.8, 22.0, 4.4, 1.0, 13.0)),
    ("cashew", NutrientProfile::new(553.0, 18.0, 44.0, 7.8, 30.0, 6.0, 12.0, 3.3)),
    ("cashews", NutrientProfile::new(553.0, 18.0, 44.0, 7.8, 30.0, 6.0, 12.0, 3.3)),
    ("peanut", NutrientProfile::new(567.0, 26.0, 49.0, 6.8, 16.0, 4.0, 18.0, 9.0)),
    ("peanuts", NutrientProfile::new(567.0, 26.0, 49.0, 6.8, 16.0, 4.0, 18.0, 9.0)),
    ("groundnut", NutrientProfile::new(567.0, 26.0, 49.0, 6.8, 16.0, 4.0, 18.0, 9.0)),
    // beverages
    ("water", NutrientProfile::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0)),
    ("tea", NutrientProfile::new(1.0, 0.0, 0.0, 0.0, 0.3, 0.0, 3.0, 0.0)),
    ("coffee", NutrientProfile::new(2.0, 0.3, 0.0, 0.0, 0.0, 0.0, 5.0, 0.0)),
    // sauces and condiments
    ("soy sauce", NutrientProfile::new(53.0, 8.1, 0.0, 0.0, 4.9, 0.4, 5493.0, 0.8)),
    ("tomato sauce", NutrientProfile::new(82.0, 1.3, 0.1, 0.0, 19.0, 14.0, 907.0, 1.5)),
    ("ketchup", NutrientProfile::new(112.0, 1.7, 0.1, 0.0, 26.0, 22.0, 907.0, 0.3)),
    ("vinegar", NutrientProfile::new(18.0, 0.0, 0.0, 0.0, 0.04, 0.04, 2.0, 0.0)),
    ("mayonnaise", NutrientProfile::new(680.0, 1.0, 75.0, 12.0, 0.6, 0.3, 635.0, 0.0)),
    // misc
    ("coconut milk", NutrientProfile::new(230.0, 2.3, 24.0, 21.0, 6.0, 3.3, 15.0, 0.0)),
    ("besan", NutrientProfile::new(387.0, 22.0, 7.0, 0.7, 58.0, 11.0, 64.0, 10.0)),
    ("gram flour", NutrientProfile::new(387.0, 22.0, 7.0, 0.7, 58.0, 11.0, 64.0, 10.0)),
    ("semolina", NutrientProfile::new(360.0, 13.0, 1.1, 0.2, 73.0, 0.5, 1.0, 3.9)),
    ("suji", NutrientProfile::new(360.0, 13.0, 1.1, 0.2, 73.0, 0.5, 1.0, 3.9)),
    ("rava", NutrientProfile::new(360.0, 13.0, 1.1, 0.2, 73.0, 0.5, 1.0, 3.9)),
];

/// Immutable name-to-profile table with tiered lookup
///
/// Construct once and share behind an `Arc`; lookups never allocate beyond the
/// query plan.
#[derive(Debug, Clone)]
pub struct NutritionTable {
    entries: Vec<(String, NutrientProfile)>,
}

impl NutritionTable {
    /// Table populated with the built-in ingredient set
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_ENTRIES.iter().map(|(name, profile)| (*name, *profile)))
    }

    /// Build a table from `(name, profile)` pairs, keeping their order
    ///
    /// Names are lowercased and trimmed; a repeated name keeps its first position
    /// and its last profile.
    pub fn from_entries<N, I>(entries: I) -> Self
    where
        N: AsRef<str>,
        I: IntoIterator<Item = (N, NutrientProfile)>,
    {
        let mut table: Vec<(String, NutrientProfile)> = Vec::new();
        for (name, profile) in entries {
            let key = normalize_name(name.as_ref());
            if key.is_empty() {
                continue;
            }
            let profile = profile.sanitized();
            match table.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = profile,
                None => table.push((key, profile)),
            }
        }
        Self { entries: table }
    }

    /// Number of keys, aliases included
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Tiered lookup returning the matched key, its tier, and profile
    #[must_use]
    pub fn find(&self, name: &str) -> Option<(MatchTier, &str, NutrientProfile)> {
        find_in_entries(
            name,
            self.entries.iter().map(|(key, profile)| (key.as_str(), profile)),
        )
        .map(|(tier, key, profile)| (tier, key, *profile))
    }

    /// Resolve one ingredient name against the table
    #[must_use]
    pub fn lookup(&self, name: &str) -> ResolutionResult {
        match self.find(name) {
            Some((tier, key, profile)) => {
                debug!(ingredient = %name, matched_key = %key, ?tier, "static table hit");
                ResolutionResult::matched(profile, ResolutionSource::Static)
            }
            None => ResolutionResult::unmatched(),
        }
    }
}

impl Default for NutritionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[async_trait]
impl IngredientResolver for NutritionTable {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Static
    }

    async fn resolve(&self, name: &str) -> AppResult<ResolutionResult> {
        Ok(self.lookup(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_populated() {
        let table = NutritionTable::builtin();
        assert!(table.len() > 100);
        assert!(table.names().all(|name| name == name.to_lowercase()));
        assert!(BUILTIN_ENTRIES.iter().all(|(_, profile)| profile.is_valid()));
    }

    #[test]
    fn test_rice_reference_values() {
        let table = NutritionTable::builtin();
        let (tier, key, profile) = table.find("Rice").unwrap();
        assert_eq!(tier, MatchTier::Exact);
        assert_eq!(key, "rice");
        assert!((profile.calories - 130.0).abs() < f64::EPSILON);
        assert!((profile.protein - 2.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_alias_keys_resolve() {
        let table = NutritionTable::builtin();
        assert!(table.lookup("Noodles").is_matched());
        assert!(table.lookup("suji").is_matched());
        assert_eq!(table.lookup("zxqqw"), ResolutionResult::unmatched());
    }

    #[test]
    fn test_fixture_table_keeps_order_and_last_value() {
        let table = NutritionTable::from_entries(vec![
            ("Oil", NutrientProfile::new(884.0, 0.0, 100.0, 14.0, 0.0, 0.0, 0.0, 0.0)),
            ("olive oil", NutrientProfile::new(884.0, 0.0, 100.0, 14.0, 0.0, 0.0, 2.0, 0.0)),
            ("oil", NutrientProfile::new(900.0, 0.0, 100.0, 14.0, 0.0, 0.0, 0.0, 0.0)),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["oil", "olive oil"]);

        // substring tier: first declared key wins
        let (tier, key, profile) = table.find("extra virgin olive oil").unwrap();
        assert_eq!(tier, MatchTier::Substring);
        assert_eq!(key, "oil");
        assert!((profile.calories - 900.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_resolver_reports_static_source() {
        let table = NutritionTable::builtin();
        let result = table.resolve("tomato").await.unwrap();
        assert_eq!(result.source, ResolutionSource::Static);
        assert_eq!(table.source(), ResolutionSource::Static);
    }
}
