// ABOUTME: Nutrition pipeline algorithms with no I/O of their own
// ABOUTME: Unit normalization, tiered matching, static table, aggregation, and compliance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # NutriLabel Intelligence
//!
//! The deterministic half of the nutrition resolution pipeline. Everything here
//! operates on in-memory data so it can be tested without a database or a
//! language model:
//!
//! - [`units`]: (quantity, unit) to grams
//! - [`matching`]: exact / substring / word tier planning
//! - [`table`]: built-in static nutrient table
//! - [`resolver`]: the per-ingredient backend interface
//! - [`aggregation`]: mass-weighted per-100g composite
//! - [`compliance`]: FSSAI threshold rules

/// Mass-weighted aggregation
pub mod aggregation;
/// FSSAI threshold rules
pub mod compliance;
/// Tiered name matching
pub mod matching;
/// Per-ingredient resolver interface
pub mod resolver;
/// Built-in static nutrition table
pub mod table;
/// Unit normalization
pub mod units;

pub use aggregation::{aggregate, Aggregation};
pub use compliance::{ComplianceEvaluator, ComplianceThresholds, ComplianceVerdict};
pub use matching::{query_plan, MatchTier, NameQuery};
pub use resolver::{resolve_lines, IngredientResolver};
pub use table::NutritionTable;
pub use units::{normalize_to_grams, total_grams};
