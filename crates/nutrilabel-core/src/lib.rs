// ABOUTME: Core crate for the NutriLabel nutrition analysis service
// ABOUTME: Provides unified errors, shared data models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # NutriLabel Core
//!
//! Foundation types used by every other crate in the workspace:
//!
//! - [`errors`]: `AppError`, `ErrorCode`, and the JSON error body
//! - [`models`]: nutrient profiles, ingredient lines, resolution and analysis results
//! - [`constants`]: request defaults, client-facing messages, default thresholds

/// Shared constants
pub mod constants;
/// Unified error handling
pub mod errors;
/// Shared data models
pub mod models;
