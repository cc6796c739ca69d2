// ABOUTME: Main library entry point for the NutriLabel nutrition analysis server
// ABOUTME: Wires configuration, persistence, remote estimation, and HTTP routes around the pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # NutriLabel Server
//!
//! Turns a free-form recipe (ingredient name, quantity, unit) into a per-100g
//! nutrient profile with an FSSAI compliance verdict, suitable for printing on
//! a food label.
//!
//! ## Pipeline
//!
//! Each analysis request walks three strategies in order and stops at the
//! first that produces a usable answer:
//!
//! 1. **Database**: the persistent ingredient store, with exact, substring,
//!    and word-level name matching
//! 2. **Remote**: a whole-recipe structured estimate from a language model
//!    (Gemini or an `OpenAI`-compatible local server)
//! 3. **Local fallback**: the built-in static nutrition table
//!
//! ## Architecture
//!
//! - **`nutrilabel-core`**: error types, nutrient models, shared constants
//! - **`nutrilabel-intelligence`**: unit normalization, matching, aggregation, compliance
//! - **This crate**: configuration, `SQLite` persistence, LLM providers, the
//!   orchestrator, and the axum HTTP surface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutrilabel_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("NutriLabel configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Staged nutrition analysis (store, remote estimate, static table)
pub mod analysis;

/// Environment-driven configuration
pub mod config;

/// Application constants
pub mod constants;

/// `SQLite` ingredient store and recipe history
pub mod database;

/// Language model providers for structured estimation
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware stack
pub mod middleware;

/// Shared server state
pub mod resources;

/// HTTP routes
pub mod routes;

pub use nutrilabel_core::errors;
pub use nutrilabel_core::models;
