// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports environment-driven server config and its supporting types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the NutriLabel server
//!
//! - **Environment**: server, database, LLM, and compliance settings from environment variables
//! - **Types**: deployment environment and LLM provider selection

/// Environment and server configuration
pub mod environment;
/// Core configuration type definitions
pub mod types;

pub use environment::{DatabaseConfig, DatabaseUrl, LlmConfig, ServerConfig};
pub use types::{Environment, LlmProviderType};
