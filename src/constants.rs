// ABOUTME: Application constants for defaults, limits, and service identity
// ABOUTME: Central place for values shared by configuration, database, and LLM modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application-wide constants

/// Service name used in logs and health responses
pub const SERVICE_NAME: &str = "nutrilabel-server";

/// Default configuration values
pub mod defaults {
    /// HTTP listen port
    pub const HTTP_PORT: u16 = 8081;
    /// Bind address
    pub const HOST: &str = "0.0.0.0";
    /// `SQLite` database file
    pub const DATABASE_PATH: &str = "./data/nutrilabel.db";
    /// Connection pool size
    pub const DATABASE_MAX_CONNECTIONS: u32 = 5;
    /// Gemini model for structured estimation
    pub const GEMINI_MODEL: &str = "gemini-2.0-flash";
    /// Ollama's `OpenAI`-compatible endpoint
    pub const LOCAL_LLM_BASE_URL: &str = "http://localhost:11434/v1";
    /// Default local model
    pub const LOCAL_LLM_MODEL: &str = "qwen2.5:14b-instruct";
    /// Attempts per remote estimation call
    pub const LLM_MAX_ATTEMPTS: u32 = 3;
    /// Linear backoff step between attempts
    pub const LLM_RETRY_BACKOFF_MS: u64 = 500;
    /// Sampling temperature for estimation prompts
    pub const LLM_TEMPERATURE: f32 = 0.2;
}

/// Hard limits
pub mod limits {
    /// Minimum attempts per remote estimation call
    pub const MIN_LLM_ATTEMPTS: u32 = 1;
    /// Maximum attempts per remote estimation call
    pub const MAX_LLM_ATTEMPTS: u32 = 5;
    /// Seconds to wait for a pooled database connection
    pub const DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 30;
    /// Connect timeout for LLM HTTP clients
    pub const LLM_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Request timeout for LLM HTTP clients
    pub const LLM_REQUEST_TIMEOUT_SECS: u64 = 60;
    /// Maximum accepted request body (bytes)
    pub const MAX_REQUEST_BODY_BYTES: usize = 256 * 1024;
}
