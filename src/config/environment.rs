// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses server, database, LLM, and compliance settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration. There are no configuration files: every
//! setting has a default and can be overridden by an environment variable.

use anyhow::{anyhow, Context, Result};
use nutrilabel_intelligence::ComplianceThresholds;
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error as StdError;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

use super::types::{Environment, LlmProviderType};
use crate::constants::{defaults, limits};

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path of the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for non-SQLite URLs
    pub fn parse_url(s: &str) -> Result<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if path_str == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.contains("://") {
            Err(anyhow!("Unsupported database URL '{s}': only sqlite: URLs are supported"))
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from(defaults::DATABASE_PATH),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Ingredient store and recipe persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Connection pool size
    pub max_connections: u32,
    /// Seed the ingredient store at startup when it is empty
    pub auto_seed: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            max_connections: defaults::DATABASE_MAX_CONNECTIONS,
            auto_seed: true,
        }
    }
}

/// Remote structured-estimation settings
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Selected provider
    pub provider: LlmProviderType,
    /// Gemini API key; absent disables the Gemini provider
    pub gemini_api_key: Option<String>,
    /// Gemini model name
    pub gemini_model: String,
    /// Base URL of the `OpenAI`-compatible endpoint
    pub local_base_url: String,
    /// Model served by the `OpenAI`-compatible endpoint
    pub local_model: String,
    /// Optional API key for the `OpenAI`-compatible endpoint
    pub local_api_key: Option<String>,
    /// Attempts per estimation call (1..=5)
    pub max_attempts: u32,
    /// Linear backoff step between attempts
    pub retry_backoff_ms: u64,
}

impl LlmConfig {
    /// Whether the remote stage can run at all
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        match self.provider {
            LlmProviderType::Gemini => self.gemini_api_key.is_some(),
            LlmProviderType::Local => true,
            LlmProviderType::None => false,
        }
    }
}

impl Debug for LlmConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("gemini_model", &self.gemini_model)
            .field("local_base_url", &self.local_base_url)
            .field("local_model", &self.local_model)
            .field("local_api_key", &self.local_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("max_attempts", &self.max_attempts)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderType::default(),
            gemini_api_key: None,
            gemini_model: defaults::GEMINI_MODEL.to_owned(),
            local_base_url: defaults::LOCAL_LLM_BASE_URL.to_owned(),
            local_model: defaults::LOCAL_LLM_MODEL.to_owned(),
            local_api_key: None,
            max_attempts: defaults::LLM_MAX_ATTEMPTS,
            retry_backoff_ms: defaults::LLM_RETRY_BACKOFF_MS,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Remote estimation configuration
    pub llm: LlmConfig,
    /// Compliance thresholds
    pub compliance: ComplianceThresholds,
    /// Allowed CORS origins (`*` allows any)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            host: defaults::HOST.to_owned(),
            environment: Environment::default(),
            database: DatabaseConfig::default(),
            llm: LlmConfig::default(),
            compliance: ComplianceThresholds::default(),
            cors_origins: vec!["*".to_owned()],
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable or out-of-range value
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let provider_name = env_var_or(LlmProviderType::ENV_VAR, "gemini");
        let provider = LlmProviderType::parse(&provider_name)
            .ok_or_else(|| anyhow!("Invalid LLM_PROVIDER value '{provider_name}'"))?;

        let config = Self {
            http_port: parse_env("HTTP_PORT", defaults::HTTP_PORT)?,
            host: env_var_or("HOST", defaults::HOST),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),

            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or(
                    "DATABASE_URL",
                    &DatabaseUrl::default().to_connection_string(),
                ))?,
                max_connections: parse_env(
                    "DATABASE_MAX_CONNECTIONS",
                    defaults::DATABASE_MAX_CONNECTIONS,
                )?,
                auto_seed: parse_env("AUTO_SEED_INGREDIENTS", true)?,
            },

            llm: LlmConfig {
                provider,
                gemini_api_key: non_empty_env("GEMINI_API_KEY"),
                gemini_model: env_var_or("GEMINI_MODEL", defaults::GEMINI_MODEL),
                local_base_url: env_var_or("LOCAL_LLM_BASE_URL", defaults::LOCAL_LLM_BASE_URL),
                local_model: env_var_or("LOCAL_LLM_MODEL", defaults::LOCAL_LLM_MODEL),
                local_api_key: non_empty_env("LOCAL_LLM_API_KEY"),
                max_attempts: parse_env("LLM_MAX_ATTEMPTS", defaults::LLM_MAX_ATTEMPTS)?,
                retry_backoff_ms: parse_env(
                    "LLM_RETRY_BACKOFF_MS",
                    defaults::LLM_RETRY_BACKOFF_MS,
                )?,
            },

            compliance: ComplianceThresholds {
                sodium_mg: parse_env(
                    "FSSAI_SODIUM_LIMIT_MG",
                    ComplianceThresholds::default().sodium_mg,
                )?,
                sugar_g: parse_env("FSSAI_SUGAR_LIMIT_G", ComplianceThresholds::default().sugar_g)?,
                saturated_fat_g: parse_env(
                    "FSSAI_SATURATED_FAT_LIMIT_G",
                    ComplianceThresholds::default().saturated_fat_g,
                )?,
            },

            cors_origins: parse_origins(&env_var_or("CORS_ORIGINS", "*")),
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        if !(limits::MIN_LLM_ATTEMPTS..=limits::MAX_LLM_ATTEMPTS).contains(&self.llm.max_attempts) {
            return Err(anyhow!(
                "LLM_MAX_ATTEMPTS must be between {} and {}",
                limits::MIN_LLM_ATTEMPTS,
                limits::MAX_LLM_ATTEMPTS
            ));
        }

        if self.database.max_connections == 0 {
            return Err(anyhow!("DATABASE_MAX_CONNECTIONS must be at least 1"));
        }

        let thresholds = [
            ("FSSAI_SODIUM_LIMIT_MG", self.compliance.sodium_mg),
            ("FSSAI_SUGAR_LIMIT_G", self.compliance.sugar_g),
            ("FSSAI_SATURATED_FAT_LIMIT_G", self.compliance.saturated_fat_g),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow!("{name} must be a non-negative number"));
            }
        }

        if self.cors_origins.is_empty() {
            return Err(anyhow!("CORS_ORIGINS must list at least one origin"));
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "NutriLabel Server Configuration:\n\
             - Environment: {}\n\
             - HTTP: {}:{}\n\
             - Database: {} (pool {}, auto-seed {})\n\
             - LLM Provider: {} ({})\n\
             - LLM Retries: {} attempts, {}ms backoff\n\
             - FSSAI Limits: sodium {}mg, sugar {}g, saturated fat {}g\n\
             - CORS Origins: {}",
            self.environment,
            self.host,
            self.http_port,
            if self.database.url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            self.database.max_connections,
            self.database.auto_seed,
            self.llm.provider,
            if self.llm.is_enabled() {
                "Enabled"
            } else {
                "Disabled"
            },
            self.llm.max_attempts,
            self.llm.retry_backoff_ms,
            self.compliance.sodium_mg,
            self.compliance.sugar_g,
            self.compliance.saturated_fat_g,
            self.cors_origins.join(", ")
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Environment variable that is set and not blank
fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
