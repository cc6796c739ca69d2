// ABOUTME: Centralized resource container shared by every HTTP handler
// ABOUTME: Owns the database, the staged nutrition analyzer, and the loaded configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and handed to the router as `Arc<ServerResources>`.

use std::sync::Arc;

use nutrilabel_core::errors::AppResult;
use nutrilabel_intelligence::{ComplianceEvaluator, NutritionTable};
use tracing::{info, warn};

use crate::analysis::{NutritionAnalyzer, RemoteEstimator};
use crate::config::ServerConfig;
use crate::database::Database;
use crate::llm::{provider_from_config, LlmProvider};

/// Shared server state
#[derive(Clone)]
pub struct ServerResources {
    /// Ingredient store and recipe history
    pub database: Database,
    /// Staged analysis pipeline
    pub analyzer: NutritionAnalyzer,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources, building the remote provider from `config.llm`
    ///
    /// # Errors
    ///
    /// Returns an error if the configured LLM provider cannot be constructed
    pub fn new(database: Database, config: Arc<ServerConfig>) -> AppResult<Self> {
        let provider = provider_from_config(&config.llm)?;
        if provider.is_none() {
            warn!(
                provider = %config.llm.provider,
                "Remote estimation disabled; analysis uses the ingredient store and static table"
            );
        }
        Ok(Self::with_provider(database, config, provider))
    }

    /// Assemble resources around an explicit provider (or none)
    #[must_use]
    pub fn with_provider(
        database: Database,
        config: Arc<ServerConfig>,
        provider: Option<Arc<dyn LlmProvider>>,
    ) -> Self {
        let mut analyzer = NutritionAnalyzer::new(
            Arc::new(database.ingredients()),
            Arc::new(NutritionTable::builtin()),
            ComplianceEvaluator::new(config.compliance),
        );

        if let Some(provider) = provider {
            let estimator = RemoteEstimator::from_config(provider, &config.llm);
            info!(provider = estimator.provider_name(), "Remote estimation enabled");
            analyzer = analyzer.with_estimator(estimator);
        }

        Self {
            database,
            analyzer,
            config,
        }
    }
}
