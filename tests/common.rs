// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, scripted LLM providers, and fixture tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `nutrilabel_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use nutrilabel_core::errors::{AppError, AppResult};
use nutrilabel_core::models::{NutrientProfile, ResolutionResult, ResolutionSource};
use nutrilabel_intelligence::{ComplianceEvaluator, IngredientResolver, NutritionTable};
use nutrilabel_server::analysis::{NutritionAnalyzer, RemoteEstimator};
use nutrilabel_server::config::{LlmProviderType, ServerConfig};
use nutrilabel_server::database::Database;
use nutrilabel_server::llm::{ChatRequest, ChatResponse, LlmProvider};
use nutrilabel_server::resources::ServerResources;
use serde_json::json;
use tracing_subscriber::EnvFilter;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Fresh in-memory database with migrations applied
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::in_memory().await?)
}

/// In-memory database holding the reference seed ingredients
pub async fn create_seeded_database() -> Result<Database> {
    let database = create_test_database().await?;
    database.ingredients().seed_defaults().await?;
    Ok(database)
}

/// Configuration for tests: remote estimation off, no retry delay
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.llm.provider = LlmProviderType::None;
    config.llm.max_attempts = 2;
    config.llm.retry_backoff_ms = 0;
    config
}

/// Shared resources over `database`, with an optional scripted provider
pub fn test_resources(
    database: Database,
    provider: Option<Arc<ScriptedProvider>>,
) -> Arc<ServerResources> {
    Arc::new(ServerResources::with_provider(
        database,
        Arc::new(test_config()),
        provider.map(|p| p as Arc<dyn LlmProvider>),
    ))
}

/// Small static table with the three entries the pipeline tests rely on
pub fn fixture_table() -> Arc<NutritionTable> {
    Arc::new(NutritionTable::from_entries([
        ("rice", NutrientProfile::new(130.0, 2.7, 0.3, 0.1, 28.0, 0.1, 1.0, 0.4)),
        ("chicken", NutrientProfile::new(239.0, 27.0, 14.0, 3.8, 0.0, 0.0, 82.0, 0.0)),
        ("salt", NutrientProfile::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 38758.0, 0.0)),
    ]))
}

/// Analyzer over an arbitrary store and the fixture table
pub fn analyzer_with(
    store: Arc<dyn IngredientResolver>,
    provider: Option<Arc<ScriptedProvider>>,
) -> NutritionAnalyzer {
    let analyzer =
        NutritionAnalyzer::new(store, fixture_table(), ComplianceEvaluator::default());
    match provider {
        Some(provider) => analyzer.with_estimator(
            RemoteEstimator::new(provider)
                .with_max_attempts(2)
                .with_backoff(Duration::ZERO),
        ),
        None => analyzer,
    }
}

/// Model reply in the estimation schema
pub fn estimate_reply(
    calories: f64,
    protein: f64,
    fat: f64,
    carbohydrates: f64,
    compliant: bool,
    notes: &str,
) -> String {
    json!({
        "calories": calories,
        "protein": protein,
        "fat": fat,
        "saturatedFat": 0.0,
        "carbohydrates": carbohydrates,
        "sugar": 0.0,
        "sodium": 0.0,
        "fiber": 0.0,
        "fssaiCompliant": compliant,
        "fssaiNotes": notes
    })
    .to_string()
}

/// LLM provider that replays canned replies and counts calls
///
/// `None` entries (and an exhausted script) fail like an unreachable service.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Option<String>>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    /// Provider answering with `replies` in order
    pub fn new(replies: impl IntoIterator<Item = Option<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: AtomicUsize::new(0),
        })
    }

    /// Provider that always succeeds with `reply`
    pub fn always(reply: &str) -> Arc<Self> {
        Self::new(vec![Some(reply.to_owned()); 8])
    }

    /// Provider whose every call fails
    pub fn failing() -> Arc<Self> {
        Self::new(Vec::new())
    }

    /// Number of completed `complete` calls
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.replies.lock().unwrap().pop_front().flatten();
        next.map_or_else(
            || Err(AppError::rate_limited("AI service quota exceeded")),
            |content| {
                Ok(ChatResponse {
                    content,
                    model: "scripted-model".to_owned(),
                    usage: None,
                    finish_reason: Some("stop".to_owned()),
                })
            },
        )
    }
}

/// Ingredient store that is always unreachable
pub struct UnreachableStore;

#[async_trait]
impl IngredientResolver for UnreachableStore {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Database
    }

    async fn resolve(&self, _name: &str) -> AppResult<ResolutionResult> {
        Err(AppError::database("connection refused"))
    }
}
