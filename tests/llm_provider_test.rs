// ABOUTME: Integration tests for LLM provider selection and the remote estimation request
// ABOUTME: Validates provider_from_config and what the estimator sends to a provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use common::estimate_reply;
use nutrilabel_core::errors::AppError;
use nutrilabel_core::models::IngredientLine;
use nutrilabel_server::analysis::RemoteEstimator;
use nutrilabel_server::config::{LlmConfig, LlmProviderType};
use nutrilabel_server::llm::{
    provider_from_config, ChatRequest, ChatResponse, LlmProvider, MessageRole,
};

/// Provider that records every request and answers with a fixed reply
struct RecordingProvider {
    requests: Mutex<Vec<ChatRequest>>,
    reply: String,
}

#[async_trait]
impl LlmProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn default_model(&self) -> &str {
        "recording-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(ChatResponse {
            content: self.reply.clone(),
            model: "recording-model".to_owned(),
            usage: None,
            finish_reason: None,
        })
    }
}

// ============================================================================
// Provider selection
// ============================================================================

#[test]
fn test_disabled_provider_yields_none() {
    let config = LlmConfig {
        provider: LlmProviderType::None,
        ..LlmConfig::default()
    };
    assert!(provider_from_config(&config).unwrap().is_none());
}

#[test]
fn test_gemini_without_key_yields_none() {
    let config = LlmConfig {
        provider: LlmProviderType::Gemini,
        gemini_api_key: None,
        ..LlmConfig::default()
    };
    assert!(!config.is_enabled());
    assert!(provider_from_config(&config).unwrap().is_none());
}

#[test]
fn test_gemini_with_key() {
    let config = LlmConfig {
        provider: LlmProviderType::Gemini,
        gemini_api_key: Some("test-key".to_owned()),
        gemini_model: "gemini-2.5-flash".to_owned(),
        ..LlmConfig::default()
    };

    let provider = provider_from_config(&config).unwrap().unwrap();
    assert_eq!(provider.name(), "gemini");
    assert_eq!(provider.default_model(), "gemini-2.5-flash");
}

#[test]
fn test_local_provider_named_after_port() {
    let config = LlmConfig {
        provider: LlmProviderType::Local,
        local_base_url: "http://localhost:8000/v1".to_owned(),
        local_model: "qwen2.5".to_owned(),
        ..LlmConfig::default()
    };

    let provider = provider_from_config(&config).unwrap().unwrap();
    assert_eq!(provider.name(), "vllm");
    assert_eq!(provider.default_model(), "qwen2.5");
}

#[test]
fn test_provider_type_aliases() {
    assert_eq!(LlmProviderType::parse("Ollama"), Some(LlmProviderType::Local));
    assert_eq!(LlmProviderType::parse(" google "), Some(LlmProviderType::Gemini));
    assert_eq!(LlmProviderType::parse("off"), Some(LlmProviderType::None));
    assert_eq!(LlmProviderType::parse("anthropic"), None);
    assert_eq!(LlmProviderType::Local.to_string(), "local");
}

// ============================================================================
// Estimation request
// ============================================================================

#[tokio::test]
async fn test_estimator_sends_structured_request() {
    let provider = Arc::new(RecordingProvider {
        requests: Mutex::new(Vec::new()),
        reply: format!(
            "Here you go:\n```json\n{}\n```",
            estimate_reply(150.0, 5.0, 3.0, 25.0, true, "ok")
        ),
    });
    let estimator = RemoteEstimator::new(Arc::clone(&provider) as Arc<dyn LlmProvider>);

    let estimate = estimator
        .estimate(&[IngredientLine::new("Poha", 1.0, "cup")], 200.0)
        .await
        .unwrap();
    assert!((estimate.nutrients.calories - 150.0).abs() < f64::EPSILON);

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, MessageRole::System);
    assert_eq!(request.messages[1].role, MessageRole::User);
    assert!(request.messages[1].content.contains("- 1 cup Poha"));
    assert!(request.messages[1].content.contains("Serving size: 200g"));

    let schema = request.response_schema.as_ref().unwrap();
    let required = schema.schema["required"].as_array().unwrap();
    assert!(required.iter().any(|field| field == "fssaiCompliant"));
}

#[tokio::test]
async fn test_estimator_gives_up_after_budget() {
    let provider = Arc::new(RecordingProvider {
        requests: Mutex::new(Vec::new()),
        reply: "not json".to_owned(),
    });
    let estimator = RemoteEstimator::new(Arc::clone(&provider) as Arc<dyn LlmProvider>)
        .with_max_attempts(3)
        .with_backoff(Duration::ZERO);

    let result = estimator
        .estimate(&[IngredientLine::grams("rice", 100.0)], 100.0)
        .await;

    assert!(result.is_err());
    assert_eq!(provider.requests.lock().unwrap().len(), 3);
}
