// ABOUTME: LLM provider abstraction for structured nutrition estimation
// ABOUTME: Defines the provider contract plus Gemini and OpenAI-compatible implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Interface
//!
//! The remote estimation stage talks to a language model through [`LlmProvider`].
//! Requests carry system and user messages plus an optional JSON schema that the
//! provider forwards using its native structured-output mechanism.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nutrilabel_server::llm::{ChatMessage, ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new(vec![
//!         ChatMessage::system("Reply with JSON."),
//!         ChatMessage::user("Estimate nutrition for 100g rice."),
//!     ]);
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod gemini;
mod openai_compatible;
pub mod prompts;

pub use gemini::GeminiProvider;
pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};

use std::sync::Arc;

use async_trait::async_trait;
use nutrilabel_core::errors::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::config::{LlmConfig, LlmProviderType};

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
    /// Assistant response message
    Assistant,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Named JSON schema the model's reply must follow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSchema {
    /// Schema name (required by `OpenAI`-style `json_schema` formats)
    pub name: String,
    /// JSON Schema document
    pub schema: Value,
}

/// Configuration for a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Temperature for response randomness (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Structured output schema
    pub response_schema: Option<ResponseSchema>,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            response_schema: None,
        }
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Require a JSON reply matching `schema`
    #[must_use]
    pub fn with_response_schema(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.response_schema = Some(ResponseSchema {
            name: name.into(),
            schema,
        });
        self
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated message content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (stop, length, etc.)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for chat completion
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "gemini", "ollama")
    fn name(&self) -> &'static str;

    /// Model every request is sent to
    fn default_model(&self) -> &str;

    /// Perform a chat completion
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}

/// Build the provider selected by `config`
///
/// Returns `Ok(None)` when the remote stage is disabled (provider `none`, or
/// Gemini without an API key).
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be created
pub fn provider_from_config(
    config: &LlmConfig,
) -> Result<Option<Arc<dyn LlmProvider>>, AppError> {
    match config.provider {
        LlmProviderType::None => Ok(None),
        LlmProviderType::Gemini => config
            .gemini_api_key
            .as_ref()
            .map(|key| -> Result<Arc<dyn LlmProvider>, AppError> {
                let provider = GeminiProvider::new(key)?.with_default_model(&config.gemini_model);
                info!(model = %config.gemini_model, "Remote estimation via Gemini");
                Ok(Arc::new(provider))
            })
            .transpose(),
        LlmProviderType::Local => {
            let provider = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::from_llm_config(
                config,
            ))?;
            Ok(Some(Arc::new(provider)))
        }
    }
}
