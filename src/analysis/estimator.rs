// ABOUTME: Whole-recipe nutrition estimation through a structured-output language model
// ABOUTME: Builds one prompt per recipe, parses the JSON reply, and retries with linear backoff
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Duration;

use nutrilabel_core::errors::{AppError, AppResult};
use nutrilabel_core::models::{AggregateProfile, IngredientLine, NutrientProfile};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use crate::config::LlmConfig;
use crate::constants::{defaults, limits};
use crate::llm::prompts::{recipe_prompt, NUTRITION_ESTIMATOR_PROMPT};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};

/// Schema name sent with structured-output requests
const SCHEMA_NAME: &str = "recipe_nutrition";

/// JSON Schema of the estimation reply
#[must_use]
pub fn nutrition_response_schema() -> Value {
    let number = json!({ "type": "number" });
    json!({
        "type": "object",
        "properties": {
            "calories": number,
            "protein": number,
            "fat": number,
            "saturatedFat": number,
            "carbohydrates": number,
            "sugar": number,
            "sodium": number,
            "fiber": number,
            "fssaiCompliant": { "type": "boolean" },
            "fssaiNotes": { "type": "string" }
        },
        "required": [
            "calories", "protein", "fat", "saturatedFat", "carbohydrates",
            "sugar", "sodium", "fiber", "fssaiCompliant", "fssaiNotes"
        ],
        "additionalProperties": false
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EstimatePayload {
    #[serde(flatten)]
    nutrients: NutrientProfile,
    fssai_compliant: bool,
    #[serde(default)]
    fssai_notes: String,
}

/// Per-100g estimate returned by the model
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteEstimate {
    /// Nutrients, clamped to be non-negative
    pub nutrients: NutrientProfile,
    /// Model's compliance verdict
    pub fssai_compliant: bool,
    /// Model's compliance notes
    pub fssai_notes: String,
}

impl RemoteEstimate {
    /// The model signalled that the input is not food: zero calories and
    /// macronutrients together with a non-compliant verdict
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        self.nutrients.has_zero_macros() && !self.fssai_compliant
    }

    /// Convert to the aggregate profile shape, rounded to 0.1
    #[must_use]
    pub fn into_profile(self) -> AggregateProfile {
        AggregateProfile {
            nutrients: self.nutrients.rounded(),
            fssai_compliant: self.fssai_compliant,
            fssai_notes: self.fssai_notes,
        }
    }
}

/// Parse a model reply into an estimate
///
/// Tolerates Markdown code fences and prose around the JSON object.
///
/// # Errors
///
/// Returns an error if no JSON object can be found or it lacks required fields
pub fn parse_estimate(content: &str) -> AppResult<RemoteEstimate> {
    let json_text = extract_json_object(content).ok_or_else(|| {
        AppError::external_service("LLM", "Reply did not contain a JSON object")
    })?;

    let payload: EstimatePayload = serde_json::from_str(json_text)?;
    Ok(RemoteEstimate {
        nutrients: payload.nutrients.sanitized(),
        fssai_compliant: payload.fssai_compliant,
        fssai_notes: payload.fssai_notes.trim().to_owned(),
    })
}

/// Slice from the first `{` to the last `}`
fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Remote structured estimation with a bounded retry budget
#[derive(Clone)]
pub struct RemoteEstimator {
    provider: Arc<dyn LlmProvider>,
    max_attempts: u32,
    backoff: Duration,
    temperature: f32,
}

impl RemoteEstimator {
    /// Create an estimator with default retry settings
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            max_attempts: defaults::LLM_MAX_ATTEMPTS,
            backoff: Duration::from_millis(defaults::LLM_RETRY_BACKOFF_MS),
            temperature: defaults::LLM_TEMPERATURE,
        }
    }

    /// Create an estimator using the retry budget from `config`
    #[must_use]
    pub fn from_config(provider: Arc<dyn LlmProvider>, config: &LlmConfig) -> Self {
        Self::new(provider)
            .with_max_attempts(config.max_attempts)
            .with_backoff(Duration::from_millis(config.retry_backoff_ms))
    }

    /// Set the attempt budget (clamped to 1..=5)
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.clamp(limits::MIN_LLM_ATTEMPTS, limits::MAX_LLM_ATTEMPTS);
        self
    }

    /// Set the backoff step; attempt `n` waits `n * backoff` before the next try
    #[must_use]
    pub const fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Name of the underlying provider
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Estimate per-100g nutrition for the whole recipe
    ///
    /// # Errors
    ///
    /// Returns the last failure once every attempt has failed
    #[instrument(skip(self, lines), fields(provider = self.provider.name(), lines = lines.len()))]
    pub async fn estimate(
        &self,
        lines: &[IngredientLine],
        serving_size_g: f64,
    ) -> AppResult<RemoteEstimate> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(NUTRITION_ESTIMATOR_PROMPT),
            ChatMessage::user(recipe_prompt(lines, serving_size_g)),
        ])
        .with_temperature(self.temperature)
        .with_response_schema(SCHEMA_NAME, nutrition_response_schema());

        let mut attempt = 1;
        loop {
            let result = self.attempt(&request).await;
            match result {
                Ok(estimate) => {
                    debug!(attempt, "Remote estimate parsed");
                    return Ok(estimate);
                }
                Err(e) if attempt < self.max_attempts => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Remote estimate failed, retrying"
                    );
                    sleep(self.backoff * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn attempt(&self, request: &ChatRequest) -> AppResult<RemoteEstimate> {
        let response = self.provider.complete(request).await?;
        parse_estimate(&response.content)
    }
}
