//! API-backed capability implementations (OpenAI-compatible).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::CapabilityError;
use crate::query::{IntentKind, NormalizedQuery, ResultSet};

use super::json::extract_json;
use super::prompts::{
    EXPLANATION_PROMPT, FORMAT_BACK_PROMPT, NORMALIZE_PROMPT, SQL_GENERATION_PROMPT,
};
use super::traits::{Explainer, Formatter, Normalizer, SqlGenerator};

// ============================================================================
// Chat Completions Provider
// ============================================================================

/// OpenAI-compatible chat-completions client shared by all API-backed
/// capabilities. Requests run at temperature 0.
pub struct ApiTextProvider {
    client: Client,
    base_url: String,
    model: String,
    sql_model: String,
    api_key: String,
}

/// Chat completion request format.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completion response format.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// API error response format.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl ApiTextProvider {
    /// Create a provider from configuration.
    pub fn from_config(config: &LlmConfig) -> crate::error::Result<Self> {
        let api_key = config.resolve_api_key()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CapabilityError::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            sql_model: config.sql_model().to_string(),
            api_key,
        })
    }

    /// Send a system prompt + user input pair and return the model's text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, CapabilityError> {
        self.complete_with(&self.model, system, user).await
    }

    /// Same as [`complete`](Self::complete) on the SQL generation model.
    pub async fn complete_sql(&self, system: &str, user: &str) -> Result<String, CapabilityError> {
        self.complete_with(&self.sql_model, system, user).await
    }

    async fn complete_with(
        &self,
        model: &str,
        system: &str,
        user: &str,
    ) -> Result<String, CapabilityError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CapabilityError::Timeout
                } else if e.is_connect() {
                    CapabilityError::Api(format!("Connection failed: {}", e))
                } else {
                    CapabilityError::Api(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let result: ChatResponse = response
                .json()
                .await
                .map_err(|e| CapabilityError::MalformedResponse(e.to_string()))?;

            let content = result
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content)
                .ok_or_else(|| {
                    CapabilityError::MalformedResponse("no choices in response".to_string())
                })?;

            Ok(content.trim().to_string())
        } else if status.as_u16() == 429 {
            Err(CapabilityError::RateLimited)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_text) {
                Err(CapabilityError::Api(format!(
                    "API error ({}): {}",
                    status, error_response.error.message
                )))
            } else {
                Err(CapabilityError::Api(format!(
                    "API error ({}): {}",
                    status, error_text
                )))
            }
        }
    }

    #[cfg(test)]
    fn base_url(&self) -> &str {
        &self.base_url
    }
}

// ============================================================================
// Capability Adapters
// ============================================================================

/// API-backed query normalizer. Validates the response against the strict
/// JSON contract at the boundary; anything malformed is a capability error,
/// never a parsing crash further in.
pub struct ApiNormalizer {
    provider: Arc<ApiTextProvider>,
}

impl ApiNormalizer {
    pub fn new(provider: Arc<ApiTextProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Normalizer for ApiNormalizer {
    async fn normalize(&self, text: &str) -> Result<NormalizedQuery, CapabilityError> {
        let raw = self.provider.complete(NORMALIZE_PROMPT, text).await?;
        let value = extract_json(&raw)?;

        let english_text = value
            .get("normalized_english")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                CapabilityError::MalformedResponse(format!(
                    "missing normalized_english in: {raw}"
                ))
            })?
            .to_string();

        let language_code = value
            .get("original_language_code")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("unknown")
            .to_string();

        let style = value
            .get("style")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("english")
            .to_lowercase();

        let intent = match value.get("type").and_then(|v| v.as_str()) {
            Some(t) if t.trim().eq_ignore_ascii_case("personal") => IntentKind::Personal,
            _ => IntentKind::Business,
        };

        Ok(NormalizedQuery {
            english_text,
            language_code,
            style,
            intent,
        })
    }
}

/// API-backed SQL generator for compound queries.
pub struct ApiSqlGenerator {
    provider: Arc<ApiTextProvider>,
}

impl ApiSqlGenerator {
    pub fn new(provider: Arc<ApiTextProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl SqlGenerator for ApiSqlGenerator {
    async fn generate(&self, query: &str) -> Result<String, CapabilityError> {
        self.provider.complete_sql(SQL_GENERATION_PROMPT, query).await
    }
}

/// API-backed explanation generator.
pub struct ApiExplainer {
    provider: Arc<ApiTextProvider>,
}

impl ApiExplainer {
    pub fn new(provider: Arc<ApiTextProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Explainer for ApiExplainer {
    async fn explain(&self, query: &str, results: &ResultSet) -> Result<String, CapabilityError> {
        let data = serde_json::to_string(results)
            .map_err(|e| CapabilityError::Api(format!("Failed to encode results: {}", e)))?;
        let input = format!("User query: {query}\nData: {data}");
        self.provider.complete(EXPLANATION_PROMPT, &input).await
    }
}

/// API-backed answer formatter.
pub struct ApiFormatter {
    provider: Arc<ApiTextProvider>,
}

impl ApiFormatter {
    pub fn new(provider: Arc<ApiTextProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Formatter for ApiFormatter {
    async fn format(
        &self,
        answer: &str,
        style: &str,
        language_code: &str,
    ) -> Result<String, CapabilityError> {
        let payload = format!(
            "original_style: {style}\noriginal_language_code: {language_code}\nanswer_english: {answer}"
        );
        self.provider.complete(FORMAT_BACK_PROMPT, &payload).await
    }
}
