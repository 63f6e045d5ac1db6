//! LlmApiTransform - hosted-LLM implementation of a text transform.
//!
//! Calls the messages REST API directly without CLI dependency. One
//! instance backs one capability; the capability's instruction profile
//! is sent as the system prompt with every request.

use crate::config::ApiCredentials;
use crate::profiles::{profile, CapabilityProfile};
use async_trait::async_trait;
use lingo_core::{LingoError, Result, TextTransform, TransformKind};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Text transform backed by a hosted LLM messages API.
#[derive(Clone)]
pub struct LlmApiTransform {
    client: Client,
    api_key: String,
    model: String,
    profile: CapabilityProfile,
    max_tokens: u32,
}

impl LlmApiTransform {
    /// Creates a transform for one capability with the provided API key
    /// and model.
    pub fn new(kind: TransformKind, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            profile: profile(kind),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Creates a transform using credentials from
    /// `~/.config/lingo/secret.json` or environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`LingoError::Config`] if no API key is configured.
    pub fn try_from_env(kind: TransformKind) -> Result<Self> {
        let credentials = ApiCredentials::load()?;
        Ok(Self::new(kind, credentials.api_key, credentials.model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// The capability this transform implements.
    pub fn kind(&self) -> TransformKind {
        self.profile.kind
    }

    async fn send_request(&self, body: &CreateMessageRequest) -> Result<String> {
        let kind = self.profile.kind;

        let response = self
            .client
            .post(BASE_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| {
                LingoError::unavailable(kind, format!("API request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(kind, status, body_text, retry_after));
        }

        let parsed: CreateMessageResponse = response.json().await.map_err(|err| {
            LingoError::unavailable(kind, format!("Failed to parse API response: {err}"))
        })?;

        extract_text_response(kind, parsed)
    }
}

#[async_trait]
impl TextTransform for LlmApiTransform {
    fn description(&self) -> &str {
        self.profile.description
    }

    async fn apply(&self, text: &str) -> Result<String> {
        let request = CreateMessageRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: text.to_string(),
            }],
            max_tokens: self.max_tokens,
            system: Some(self.profile.instruction.to_string()),
        };

        tracing::debug!(
            "[LlmApiTransform] {} request, model {}",
            self.profile.kind,
            self.model
        );

        self.send_request(&request).await.map(|body| {
            let trimmed = body.trim();
            trimmed.to_string()
        })
    }
}

#[derive(Serialize)]
struct CreateMessageRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct CreateMessageResponse {
    content: Vec<ContentBlockResponse>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlockResponse {
    #[serde(rename = "text")]
    Text { text: String },
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(kind: TransformKind, response: CreateMessageResponse) -> Result<String> {
    response
        .content
        .into_iter()
        .find_map(|block| match block {
            ContentBlockResponse::Text { text } => Some(text),
        })
        .ok_or_else(|| {
            LingoError::unavailable(kind, "API returned no text in the response content")
        })
}

fn map_http_error(
    kind: TransformKind,
    status: StatusCode,
    body: String,
    retry_after: Option<u64>,
) -> LingoError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    let message = match retry_after {
        Some(seconds) if status == StatusCode::TOO_MANY_REQUESTS => {
            format!("HTTP {}: {} (retry after {}s)", status.as_u16(), message, seconds)
        }
        _ => format!("HTTP {}: {}", status.as_u16(), message),
    };

    LingoError::unavailable(kind, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_http_error_extracts_api_message() {
        let body = r#"{"error":{"type":"rate_limit_error","message":"Rate limited"}}"#;

        let err = map_http_error(
            TransformKind::Grammar,
            StatusCode::TOO_MANY_REQUESTS,
            body.to_string(),
            Some(30),
        );

        match err {
            LingoError::TransformUnavailable { kind, message } => {
                assert_eq!(kind, TransformKind::Grammar);
                assert_eq!(message, "HTTP 429: Rate limited (retry after 30s)");
            }
            other => panic!("expected TransformUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_map_http_error_falls_back_to_raw_body() {
        let err = map_http_error(
            TransformKind::Tenses,
            StatusCode::BAD_GATEWAY,
            "upstream gone".to_string(),
            None,
        );

        match err {
            LingoError::TransformUnavailable { message, .. } => {
                assert_eq!(message, "HTTP 502: upstream gone");
            }
            other => panic!("expected TransformUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_text_response_requires_text_block() {
        let empty = CreateMessageResponse { content: vec![] };

        let err = extract_text_response(TransformKind::Explanation, empty).unwrap_err();
        assert!(err.is_unavailable());

        let ok = extract_text_response(
            TransformKind::Explanation,
            CreateMessageResponse {
                content: vec![ContentBlockResponse::Text {
                    text: "hello".to_string(),
                }],
            },
        )
        .unwrap();
        assert_eq!(ok, "hello");
    }
}
