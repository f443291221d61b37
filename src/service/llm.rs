//! Shared LLM client and interaction utilities
//!
//! Provides the single seam to the hosted Gemini API. Services depend on the
//! [`TextCompletion`] trait rather than the concrete client, so tests can
//! inject scripted completers and nothing in the codebase holds an ambient
//! client instance.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::model::GeminiConfig;

/// Generation parameters fixed per call site.
///
/// Classification sub-calls use low temperature and a short output budget;
/// generation calls run hotter and longer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Transport-level failure of a model call.
///
/// These are never absorbed into degraded results; they propagate to the
/// caller as request failures. Only malformed *content* is handled by the
/// response resolution pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LlmError {
    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("model reply contained no text candidates")]
    EmptyReply,
}

/// Opaque text-completion function: prompt and generation parameters in, raw
/// text out.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, prompt: &str, params: GenerationParams) -> Result<String, LlmError>;
}

/// Gemini REST client using the non-streaming `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[async_trait]
impl TextCompletion for GeminiClient {
    async fn complete(&self, prompt: &str, params: GenerationParams) -> Result<String, LlmError> {
        let body = build_request_body(prompt, params);

        let response = self.http.post(self.endpoint()).json(&body).send().await?;
        let status = response.status();
        let payload: Value = response.json().await?;

        if !status.is_success() {
            let message = payload["error"]["message"]
                .as_str()
                .unwrap_or("unknown error")
                .to_string();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        reply_text(&payload).ok_or(LlmError::EmptyReply)
    }
}

/// Build the `generateContent` request body.
fn build_request_body(prompt: &str, params: GenerationParams) -> Value {
    serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "temperature": params.temperature,
            "maxOutputTokens": params.max_output_tokens
        }
    })
}

/// Concatenate the text parts of the first candidate, if any.
fn reply_text(payload: &Value) -> Option<String> {
    let parts = payload["candidates"]
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_carries_prompt_and_params() {
        let body = build_request_body(
            "classify this",
            GenerationParams {
                temperature: 0.0,
                max_output_tokens: 16,
            },
        );

        assert_eq!(body["contents"][0]["parts"][0]["text"], "classify this");
        assert_eq!(body["generationConfig"]["temperature"], 0.0);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 16);
    }

    #[test]
    fn test_reply_text_concatenates_parts() {
        let payload = json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "Hello "}, {"text": "world"}]
                }
            }]
        });
        assert_eq!(reply_text(&payload).as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_reply_text_handles_missing_candidates() {
        assert_eq!(reply_text(&json!({})), None);
        assert_eq!(reply_text(&json!({"candidates": []})), None);
        assert_eq!(
            reply_text(&json!({"candidates": [{"content": {"parts": []}}]})),
            None
        );
    }

    #[test]
    fn test_endpoint_joins_base_url_cleanly() {
        let client = GeminiClient::new(&GeminiConfig {
            api_key: "k".to_string(),
            model: "gemini-2.0-flash".to_string(),
            base_url: "http://localhost:9090/".to_string(),
        });
        assert_eq!(
            client.endpoint(),
            "http://localhost:9090/v1beta/models/gemini-2.0-flash:generateContent?key=k"
        );
    }
}
