//! Minimal OpenAI client for problem generation.
//!
//! We only call chat.completions and request a strict JSON object. The raw
//! completion text is returned untouched; sanitizing and parsing it is the
//! generator's job. Calls are instrumented and log model name, latency and
//! token usage (not contents).
//!
//! NOTE: We never log the API key.

use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::GenerationError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  api_key: String,
  pub base_url: String,
  pub model: String,
  pub timeout: Duration,
}

impl OpenAI {
  pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self, GenerationError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(Self {
      client,
      api_key: api_key.into(),
      base_url: base_url.into().trim_end_matches('/').to_string(),
      model: model.into(),
      timeout,
    })
  }

  /// Construct the client if we find a non-empty OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty())?;
    let base_url = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
    let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
    let timeout_secs = std::env::var("OPENAI_TIMEOUT_SECS")
      .ok()
      .and_then(|s| s.parse::<u64>().ok())
      .filter(|s| *s > 0)
      .unwrap_or(DEFAULT_TIMEOUT_SECS);

    match Self::new(api_key, base_url, model, Duration::from_secs(timeout_secs)) {
      Ok(oa) => Some(oa),
      Err(e) => {
        warn!(target: "math_challenge_backend", error = %e, "Failed to build OpenAI HTTP client");
        None
      }
    }
  }

  /// JSON-object chat completion: one choice, returned as raw text.
  #[instrument(level = "info", skip(self, system, user), fields(model = %self.model))]
  pub async fn chat_json_text(&self, system: &str, user: &str, temperature: f32) -> Result<String, GenerationError> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      n: 1,
      response_format: Some(ResponseFormat { r#type: "json_object".into() }),
    };

    let start = Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "math-challenge-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      let message = extract_openai_error(&body).unwrap_or(body);
      return Err(GenerationError::Http { status, message });
    }

    let body: ChatCompletionResponse = res.json().await?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, elapsed = ?start.elapsed(), "OpenAI usage");
    }

    body.choices.into_iter().next()
      .and_then(|c| c.message.content)
      .filter(|t| !t.trim().is_empty())
      .ok_or(GenerationError::EmptyCompletion)
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  n: u8,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_format: Option<ResponseFormat>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }
#[derive(Serialize)]
struct ResponseFormat { #[serde(rename = "type")] r#type: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  #[serde(default)] choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
  use super::*;
  use wiremock::matchers::{body_partial_json, header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn client_for(server: &MockServer, timeout: Duration) -> OpenAI {
    OpenAI::new("test-key", format!("{}/v1", server.uri()), "gpt-4o", timeout).unwrap()
  }

  #[tokio::test]
  async fn returns_raw_completion_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/v1/chat/completions"))
      .and(header("Authorization", "Bearer test-key"))
      .and(body_partial_json(serde_json::json!({
        "model": "gpt-4o",
        "n": 1,
        "response_format": {"type": "json_object"}
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": "{\"question\": \"q\"}"}}],
        "usage": {"prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17}
      })))
      .mount(&server)
      .await;

    let text = client_for(&server, Duration::from_secs(5)).chat_json_text("sys", "user", 0.7).await.unwrap();
    assert_eq!(text, "{\"question\": \"q\"}");
  }

  #[tokio::test]
  async fn http_error_surfaces_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/v1/chat/completions"))
      .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
        "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
      })))
      .mount(&server)
      .await;

    let err = client_for(&server, Duration::from_secs(5)).chat_json_text("s", "u", 0.7).await.unwrap_err();
    match err {
      GenerationError::Http { status, message } => {
        assert_eq!(status, 401);
        assert_eq!(message, "Incorrect API key provided");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[tokio::test]
  async fn missing_content_is_empty_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/v1/chat/completions"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
      })))
      .mount(&server)
      .await;

    let err = client_for(&server, Duration::from_secs(5)).chat_json_text("s", "u", 0.7).await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyCompletion));
  }

  #[tokio::test]
  async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/v1/chat/completions"))
      .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
      .mount(&server)
      .await;

    let err = client_for(&server, Duration::from_millis(200)).chat_json_text("s", "u", 0.7).await.unwrap_err();
    assert!(matches!(err, GenerationError::Timeout), "got {err:?}");
  }
}
