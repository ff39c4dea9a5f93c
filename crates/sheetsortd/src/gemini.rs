//! Gemini text-generation backend.
//!
//! The classifier only needs "prompt in, free text out", so the backend sits
//! behind the [`LlmBackend`] trait; tests drive the classifier with fakes
//! instead of a live endpoint.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use sheetsort_common::LlmError;
use std::time::Duration;
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Opaque text-generation capability.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Generate free text for a prompt with the named model.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError>;
}

/// Gemini REST client.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl GeminiClient {
    /// Build a client. `api_key = None` produces a permanently disabled
    /// backend; every call then fails and the handler files the post under
    /// the default category.
    pub fn new(api_key: Option<String>, timeout_secs: u64) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::Http(e.to_string()))?;

        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl LlmBackend for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::Disabled)?;

        debug!("Calling Gemini model: {}", model);

        let url = format!("{}/{}:generateContent?key={}", GEMINI_API_BASE, model, api_key);
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if status == StatusCode::TOO_MANY_REQUESTS || text.contains("RESOURCE_EXHAUSTED") {
                return Err(LlmError::ResourceExhausted);
            }
            return Err(LlmError::Http(format!("{}: {}", status, text)));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        let text = json
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.pointer("/content/parts/0/text"))
            .and_then(|t| t.as_str())
            .unwrap_or("");

        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        debug!("Gemini reply length: {}", text.len());
        Ok(text.to_string())
    }
}
