//! Language model integration
//!
//! Sends built prompts to an OpenAI-compatible completions endpoint.
//! The processor only sees the [`ModelInvoker`] trait, so tests can
//! substitute a scripted double.

use crate::error::ClipError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Opaque text generation collaborator
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Generate a completion for the prompt. Any transport, auth or
    /// rate-limit problem surfaces as [`ClipError::Model`].
    async fn generate(&self, prompt: &str) -> Result<String, ClipError>;
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

/// OpenAI-compatible completions client
#[derive(Clone)]
pub struct OpenAiClient {
    api_url: String,
    model: String,
    api_key: Option<String>,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
}

impl OpenAiClient {
    /// Create a client from config; the API key is read from the
    /// environment once at construction.
    pub fn new(config: &crate::config::Config) -> Self {
        Self {
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            api_key: std::env::var(API_KEY_ENV).ok(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// Health check - verify the endpoint is reachable
    pub async fn health_check(&self) -> bool {
        let client = reqwest::Client::new();
        let mut request = client
            .get(format!("{}/models", self.api_url))
            .timeout(Duration::from_secs(2));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        match request.send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl ModelInvoker for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ClipError> {
        let client = reqwest::Client::new();
        let mut request = client
            .post(format!("{}/completions", self.api_url))
            .json(&serde_json::json!({
                "model": self.model,
                "prompt": prompt,
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
            }))
            .timeout(self.timeout);

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClipError::Model(format!("request failed: {e}")))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| ClipError::Model(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            warn!("Model API error ({}): {}", status, body_text);
            return Err(ClipError::Model(format!("API error {status}: {body_text}")));
        }

        debug!("Model raw body: {}", body_text);

        let completion: CompletionResponse = serde_json::from_str(&body_text)
            .map_err(|e| ClipError::Model(format!("failed to decode response: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| ClipError::Model("response contained no choices".to_string()))
    }
}
