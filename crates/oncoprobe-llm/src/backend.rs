//! Generative backend trait and concrete implementations.
//!
//! Backends:
//!   GeminiBackend           — Google Gemini generateContent API (default)
//!   OpenAiCompatibleBackend — any /v1/chat/completions endpoint (Ollama,
//!                             LMStudio, vLLM, OpenRouter, …)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use oncoprobe_common::sandbox::SandboxClient;
use oncoprobe_common::OncoprobeError;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("request blocked by sandbox policy: {0}")]
    Blocked(String),
    #[error("API error [{status}]: {message}")]
    Api { status: u16, message: String },
    #[error("empty completion from model {0}")]
    EmptyCompletion(String),
}

impl From<OncoprobeError> for LlmError {
    fn from(e: OncoprobeError) -> Self {
        LlmError::Blocked(e.to_string())
    }
}

// ── Completion ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    pub text: String,
    pub model: String,
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Send a single-turn prompt and return the completion text.
    async fn complete(&self, prompt: &str) -> Result<Completion, LlmError>;
    fn model_id(&self) -> &str;
}

async fn read_json_checked(resp: reqwest::Response) -> Result<serde_json::Value, LlmError> {
    let status = resp.status().as_u16();
    let body: serde_json::Value = resp.json().await?;
    if status >= 400 {
        let message = body["error"]["message"]
            .as_str()
            .or_else(|| body["message"].as_str())
            .unwrap_or("unknown API error")
            .to_string();
        return Err(LlmError::Api { status, message });
    }
    Ok(body)
}

// ── Google Gemini ─────────────────────────────────────────────────────────────

pub struct GeminiBackend {
    pub model: String,
    base_url: String,
    api_key: String,
    client: SandboxClient,
}

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

impl GeminiBackend {
    pub fn new(client: SandboxClient, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Point the backend at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    async fn complete(&self, prompt: &str) -> Result<Completion, LlmError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        });

        let resp = self.client.post(&url)?.json(&body).send().await?;
        let json = read_json_checked(resp).await?;

        let text = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();
        if text.is_empty() {
            return Err(LlmError::EmptyCompletion(self.model.clone()));
        }

        Ok(Completion { text, model: self.model.clone() })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ── OpenAI-compatible (Ollama, LMStudio, vLLM, OpenRouter, …) ────────────────

pub struct OpenAiCompatibleBackend {
    pub base_url: String,
    pub model: String,
    api_key: Option<String>,
    client: SandboxClient,
}

impl OpenAiCompatibleBackend {
    pub fn new(
        client: SandboxClient,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self { base_url: base_url.into(), model: model.into(), api_key, client }
    }
}

#[async_trait]
impl LlmBackend for OpenAiCompatibleBackend {
    async fn complete(&self, prompt: &str) -> Result<Completion, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": &self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let mut req = self.client.post(&url)?.json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let json = read_json_checked(req.send().await?).await?;

        let text = json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();
        if text.is_empty() {
            return Err(LlmError::EmptyCompletion(self.model.clone()));
        }

        let model = json["model"].as_str().unwrap_or(&self.model).to_string();
        Ok(Completion { text, model })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
