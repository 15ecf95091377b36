//! Minimal client for the Gemini `generateContent` API.

use serde::Deserialize;
use tracing::debug;

use crate::config::RemoteConfig;
use crate::error::{ConfigError, RemoteError, RemoteResult};

/// Text-generation client shared by the analyzer and the ranker.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// API key. `None` makes every call return [`RemoteError::Unavailable`].
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// Generation model.
    model: String,

    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        let defaults = RemoteConfig::default();
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: defaults.base_url,
            model: defaults.generation_model,
            client: reqwest::Client::new(),
        }
    }

    /// Build a client from configuration, with an explicitly supplied key.
    pub fn from_config(
        config: &RemoteConfig,
        api_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(api_key)
            .with_base_url(&config.base_url)
            .with_model(&config.generation_model)
            .with_client(config.http_client()?))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a single-turn prompt and return the first candidate's text.
    pub async fn generate_text(&self, prompt: &str) -> RemoteResult<String> {
        let api_key = self.api_key.as_ref().ok_or(RemoteError::Unavailable)?;

        debug!("Calling generateContent with model: {}", self.model);

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, self.model))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RemoteError::CallFailed(format!(
                "generateContent returned {status}: {error_text}"
            )));
        }

        let payload: GenerateContentResponse = response.json().await?;
        payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| RemoteError::Malformed("response has no candidate text".to_string()))
    }
}

/// generateContent response format.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}
