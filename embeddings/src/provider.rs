//! Where vectors come from.
//!
//! Two interchangeable strategies sit behind [`EmbeddingProvider`]: a
//! deterministic seeded embedder that needs no network, and the Gemini
//! text-embedding API. The remote provider never fails a request; on any
//! error it substitutes a random unit vector and marks the response as not
//! reproducible.

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::embedding::{Embedding, EmbeddingSpace};
use crate::error::{EmbeddingError, Result};
use crate::{CORPUS_DIMENSION, REMOTE_DIMENSION, SEEDED_DIMENSION};

/// Text to embed, with optional per-call overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    pub text: String,

    /// Overrides the provider's default model.
    pub model: Option<String>,

    /// Requested vector length. Remote providers forward it as `outputDimensionality`.
    pub dimensions: Option<usize>,
}

impl EmbeddingRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
            dimensions: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }
}

/// A vector together with the model that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub embedding: Embedding,
    pub model: String,

    /// False when the vector came from the random fallback path and will not
    /// be the same on retry.
    pub reproducible: bool,
}

impl EmbeddingResponse {
    pub fn dimension(&self) -> usize {
        self.embedding.dimension()
    }
}

/// Source of embedding vectors for one [`EmbeddingSpace`].
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn default_model(&self) -> &str;

    fn default_dimension(&self) -> usize;

    /// The space every vector from this provider is tagged with.
    fn space(&self) -> EmbeddingSpace;

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse>;

    /// False when a remote provider has no credentials.
    fn is_available(&self) -> bool;
}

/// Deterministic pseudo-embedding of `text`.
///
/// The seed is the sum of the text's UTF-16 code units; component `i` is
/// `sin((seed + i) * 0.1) * cos((seed - i) * 0.1)`. Identical text always
/// yields a bit-identical vector.
pub fn seeded_embedding(text: &str, space: EmbeddingSpace, dimension: usize) -> Embedding {
    let seed = text.encode_utf16().map(u64::from).sum::<u64>() as f64;

    let values = (0..dimension)
        .map(|i| {
            let i = i as f64;
            (((seed + i) * 0.1).sin() * ((seed - i) * 0.1).cos()) as f32
        })
        .collect();

    Embedding::new(space, values)
}

/// Uniformly random unit vector. Not reproducible.
pub fn random_embedding(space: EmbeddingSpace, dimension: usize) -> Embedding {
    let mut rng = rand::rng();
    let values = (0..dimension)
        .map(|_| rng.random_range(-1.0f32..1.0))
        .collect();
    Embedding::new(space, values).normalized()
}

/// Deterministic embedding provider backed by [`seeded_embedding`].
#[derive(Debug, Clone)]
pub struct SeededProvider {
    space: EmbeddingSpace,
    dimension: usize,
}

impl SeededProvider {
    /// Seeded query-space provider with the default dimension.
    pub fn new() -> Self {
        Self {
            space: EmbeddingSpace::Seeded,
            dimension: SEEDED_DIMENSION,
        }
    }

    /// Provider producing corpus-space vectors.
    pub fn corpus() -> Self {
        Self {
            space: EmbeddingSpace::Corpus,
            dimension: CORPUS_DIMENSION,
        }
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }
}

impl Default for SeededProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for SeededProvider {
    fn name(&self) -> &str {
        "seeded"
    }

    fn default_model(&self) -> &str {
        "char-sum-trig"
    }

    fn default_dimension(&self) -> usize {
        self.dimension
    }

    fn space(&self) -> EmbeddingSpace {
        self.space
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
        let dimension = request.dimensions.unwrap_or(self.dimension);
        let embedding = seeded_embedding(&request.text, self.space, dimension);

        Ok(EmbeddingResponse {
            embedding,
            model: self.default_model().to_string(),
            reproducible: true,
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Gemini text-embedding provider.
pub struct GeminiEmbeddingProvider {
    /// `None` turns every [`GeminiEmbeddingProvider::fetch`] into
    /// [`EmbeddingError::MissingApiKey`].
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
    default_model: String,
}

impl GeminiEmbeddingProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            client: reqwest::Client::new(),
            default_model: "text-embedding-004".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Call the embedding API, propagating every failure.
    pub async fn fetch(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(EmbeddingError::MissingApiKey)?;

        let model = request.model.unwrap_or_else(|| self.default_model.clone());

        debug!("Requesting embedContent from {model}");

        let mut body = serde_json::json!({
            "model": format!("models/{model}"),
            "content": { "parts": [{ "text": request.text }] }
        });

        if let Some(dims) = request.dimensions {
            body["outputDimensionality"] = serde_json::json!(dims);
        }

        let response = self
            .client
            .post(format!("{}/models/{model}:embedContent", self.base_url))
            .query(&[("key", api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|secs| secs.trim().parse().ok())
                .unwrap_or(60);
            return Err(EmbeddingError::Throttled { retry_after_secs });
        }
        if !status.is_success() {
            return Err(EmbeddingError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let values = response.json::<GeminiEmbedResponse>().await?.embedding.values;
        if values.is_empty() {
            return Err(EmbeddingError::EmptyVector);
        }

        info!("embedContent returned {} components", values.len());

        Ok(EmbeddingResponse {
            embedding: Embedding::new(EmbeddingSpace::Remote, values),
            model,
            reproducible: true,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn default_dimension(&self) -> usize {
        REMOTE_DIMENSION
    }

    fn space(&self) -> EmbeddingSpace {
        EmbeddingSpace::Remote
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
        let dimension = request.dimensions.unwrap_or(REMOTE_DIMENSION);
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.default_model.clone());

        match self.fetch(request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                warn!("Remote embedding failed, using random fallback vector: {err}");
                Ok(EmbeddingResponse {
                    embedding: random_embedding(EmbeddingSpace::Remote, dimension),
                    model,
                    reproducible: false,
                })
            }
        }
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Gemini embedContent response format.
#[derive(Debug, Deserialize)]
struct GeminiEmbedResponse {
    embedding: GeminiEmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct GeminiEmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}
