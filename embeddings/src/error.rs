//! Failures raised while producing or comparing embeddings.

use thiserror::Error;

use crate::embedding::EmbeddingSpace;

pub type Result<T> = std::result::Result<T, EmbeddingError>;

#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// The remote provider was asked for a vector without an API key.
    #[error("no API key configured for the embedding service")]
    MissingApiKey,

    #[error("embedding service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("embedding service returned an empty vector")]
    EmptyVector,

    /// HTTP 429. `retry_after_secs` comes from the `Retry-After` header.
    #[error("embedding service throttled the request, retry after {retry_after_secs}s")]
    Throttled { retry_after_secs: u64 },

    #[error("vectors differ in length: {expected} vs {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Vectors from different embedding spaces were compared.
    #[error("cannot compare a {actual} vector with a {expected} vector")]
    SpaceMismatch {
        expected: EmbeddingSpace,
        actual: EmbeddingSpace,
    },

    #[error("embedding request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
