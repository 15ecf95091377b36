//! # Embeddings
//!
//! Vectors for idioms and queries, the providers that produce them, and the
//! cosine search the matcher runs over them.
//!
//! - [`Embedding`] carries the [`EmbeddingSpace`] it came from. Comparing
//!   vectors from two spaces is an error.
//! - [`SeededProvider`] is deterministic and offline. [`GeminiEmbeddingProvider`]
//!   calls `embedContent` and degrades to a random vector on failure.
//! - [`CachedProvider`] memoises reproducible vectors in an [`EmbeddingCache`].
//!
//! ```text
//!  query text ──► EmbeddingProvider ──► Embedding{space}
//!                        │                    │
//!                  EmbeddingCache       find_best_match / find_top_k
//!                                             │
//!                                   ScoredCandidate{index, item, score}
//! ```

pub mod cache;
pub mod embedding;
pub mod error;
pub mod provider;
pub mod similarity;

pub use cache::{CachedProvider, EmbeddingCache};
pub use embedding::{Embedding, EmbeddingSpace};
pub use error::{EmbeddingError, Result};
pub use provider::{
    EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, GeminiEmbeddingProvider,
    SeededProvider, random_embedding, seeded_embedding,
};
pub use similarity::{ScoredCandidate, cosine_similarity, find_best_match, find_top_k};

/// Dimension of the precomputed vectors stored with corpus records.
pub const CORPUS_DIMENSION: usize = 512;

/// Dimension of the deterministic seeded embedder.
pub const SEEDED_DIMENSION: usize = 768;

/// Dimension of Gemini `text-embedding-004` vectors.
pub const REMOTE_DIMENSION: usize = 768;
