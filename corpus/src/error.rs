//! Error types for the idiom corpus.

use idiom_embeddings::EmbeddingSpace;
use thiserror::Error;

use crate::language::LanguageCode;

/// Result type alias for corpus operations.
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Errors raised while parsing language codes or assembling a corpus.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorpusError {
    /// Language code outside the supported set.
    #[error("unsupported language code: {0}")]
    UnknownLanguage(String),

    /// Two records share an identifier.
    #[error("duplicate idiom id: {0}")]
    DuplicateId(String),

    /// A record was placed in another language's partition.
    #[error("idiom {id} belongs to {actual} but was placed in the {expected} partition")]
    PartitionMismatch {
        id: String,
        expected: LanguageCode,
        actual: LanguageCode,
    },

    /// A record's embedding is not a corpus-space vector.
    #[error("idiom {id} has a {space} embedding, corpus records need corpus-space vectors")]
    WrongEmbeddingSpace { id: String, space: EmbeddingSpace },

    /// Corpus vectors must share one dimension.
    #[error("idiom {id} has embedding dimension {actual}, expected {expected}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },
}
