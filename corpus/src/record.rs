//! The idiom record.

use idiom_embeddings::{CORPUS_DIMENSION, Embedding, EmbeddingSpace, seeded_embedding};
use serde::{Deserialize, Serialize};

use crate::language::LanguageCode;

/// A fixed phrase with its glosses, context, category and corpus-space
/// embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdiomRecord {
    /// Identifier, unique within the corpus (e.g. `de-001`).
    pub id: String,

    /// Surface text of the idiom.
    pub text: String,

    /// Owning language.
    pub language: LanguageCode,

    /// Word-for-word gloss.
    pub literal_meaning: String,

    /// What the idiom actually means.
    pub semantic_meaning: String,

    /// Cultural or historical context note.
    pub context: String,

    /// Category label (e.g. `encouragement`).
    pub category: String,

    /// Precomputed corpus-space vector.
    pub embedding: Embedding,
}

impl IdiomRecord {
    /// Build a record, deriving its corpus vector from the semantic gloss so
    /// idioms with the same meaning share a direction.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        language: LanguageCode,
        literal_meaning: impl Into<String>,
        semantic_meaning: impl Into<String>,
        context: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let semantic_meaning = semantic_meaning.into();
        let embedding =
            seeded_embedding(&semantic_meaning, EmbeddingSpace::Corpus, CORPUS_DIMENSION);

        Self {
            id: id.into(),
            text: text.into(),
            language,
            literal_meaning: literal_meaning.into(),
            semantic_meaning,
            context: context.into(),
            category: category.into(),
            embedding,
        }
    }

    /// Replace the precomputed vector.
    pub fn with_embedding(mut self, embedding: Embedding) -> Self {
        self.embedding = embedding;
        self
    }

    /// Case-insensitive comparison of the surface text against `text`.
    pub fn matches_text(&self, text: &str) -> bool {
        self.text.trim().to_lowercase() == text.trim().to_lowercase()
    }
}
