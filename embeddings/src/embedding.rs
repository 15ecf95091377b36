//! The space-tagged embedding vector.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EmbeddingError, Result};
use crate::similarity::{cosine_similarity, normalize};

/// The vector space an embedding was produced in.
///
/// Vectors are only comparable within one space. The corpus vectors, the
/// seeded query vectors and remote vectors use different generators (and in
/// general different dimensions), so a similarity between them is meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingSpace {
    /// Precomputed vectors stored alongside corpus records.
    Corpus,
    /// Deterministic hash-seeded vectors.
    Seeded,
    /// Vectors produced by a remote text-embedding service.
    Remote,
}

impl EmbeddingSpace {
    /// Stable lowercase name, used for cache keys and logging.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Corpus => "corpus",
            Self::Seeded => "seeded",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for EmbeddingSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dense vector embedding tagged with its originating space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    space: EmbeddingSpace,
    values: Vec<f32>,
}

impl Embedding {
    /// Wrap raw values produced in `space`.
    pub fn new(space: EmbeddingSpace, values: Vec<f32>) -> Self {
        Self { space, values }
    }

    pub fn space(&self) -> EmbeddingSpace {
        self.space
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Scale to unit length. Zero vectors are left untouched.
    pub fn normalized(mut self) -> Self {
        normalize(&mut self.values);
        self
    }

    /// Whether `other` lives in the same space with the same dimension.
    pub fn is_comparable(&self, other: &Embedding) -> bool {
        self.space == other.space && self.values.len() == other.values.len()
    }

    /// Cosine similarity with another embedding of the same space.
    pub fn similarity(&self, other: &Embedding) -> Result<f32> {
        if self.space != other.space {
            return Err(EmbeddingError::SpaceMismatch {
                expected: self.space,
                actual: other.space,
            });
        }
        cosine_similarity(&self.values, &other.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_similarity_rejects_other_space() {
        let corpus = Embedding::new(EmbeddingSpace::Corpus, vec![1.0, 0.0]);
        let seeded = Embedding::new(EmbeddingSpace::Seeded, vec![1.0, 0.0]);

        match corpus.similarity(&seeded) {
            Err(EmbeddingError::SpaceMismatch { expected, actual }) => {
                assert_eq!(expected, EmbeddingSpace::Corpus);
                assert_eq!(actual, EmbeddingSpace::Seeded);
            }
            other => panic!("expected space mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_is_comparable() {
        let a = Embedding::new(EmbeddingSpace::Remote, vec![1.0, 2.0, 3.0]);
        let b = Embedding::new(EmbeddingSpace::Remote, vec![0.5, 0.5, 0.5]);
        let c = Embedding::new(EmbeddingSpace::Remote, vec![0.5, 0.5]);
        let d = Embedding::new(EmbeddingSpace::Seeded, vec![0.5, 0.5, 0.5]);

        assert!(a.is_comparable(&b));
        assert!(!a.is_comparable(&c));
        assert!(!a.is_comparable(&d));
    }

    #[test]
    fn test_normalized_keeps_space() {
        let e = Embedding::new(EmbeddingSpace::Seeded, vec![3.0, 4.0]).normalized();
        assert_eq!(e.space(), EmbeddingSpace::Seeded);
        assert!((e.values()[0] - 0.6).abs() < 1e-6);
        assert!((e.values()[1] - 0.8).abs() < 1e-6);
    }
}
