//! Cosine similarity and candidate selection.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::embedding::Embedding;
use crate::error::{EmbeddingError, Result};

/// Cosine of the angle between `a` and `b`, in `[-1, 1]`.
///
/// A zero-length vector scores 0 against anything. Slices of different
/// lengths are a [`EmbeddingError::DimensionMismatch`].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// A candidate together with its position in the input and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate<T> {
    /// Zero-based position of the candidate in the scanned sequence.
    pub index: usize,

    /// The candidate itself.
    pub item: T,

    /// Cosine similarity to the query.
    pub score: f32,
}

/// Linear scan for the candidate most similar to `query`.
///
/// The first candidate is the initial incumbent and is only replaced by a
/// strictly higher score, so ties resolve to the earliest candidate. Returns
/// `None` only for an empty sequence.
pub fn find_best_match<'a, T, I>(
    query: &Embedding,
    candidates: I,
) -> Result<Option<ScoredCandidate<T>>>
where
    I: IntoIterator<Item = (T, &'a Embedding)>,
{
    let mut best: Option<ScoredCandidate<T>> = None;

    for (index, (item, embedding)) in candidates.into_iter().enumerate() {
        let score = query.similarity(embedding)?;
        if best.as_ref().is_none_or(|incumbent| score > incumbent.score) {
            best = Some(ScoredCandidate { index, item, score });
        }
    }

    Ok(best)
}

/// Find the top-k most similar candidates, best first.
///
/// Candidates scoring below `min_score` are dropped. Equal scores keep their
/// input order.
pub fn find_top_k<'a, T, I>(
    query: &Embedding,
    candidates: I,
    k: usize,
    min_score: f32,
) -> Result<Vec<ScoredCandidate<T>>>
where
    I: IntoIterator<Item = (T, &'a Embedding)>,
{
    let mut scored = Vec::new();

    for (index, (item, embedding)) in candidates.into_iter().enumerate() {
        let score = query.similarity(embedding)?;
        if score >= min_score {
            scored.push(ScoredCandidate { index, item, score });
        }
    }

    // Stable sort: ties stay in scan order
    scored.sort_by_key(|c| Reverse(OrderedFloat(c.score)));
    scored.truncate(k);

    Ok(scored)
}

/// Normalize a vector to unit length.
pub fn normalize(values: &mut [f32]) {
    let magnitude: f32 = values.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude > 0.0 {
        for x in values.iter_mut() {
            *x /= magnitude;
        }
    }
}
