//! Translation result types.

use idiom_corpus::{IdiomRecord, LanguageCode};
use serde::{Deserialize, Serialize};

use crate::analyzer::SemanticAnalysis;

/// Which strategy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// The input is itself a target-language idiom.
    Exact,
    /// Chosen by the remote ranker.
    Semantic,
    /// Nearest neighbour by vector similarity.
    Similarity,
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Exact => "exact",
            Provenance::Semantic => "semantic",
            Provenance::Similarity => "similarity",
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one translation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Trimmed input text.
    pub source_text: String,

    pub source_language: LanguageCode,

    /// Meaning extracted from the input (placeholder when degraded).
    pub analysis: SemanticAnalysis,

    /// The chosen target-language idiom.
    pub target: IdiomRecord,

    /// Confidence in [0, 1].
    pub confidence: f32,

    pub provenance: Provenance,
}

impl MatchResult {
    /// Confidence as a whole percentage.
    pub fn confidence_percent(&self) -> u8 {
        // Clamped to [0, 100] before the cast
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(confidence: f32) -> MatchResult {
        MatchResult {
            source_text: "Break a leg".to_string(),
            source_language: LanguageCode::En,
            analysis: SemanticAnalysis::neutral("Break a leg"),
            target: IdiomRecord::new(
                "de-001",
                "Hals- und Beinbruch",
                LanguageCode::De,
                "Neck and leg break",
                "Good luck",
                "Theatre",
                "encouragement",
            ),
            confidence,
            provenance: Provenance::Similarity,
        }
    }

    #[test]
    fn test_confidence_percent() {
        assert_eq!(result(0.7).confidence_percent(), 70);
        assert_eq!(result(0.876).confidence_percent(), 88);
        assert_eq!(result(1.0).confidence_percent(), 100);
        assert_eq!(result(0.0).confidence_percent(), 0);
    }

    #[test]
    fn test_provenance_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Provenance::Similarity).unwrap(),
            "\"similarity\""
        );
        assert_eq!(Provenance::Exact.to_string(), "exact");
    }
}
