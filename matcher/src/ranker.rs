//! Remote selection of the best candidate from a short list.

use std::sync::Arc;

use async_trait::async_trait;
use idiom_corpus::LanguageCode;
use serde::Deserialize;
use tracing::debug;

use crate::analyzer::SemanticAnalysis;
use crate::error::RemoteResult;
use crate::gemini::GeminiClient;
use crate::json_block::extract_json_block;

/// One entry of the list offered to a ranker.
#[derive(Debug, Clone, PartialEq)]
pub struct RankCandidate {
    pub text: String,
    pub semantic_meaning: String,
}

/// Everything a ranker sees for one decision.
#[derive(Debug, Clone)]
pub struct RankingRequest {
    pub input: String,
    pub source: LanguageCode,
    pub target: LanguageCode,
    pub analysis: SemanticAnalysis,

    /// Candidates in the order the 1-based index refers to.
    pub candidates: Vec<RankCandidate>,
}

impl RankingRequest {
    /// Numbered candidate list, one per line: `1. "text" - gloss`.
    pub fn numbered_candidates(&self) -> String {
        self.candidates
            .iter()
            .enumerate()
            .map(|(position, candidate)| {
                format!(
                    "{}. \"{}\" - {}",
                    position + 1,
                    candidate.text,
                    candidate.semantic_meaning
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn prompt(&self) -> String {
        format!(
            r#"Find the BEST semantically equivalent idiom.

Input Idiom ({source}): "{input}"
Meaning: {meaning}
Emotion: {emotion}

Target Language ({target}) Options:
{options}

Return ONLY valid JSON:
{{
  "selectedIndex": 1,
  "confidence": 0.9
}}"#,
            source = self.source.name(),
            input = self.input,
            meaning = self.analysis.meaning,
            emotion = self.analysis.emotion,
            target = self.target.name(),
            options = self.numbered_candidates(),
        )
    }
}

/// A ranker's choice. The index is 1-based and not yet validated against the
/// candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub selected_index: i64,

    #[serde(default)]
    pub confidence: Option<f32>,
}

impl Ranking {
    /// Zero-based position into a list of `len` candidates, if in range.
    pub fn position(self, len: usize) -> Option<usize> {
        let position = usize::try_from(self.selected_index).ok()?.checked_sub(1)?;
        (position < len).then_some(position)
    }
}

/// A capability that picks one candidate out of a [`RankingRequest`].
#[async_trait]
pub trait Ranker: Send + Sync {
    fn name(&self) -> &str;

    fn is_available(&self) -> bool {
        true
    }

    async fn rank(&self, request: &RankingRequest) -> RemoteResult<Ranking>;
}

/// Ranker backed by Gemini text generation.
pub struct GeminiRanker {
    client: Arc<GeminiClient>,
}

impl GeminiRanker {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Ranker for GeminiRanker {
    fn name(&self) -> &str {
        "gemini"
    }

    fn is_available(&self) -> bool {
        self.client.is_configured()
    }

    async fn rank(&self, request: &RankingRequest) -> RemoteResult<Ranking> {
        let text = self.client.generate_text(&request.prompt()).await?;
        let ranking: Ranking = extract_json_block(&text)?;
        debug!(
            "Ranker selected {} of {}",
            ranking.selected_index,
            request.candidates.len()
        );
        Ok(ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> RankingRequest {
        RankingRequest {
            input: "Break a leg".to_string(),
            source: LanguageCode::En,
            target: LanguageCode::De,
            analysis: SemanticAnalysis::neutral("Break a leg"),
            candidates: vec![
                RankCandidate {
                    text: "Hals- und Beinbruch".to_string(),
                    semantic_meaning: "Good luck".to_string(),
                },
                RankCandidate {
                    text: "Ein Kinderspiel".to_string(),
                    semantic_meaning: "Very easy".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_numbered_candidates() {
        assert_eq!(
            request().numbered_candidates(),
            "1. \"Hals- und Beinbruch\" - Good luck\n2. \"Ein Kinderspiel\" - Very easy"
        );
    }

    #[test]
    fn test_prompt_contents() {
        let prompt = request().prompt();
        assert!(prompt.contains("Input Idiom (English): \"Break a leg\""));
        assert!(prompt.contains("Target Language (German) Options:"));
        assert!(prompt.contains("\"selectedIndex\""));
    }

    #[test]
    fn test_position_bounds() {
        let pick = |index| Ranking {
            selected_index: index,
            confidence: None,
        };
        assert_eq!(pick(1).position(5), Some(0));
        assert_eq!(pick(5).position(5), Some(4));
        assert_eq!(pick(6).position(5), None);
        assert_eq!(pick(99).position(5), None);
        assert_eq!(pick(0).position(5), None);
        assert_eq!(pick(-2).position(5), None);
    }

    #[tokio::test]
    async fn test_gemini_ranker() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("Hals- und Beinbruch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{
                    "text": "{\"selectedIndex\": 1, \"confidence\": 0.92}"
                }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(Some("k".to_string())).with_base_url(server.uri());
        let ranker = GeminiRanker::new(Arc::new(client));

        let ranking = ranker.rank(&request()).await.unwrap();
        assert_eq!(ranking.selected_index, 1);
        assert!((ranking.confidence.unwrap() - 0.92).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_gemini_ranker_non_integer_index() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{
                    "text": "{\"selectedIndex\": \"first\"}"
                }] } }]
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(Some("k".to_string())).with_base_url(server.uri());
        let result = GeminiRanker::new(Arc::new(client)).rank(&request()).await;
        assert!(matches!(result, Err(RemoteError::Malformed(_))));
    }
}
