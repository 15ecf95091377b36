//! Meaning extraction for a source idiom.

use std::sync::Arc;

use async_trait::async_trait;
use idiom_corpus::LanguageCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RemoteError, RemoteResult};
use crate::gemini::GeminiClient;
use crate::json_block::extract_json_block;

/// Structured reading of what an idiom means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticAnalysis {
    /// Semantic gloss.
    pub meaning: String,

    /// Emotional valence (`positive`, `negative`, `neutral`).
    #[serde(default = "default_emotion")]
    pub emotion: String,

    #[serde(default)]
    pub cultural_context: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_emotion() -> String {
    "neutral".to_string()
}

fn default_confidence() -> f32 {
    0.5
}

impl SemanticAnalysis {
    /// Placeholder used when no analysis service is reachable: the input is
    /// echoed back as its own gloss.
    pub fn neutral(text: &str) -> Self {
        Self {
            meaning: text.to_string(),
            emotion: default_emotion(),
            cultural_context: "unknown".to_string(),
            keywords: text.split_whitespace().map(str::to_string).collect(),
            confidence: default_confidence(),
        }
    }
}

/// A capability that extracts a [`SemanticAnalysis`] from an idiom.
#[async_trait]
pub trait SemanticAnalyzer: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the analyzer can be called at all.
    fn is_available(&self) -> bool {
        true
    }

    async fn analyze(&self, idiom: &str, language: LanguageCode) -> RemoteResult<SemanticAnalysis>;
}

/// Analyzer backed by Gemini text generation.
pub struct GeminiAnalyzer {
    client: Arc<GeminiClient>,
}

impl GeminiAnalyzer {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self { client }
    }

    fn build_prompt(idiom: &str, language: LanguageCode) -> String {
        format!(
            r#"Analyze this {name} idiom and extract semantic information in JSON format:

Idiom: "{idiom}"
Language: {code}

Return ONLY valid JSON (no markdown, no extra text):
{{
  "meaning": "The semantic meaning of the idiom",
  "emotion": "positive/negative/neutral",
  "culturalContext": "Brief cultural or historical context",
  "keywords": ["keyword1", "keyword2", "keyword3"],
  "confidence": 0.95
}}"#,
            name = language.name(),
            code = language.code(),
        )
    }
}

#[async_trait]
impl SemanticAnalyzer for GeminiAnalyzer {
    fn name(&self) -> &str {
        "gemini"
    }

    fn is_available(&self) -> bool {
        self.client.is_configured()
    }

    async fn analyze(&self, idiom: &str, language: LanguageCode) -> RemoteResult<SemanticAnalysis> {
        let text = self
            .client
            .generate_text(&Self::build_prompt(idiom, language))
            .await?;

        let mut analysis: SemanticAnalysis = extract_json_block(&text)?;
        if analysis.meaning.trim().is_empty() {
            return Err(RemoteError::Malformed("analysis has an empty meaning".to_string()));
        }
        analysis.confidence = analysis.confidence.clamp(0.0, 1.0);

        debug!("Analyzed idiom with confidence {}", analysis.confidence);
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn analyzer_answering(text: &str) -> (MockServer, GeminiAnalyzer) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": text }] } }]
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(Some("k".to_string())).with_base_url(server.uri());
        (server, GeminiAnalyzer::new(Arc::new(client)))
    }

    #[test]
    fn test_neutral_placeholder() {
        let analysis = SemanticAnalysis::neutral("Break a leg");
        assert_eq!(analysis.meaning, "Break a leg");
        assert_eq!(analysis.emotion, "neutral");
        assert_eq!(analysis.cultural_context, "unknown");
        assert_eq!(analysis.keywords, vec!["Break", "a", "leg"]);
        assert_eq!(analysis.confidence, 0.5);
    }

    #[test]
    fn test_prompt_names_language() {
        let prompt = GeminiAnalyzer::build_prompt("Piece of cake", LanguageCode::En);
        assert!(prompt.contains("Analyze this English idiom"));
        assert!(prompt.contains("Idiom: \"Piece of cake\""));
        assert!(prompt.contains("\"culturalContext\""));
    }

    #[tokio::test]
    async fn test_analyze_parses_fenced_json() {
        let (_server, analyzer) = analyzer_answering(
            "```json\n{\"meaning\": \"Good luck\", \"emotion\": \"positive\", \
             \"culturalContext\": \"Theatre\", \"keywords\": [\"luck\"], \"confidence\": 0.9}\n```",
        )
        .await;

        let analysis = analyzer.analyze("Break a leg", LanguageCode::En).await.unwrap();
        assert_eq!(analysis.meaning, "Good luck");
        assert_eq!(analysis.emotion, "positive");
        assert_eq!(analysis.cultural_context, "Theatre");
        assert_eq!(analysis.keywords, vec!["luck"]);
        assert!((analysis.confidence - 0.9).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_analyze_fills_missing_fields() {
        let (_server, analyzer) = analyzer_answering(r#"{"meaning": "Very easy"}"#).await;

        let analysis = analyzer.analyze("Piece of cake", LanguageCode::En).await.unwrap();
        assert_eq!(analysis.emotion, "neutral");
        assert!(analysis.keywords.is_empty());
        assert_eq!(analysis.confidence, 0.5);
    }

    #[tokio::test]
    async fn test_analyze_without_json_is_malformed() {
        let (_server, analyzer) = analyzer_answering("It means good luck.").await;
        let result = analyzer.analyze("Break a leg", LanguageCode::En).await;
        assert!(matches!(result, Err(RemoteError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_unconfigured_analyzer() {
        let analyzer = GeminiAnalyzer::new(Arc::new(GeminiClient::new(None)));
        assert!(!analyzer.is_available());
        let result = analyzer.analyze("Break a leg", LanguageCode::En).await;
        assert_eq!(result, Err(RemoteError::Unavailable));
    }
}
