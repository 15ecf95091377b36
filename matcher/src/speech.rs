//! Synthesized pronunciation of a matched idiom.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use idiom_corpus::LanguageCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RemoteConfig;
use crate::error::{ConfigError, RemoteError, RemoteResult};

/// Encoded audio as returned by the speech service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioClip {
    pub mime_type: String,

    /// Base64-encoded audio payload.
    pub base64: String,
}

impl AudioClip {
    pub fn mp3(base64: impl Into<String>) -> Self {
        Self {
            mime_type: "audio/mp3".to_string(),
            base64: base64.into(),
        }
    }

    /// `data:` URL suitable for direct playback.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    /// Decode the raw audio bytes.
    pub fn decode(&self) -> RemoteResult<Vec<u8>> {
        STANDARD
            .decode(self.base64.as_bytes())
            .map_err(|err| RemoteError::Malformed(format!("invalid audio payload: {err}")))
    }
}

/// A capability that renders text as speech.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn is_available(&self) -> bool {
        true
    }

    async fn synthesize(&self, text: &str, language: LanguageCode) -> RemoteResult<AudioClip>;
}

/// Google Cloud text-to-speech.
#[derive(Debug, Clone)]
pub struct GoogleSpeechSynthesizer {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl GoogleSpeechSynthesizer {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: RemoteConfig::default().speech_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(
        config: &RemoteConfig,
        api_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(api_key)
            .with_base_url(&config.speech_url)
            .with_client(config.http_client()?))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Standard voice for a language, e.g. `de-DE-Standard-A`.
    pub fn voice_name(language: LanguageCode) -> String {
        format!("{}-Standard-A", language.speech_locale())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeechSynthesizer {
    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn synthesize(&self, text: &str, language: LanguageCode) -> RemoteResult<AudioClip> {
        let api_key = self.api_key.as_ref().ok_or(RemoteError::Unavailable)?;

        debug!("Synthesizing speech in {}", language.speech_locale());

        let body = serde_json::json!({
            "input": { "text": text },
            "voice": {
                "languageCode": language.speech_locale(),
                "name": Self::voice_name(language),
            },
            "audioConfig": {
                "audioEncoding": "MP3",
                "pitch": 0,
                "speakingRate": 1,
            }
        });

        let response = self
            .client
            .post(format!("{}/text:synthesize", self.base_url))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RemoteError::CallFailed(format!(
                "text:synthesize returned {status}: {error_text}"
            )));
        }

        let payload: SynthesizeResponse = response.json().await?;
        if payload.audio_content.is_empty() {
            return Err(RemoteError::Malformed("empty audio content".to_string()));
        }

        Ok(AudioClip::mp3(payload.audio_content))
    }
}

/// text:synthesize response format.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_data_url_and_decode() {
        let clip = AudioClip::mp3("SUQz");
        assert_eq!(clip.data_url(), "data:audio/mp3;base64,SUQz");
        assert_eq!(clip.decode().unwrap(), b"ID3".to_vec());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let clip = AudioClip::mp3("not base64!!");
        assert!(matches!(clip.decode(), Err(RemoteError::Malformed(_))));
    }

    #[test]
    fn test_voice_name() {
        assert_eq!(
            GoogleSpeechSynthesizer::voice_name(LanguageCode::Pt),
            "pt-BR-Standard-A"
        );
    }

    #[tokio::test]
    async fn test_synthesize() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/text:synthesize"))
            .and(query_param("key", "k"))
            .and(body_partial_json(serde_json::json!({
                "input": { "text": "Hals- und Beinbruch" },
                "voice": { "languageCode": "de-DE", "name": "de-DE-Standard-A" }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "audioContent": "SUQz" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let synthesizer =
            GoogleSpeechSynthesizer::new(Some("k".to_string())).with_base_url(server.uri());
        let clip = synthesizer
            .synthesize("Hals- und Beinbruch", LanguageCode::De)
            .await
            .unwrap();
        assert_eq!(clip, AudioClip::mp3("SUQz"));
    }

    #[tokio::test]
    async fn test_synthesize_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let synthesizer =
            GoogleSpeechSynthesizer::new(Some("k".to_string())).with_base_url(server.uri());
        let result = synthesizer.synthesize("Ciao", LanguageCode::It).await;
        assert!(matches!(result, Err(RemoteError::CallFailed(_))));
    }

    #[tokio::test]
    async fn test_synthesize_unconfigured() {
        let synthesizer = GoogleSpeechSynthesizer::new(None);
        assert!(!synthesizer.is_available());
        let result = synthesizer.synthesize("Ciao", LanguageCode::It).await;
        assert_eq!(result, Err(RemoteError::Unavailable));
    }
}
