//! Configuration for the idiom matcher.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Hard upper bound on candidates sent to a remote ranker.
pub const MAX_RANKED_CANDIDATES: usize = 15;

/// Configuration for the idiom matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatcherConfig {
    /// Minimum confidence reported for a vector-search fallback result.
    pub confidence_floor: f32,

    /// How many top candidates a remote ranker chooses from.
    pub max_ranked_candidates: usize,

    /// Embedding provider configuration.
    pub embedding: EmbeddingConfig,

    /// Remote service configuration.
    pub remote: RemoteConfig,
}

impl MatcherConfig {
    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err(ConfigError::Invalid(format!(
                "confidence_floor must be within [0, 1], got {}",
                self.confidence_floor
            )));
        }
        if self.max_ranked_candidates == 0 {
            return Err(ConfigError::Invalid(
                "max_ranked_candidates must be at least 1".to_string(),
            ));
        }
        if self.remote.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "remote.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of candidates actually offered to the ranker.
    pub fn ranked_candidates(&self) -> usize {
        self.max_ranked_candidates.min(MAX_RANKED_CANDIDATES)
    }

    /// Set the fallback confidence floor.
    pub fn with_confidence_floor(mut self, floor: f32) -> Self {
        self.confidence_floor = floor;
        self
    }

    /// Set the embedding configuration.
    pub fn with_embedding(mut self, config: EmbeddingConfig) -> Self {
        self.embedding = config;
        self
    }

    /// Set the remote configuration.
    pub fn with_remote(mut self, config: RemoteConfig) -> Self {
        self.remote = config;
        self
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            confidence_floor: 0.7,
            max_ranked_candidates: MAX_RANKED_CANDIDATES,
            embedding: EmbeddingConfig::default(),
            remote: RemoteConfig::default(),
        }
    }
}

/// Configuration for the embedding provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbeddingConfig {
    /// Which provider embeds queries and candidates.
    pub provider: EmbeddingProviderKind,

    /// Maximum cached candidate embeddings. Zero disables caching.
    pub cache_max_entries: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::Seeded,
            cache_max_entries: 1024,
        }
    }
}

/// Type of embedding provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderKind {
    /// Deterministic seeded embeddings, no network.
    Seeded,
    /// Gemini text-embedding API (falls back to seeded without a key).
    Gemini,
}

/// Configuration for the remote Google services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Gemini API base URL.
    pub base_url: String,

    /// Model used for meaning extraction and ranking.
    pub generation_model: String,

    /// Model used for remote embeddings.
    pub embedding_model: String,

    /// Text-to-speech API base URL.
    pub speech_url: String,

    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl RemoteConfig {
    /// Read the API key named by `api_key_env`. Blank values count as unset.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// HTTP client with the configured timeout.
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        Ok(reqwest::Client::builder().timeout(self.timeout()).build()?)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            generation_model: "gemini-1.5-flash".to_string(),
            embedding_model: "text-embedding-004".to_string(),
            speech_url: "https://texttospeech.googleapis.com/v1".to_string(),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = MatcherConfig::default();
        assert_eq!(config.confidence_floor, 0.7);
        assert_eq!(config.ranked_candidates(), 15);
        assert_eq!(config.embedding.provider, EmbeddingProviderKind::Seeded);
        assert_eq!(config.remote.api_key_env, "GOOGLE_API_KEY");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = MatcherConfig::from_toml_str(
            r#"
            confidence_floor = 0.75

            [embedding]
            provider = "gemini"

            [remote]
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.confidence_floor, 0.75);
        assert_eq!(config.embedding.provider, EmbeddingProviderKind::Gemini);
        assert_eq!(config.embedding.cache_max_entries, 1024);
        assert_eq!(config.remote.timeout(), Duration::from_secs(5));
        assert_eq!(config.remote.generation_model, "gemini-1.5-flash");
    }

    #[test]
    fn test_ranked_candidates_capped() {
        let config = MatcherConfig::from_toml_str("max_ranked_candidates = 40").unwrap();
        assert_eq!(config.ranked_candidates(), MAX_RANKED_CANDIDATES);

        let config = MatcherConfig::from_toml_str("max_ranked_candidates = 4").unwrap();
        assert_eq!(config.ranked_candidates(), 4);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = MatcherConfig::from_toml_str("confidence_flor = 0.7");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_out_of_range_floor_rejected() {
        let result = MatcherConfig::from_toml_str("confidence_floor = 1.5");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[remote]\napi_key_env = \"IDIOM_TEST_KEY\"").unwrap();

        let config = MatcherConfig::load(file.path()).unwrap();
        assert_eq!(config.remote.api_key_env, "IDIOM_TEST_KEY");
    }

    #[test]
    fn test_load_missing_file() {
        let result = MatcherConfig::load("/nonexistent/idioms.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_api_key_missing_variable() {
        let remote = RemoteConfig {
            api_key_env: "IDIOM_MATCHER_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..RemoteConfig::default()
        };
        assert_eq!(remote.api_key(), None);
    }
}
