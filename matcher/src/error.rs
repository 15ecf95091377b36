//! Error types for the idiom matcher.

use std::path::PathBuf;

use idiom_corpus::LanguageCode;
use thiserror::Error;

/// Result type alias for remote capability calls.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Failures of a remote capability call.
///
/// These are absorbed by [`crate::IdiomMatcher`]; each one degrades the
/// request to a cheaper strategy instead of failing it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// No credential or configuration present.
    #[error("remote service not configured")]
    Unavailable,

    /// Network failure, timeout or non-success HTTP status.
    #[error("remote call failed: {0}")]
    CallFailed(String),

    /// The response could not be parsed into the expected structure.
    #[error("malformed remote response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteError::Malformed(err.to_string())
        } else {
            RemoteError::CallFailed(err.to_string())
        }
    }
}

/// Typed failure returned to the caller of a translation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// The input was empty after trimming.
    #[error("input idiom is empty")]
    EmptyInput,

    /// Source and target are the same language.
    #[error("source and target language are both {0}")]
    SameLanguage(LanguageCode),

    /// The target language has no idioms to choose from.
    #[error("no idioms available for {language}")]
    EmptyCandidatePartition { language: LanguageCode },

    /// Every strategy was exhausted without a candidate.
    #[error("no matching idiom found in {language}")]
    NoMatchFound { language: LanguageCode },

    /// A corpus id that does not exist.
    #[error("unknown idiom id: {0}")]
    UnknownIdiom(String),
}

/// Errors raised while loading configuration or wiring clients.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML document could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// The HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
