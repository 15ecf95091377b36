//! # Idiom Matcher
//!
//! Finds the culturally equivalent idiom in a target language. A request
//! runs four stages, each tolerant of remote failure:
//!
//! ```text
//! ┌──────────────┐   ┌───────────┐   ┌──────────────────────┐   ┌────────────┐
//! │   Meaning    │──►│ Embedding │──►│ Vector search        │──►│ Confidence │
//! │  extraction  │   │           │   │ (+ remote ranking)   │   │  finalize  │
//! └──────────────┘   └───────────┘   └──────────────────────┘   └────────────┘
//!   SemanticAnalyzer  EmbeddingProvider   CorpusStore + Ranker
//! ```
//!
//! Remote capabilities are injected explicitly. When one is absent or fails,
//! the request degrades to the next cheapest strategy; only an empty target
//! partition or a fully exhausted search is reported to the caller.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use idiom_corpus::LanguageCode;
//! use idiom_matcher::IdiomMatcher;
//!
//! let matcher = IdiomMatcher::builder().build();
//! let result = matcher
//!     .translate("Break a leg", LanguageCode::En, LanguageCode::De)
//!     .await?;
//! println!("{} ({}%)", result.target.text, result.confidence_percent());
//! ```

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod gemini;
pub mod json_block;
pub mod ranker;
pub mod result;
pub mod speech;

pub use analyzer::{GeminiAnalyzer, SemanticAnalysis, SemanticAnalyzer};
pub use config::{EmbeddingConfig, EmbeddingProviderKind, MatcherConfig, RemoteConfig};
pub use engine::{IdiomMatcher, IdiomMatcherBuilder};
pub use error::{ConfigError, RemoteError, RemoteResult, TranslateError};
pub use gemini::GeminiClient;
pub use json_block::{extract_json_block, first_json_object};
pub use ranker::{GeminiRanker, RankCandidate, Ranker, Ranking, RankingRequest};
pub use result::{MatchResult, Provenance};
pub use speech::{AudioClip, GoogleSpeechSynthesizer, SpeechSynthesizer};

// Re-export from dependencies for convenience
pub use idiom_corpus::{CorpusStore, IdiomRecord, LanguageCode, LanguagePair};
pub use idiom_embeddings::EmbeddingProvider;
