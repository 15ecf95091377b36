//! # Idiom Corpus
//!
//! An immutable, in-memory table of idioms in six languages. Each record
//! carries a literal gloss, a semantic gloss, a cultural-context note, a
//! category and a precomputed corpus-space embedding.
//!
//! ## Usage
//!
//! ```rust
//! use idiom_corpus::{CorpusStore, LanguageCode};
//!
//! let corpus = CorpusStore::seeded();
//! let german = corpus.partition(LanguageCode::De);
//! assert_eq!(german.len(), 20);
//! ```

pub mod error;
pub mod language;
pub mod record;
mod seed;
pub mod store;

pub use error::{CorpusError, Result};
pub use language::{LanguageCode, LanguagePair};
pub use record::IdiomRecord;
pub use store::{CorpusBuilder, CorpusStats, CorpusStore};
