//! Supported languages and their display metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;

/// The closed set of corpus languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    De,
    It,
    Pt,
    Ru,
    Tr,
}

impl LanguageCode {
    /// Every supported language, in display order.
    pub const ALL: [LanguageCode; 6] = [
        LanguageCode::En,
        LanguageCode::De,
        LanguageCode::It,
        LanguageCode::Pt,
        LanguageCode::Ru,
        LanguageCode::Tr,
    ];

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::It => "it",
            Self::Pt => "pt",
            Self::Ru => "ru",
            Self::Tr => "tr",
        }
    }

    /// English name of the language.
    pub fn name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::De => "German",
            Self::It => "Italian",
            Self::Pt => "Portuguese",
            Self::Ru => "Russian",
            Self::Tr => "Turkish",
        }
    }

    /// Name of the language in the language itself.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::De => "Deutsch",
            Self::It => "Italiano",
            Self::Pt => "Português",
            Self::Ru => "Русский",
            Self::Tr => "Türkçe",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Self::En => "🇬🇧",
            Self::De => "🇩🇪",
            Self::It => "🇮🇹",
            Self::Pt => "🇵🇹",
            Self::Ru => "🇷🇺",
            Self::Tr => "🇹🇷",
        }
    }

    /// BCP 47 locale used when requesting synthesized speech.
    pub fn speech_locale(self) -> &'static str {
        match self {
            Self::En => "en-US",
            Self::De => "de-DE",
            Self::It => "it-IT",
            Self::Pt => "pt-BR",
            Self::Ru => "ru-RU",
            Self::Tr => "tr-TR",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = CorpusError;

    /// Parses `de`, `DE`, `de-DE` or `de_AT`; region and script subtags are
    /// ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let base = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|language| language.code() == base)
            .ok_or_else(|| CorpusError::UnknownLanguage(s.to_string()))
    }
}

/// A source/target language selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: LanguageCode,
    pub target: LanguageCode,
}

impl LanguagePair {
    pub fn new(source: LanguageCode, target: LanguageCode) -> Self {
        Self { source, target }
    }

    /// Exchange source and target in place.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
    }

    /// The pair with source and target exchanged.
    pub fn swapped(self) -> Self {
        Self::new(self.target, self.source)
    }

    /// Whether translation between the two languages is meaningful.
    pub fn is_distinct(self) -> bool {
        self.source != self.target
    }
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self::new(LanguageCode::En, LanguageCode::De)
    }
}
