//! `idioms`: find the equivalent idiom in another language.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use idiom_corpus::{CorpusStore, IdiomRecord, LanguageCode, LanguagePair};
use idiom_matcher::{
    GoogleSpeechSynthesizer, IdiomMatcher, MatchResult, MatcherConfig, SpeechSynthesizer,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "idioms", version, about = "Find culturally equivalent idioms across languages")]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Translate an idiom into its target-language equivalent.
    Translate {
        text: String,

        #[arg(long, default_value = "en")]
        from: LanguageCode,

        #[arg(long, default_value = "de")]
        to: LanguageCode,

        /// Exchange --from and --to.
        #[arg(long)]
        reverse: bool,

        /// Write a spoken rendering of the match to this file (MP3).
        #[arg(long)]
        audio_out: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Show corpus counts per language and category.
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// List the idioms of one language.
    List { language: LanguageCode },

    /// Find the closest idiom in another language to a corpus entry.
    Related {
        id: String,

        #[arg(long)]
        to: LanguageCode,
    },

    /// List supported languages.
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => MatcherConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => MatcherConfig::default(),
    };
    let corpus = Arc::new(CorpusStore::seeded());

    match cli.command {
        Command::Translate {
            text,
            from,
            to,
            reverse,
            audio_out,
            json,
        } => {
            let mut pair = LanguagePair::new(from, to);
            if reverse {
                pair.swap();
            }
            translate(config, corpus, &text, pair, audio_out, json).await
        }
        Command::Stats { json } => stats(&corpus, json),
        Command::List { language } => {
            for record in corpus.partition(language) {
                println!("{}", record_line(record));
            }
            Ok(())
        }
        Command::Related { id, to } => {
            let matcher = IdiomMatcher::builder().with_corpus(corpus).build();
            let best = matcher
                .related(&id, to)
                .with_context(|| format!("finding a {to} idiom related to {id}"))?;
            println!("{}  (similarity {:.3})", record_line(best.item), best.score);
            Ok(())
        }
        Command::Languages => {
            for language in LanguageCode::ALL {
                println!(
                    "{} {}  {} ({})",
                    language.flag(),
                    language.code(),
                    language.name(),
                    language.native_name()
                );
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn translate(
    config: MatcherConfig,
    corpus: Arc<CorpusStore>,
    text: &str,
    pair: LanguagePair,
    audio_out: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    if !pair.is_distinct() {
        bail!("source and target language are both {}", pair.source);
    }

    let api_key = config.remote.api_key();
    let speech = GoogleSpeechSynthesizer::from_config(&config.remote, api_key.clone())
        .context("building speech client")?;
    let matcher = IdiomMatcher::from_config_with_key(config, corpus, api_key)
        .context("building idiom matcher")?;

    let result = matcher
        .translate(text, pair.source, pair.target)
        .await
        .with_context(|| format!("translating {text:?} from {} to {}", pair.source, pair.target))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result_json(&result))?);
    } else {
        print_result(&result);
    }

    if let Some(path) = audio_out {
        let Some(bytes) = synthesize_audio(&speech, &result).await else {
            return Ok(());
        };
        std::fs::write(&path, bytes)
            .with_context(|| format!("writing audio to {}", path.display()))?;
        debug!("Wrote audio to {}", path.display());
    }

    Ok(())
}

/// Spoken rendering of the matched idiom. `None` when speech is unavailable or
/// the service fails; the translation itself has already succeeded.
async fn synthesize_audio(
    speech: &dyn SpeechSynthesizer,
    result: &MatchResult,
) -> Option<Vec<u8>> {
    if !speech.is_available() {
        warn!("No API key configured, skipping audio");
        return None;
    }

    let clip = match speech
        .synthesize(&result.target.text, result.target.language)
        .await
    {
        Ok(clip) => clip,
        Err(err) => {
            warn!("Speech synthesis failed, skipping audio: {err}");
            return None;
        }
    };

    match clip.decode() {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            warn!("Could not decode synthesized audio, skipping: {err}");
            None
        }
    }
}

fn stats(corpus: &CorpusStore, json: bool) -> Result<()> {
    let stats = corpus.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{} idioms", stats.total);
    for (language, count) in &stats.by_language {
        println!("  {} {:<10} {count}", language.flag(), language.name());
    }
    println!("Categories:");
    for (category, count) in &stats.categories {
        println!("  {category:<16} {count}");
    }
    Ok(())
}

fn record_line(record: &IdiomRecord) -> String {
    format!("{}  {}  ({})", record.id, record.text, record.semantic_meaning)
}

fn print_result(result: &MatchResult) {
    let target = &result.target;
    println!(
        "{} {}  ->  {} {}",
        result.source_language.flag(),
        result.source_text,
        target.language.flag(),
        target.text
    );
    println!("  meaning:    {}", target.semantic_meaning);
    println!("  literally:  {}", target.literal_meaning);
    println!("  context:    {}", target.context);
    println!(
        "  confidence: {}% via {}",
        result.confidence_percent(),
        result.provenance
    );
}

/// JSON view of a result without the stored embedding vector.
fn result_json(result: &MatchResult) -> serde_json::Value {
    let target = &result.target;
    serde_json::json!({
        "source": {
            "text": result.source_text,
            "language": result.source_language,
            "analysis": result.analysis,
        },
        "target": {
            "id": target.id,
            "text": target.text,
            "language": target.language,
            "literalMeaning": target.literal_meaning,
            "semanticMeaning": target.semantic_meaning,
            "context": target.context,
            "category": target.category,
        },
        "confidence": result.confidence,
        "confidencePercent": result.confidence_percent(),
        "provenance": result.provenance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use idiom_matcher::{AudioClip, Provenance, RemoteError, RemoteResult, SemanticAnalysis};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_translate() {
        let cli = Cli::try_parse_from([
            "idioms", "translate", "Break a leg", "--from", "en", "--to", "it-IT", "--json",
        ])
        .unwrap();

        match cli.command {
            Command::Translate { text, from, to, json, reverse, .. } => {
                assert_eq!(text, "Break a leg");
                assert_eq!(from, LanguageCode::En);
                assert_eq!(to, LanguageCode::It);
                assert!(json);
                assert!(!reverse);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_defaults_and_verbosity() {
        let cli = Cli::try_parse_from(["idioms", "-vv", "translate", "Piece of cake"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Command::Translate { from: LanguageCode::En, to: LanguageCode::De, .. }
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_language() {
        assert!(Cli::try_parse_from(["idioms", "list", "fr"]).is_err());
    }

    #[test]
    fn test_result_json_omits_embedding() {
        let corpus = CorpusStore::seeded();
        let target = corpus.get("de-001").unwrap().clone();
        let result = MatchResult {
            source_text: "Break a leg".to_string(),
            source_language: LanguageCode::En,
            analysis: SemanticAnalysis::neutral("Break a leg"),
            target,
            confidence: 0.7,
            provenance: Provenance::Similarity,
        };

        let json = result_json(&result);
        assert_eq!(json["target"]["text"], "Hals- und Beinbruch");
        assert_eq!(json["target"]["language"], "de");
        assert_eq!(json["provenance"], "similarity");
        assert_eq!(json["confidencePercent"], 70);
        assert!(json["target"].get("embedding").is_none());
    }

    struct ScriptedSpeech {
        available: bool,
        answer: RemoteResult<AudioClip>,
    }

    #[async_trait]
    impl SpeechSynthesizer for ScriptedSpeech {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn synthesize(
            &self,
            _text: &str,
            _language: LanguageCode,
        ) -> RemoteResult<AudioClip> {
            self.answer.clone()
        }
    }

    fn sample_result() -> MatchResult {
        let corpus = CorpusStore::seeded();
        MatchResult {
            source_text: "Break a leg".to_string(),
            source_language: LanguageCode::En,
            analysis: SemanticAnalysis::neutral("Break a leg"),
            target: corpus.get("de-001").unwrap().clone(),
            confidence: 0.7,
            provenance: Provenance::Similarity,
        }
    }

    #[tokio::test]
    async fn test_synthesize_audio_decodes_clip() {
        let speech = ScriptedSpeech {
            available: true,
            answer: Ok(AudioClip::mp3("SUQz")),
        };
        let bytes = synthesize_audio(&speech, &sample_result()).await;
        assert_eq!(bytes, Some(b"ID3".to_vec()));
    }

    #[tokio::test]
    async fn test_synthesize_audio_degrades_on_failure() {
        let unavailable = ScriptedSpeech {
            available: false,
            answer: Ok(AudioClip::mp3("SUQz")),
        };
        let failing = ScriptedSpeech {
            available: true,
            answer: Err(RemoteError::CallFailed("403".to_string())),
        };
        let garbled = ScriptedSpeech {
            available: true,
            answer: Ok(AudioClip::mp3("not base64!!")),
        };

        let result = sample_result();
        assert_eq!(synthesize_audio(&unavailable, &result).await, None);
        assert_eq!(synthesize_audio(&failing, &result).await, None);
        assert_eq!(synthesize_audio(&garbled, &result).await, None);
    }

    #[test]
    fn test_record_line() {
        let corpus = CorpusStore::seeded();
        assert_eq!(
            record_line(corpus.get("it-001").unwrap()),
            "it-001  In bocca al lupo  (Good luck)"
        );
    }
}
