//! The idiom matching engine.

use std::borrow::Cow;
use std::sync::Arc;

use idiom_corpus::{CorpusStore, IdiomRecord, LanguageCode};
use idiom_embeddings::{
    CachedProvider, Embedding, EmbeddingCache, EmbeddingProvider, EmbeddingRequest,
    EmbeddingSpace, GeminiEmbeddingProvider, ScoredCandidate, SeededProvider, find_best_match,
    find_top_k,
};
use tracing::{debug, info, warn};

use crate::analyzer::{GeminiAnalyzer, SemanticAnalysis, SemanticAnalyzer};
use crate::config::{EmbeddingProviderKind, MatcherConfig};
use crate::error::{ConfigError, RemoteError, TranslateError};
use crate::gemini::GeminiClient;
use crate::ranker::{GeminiRanker, RankCandidate, Ranker, RankingRequest};
use crate::result::{MatchResult, Provenance};

/// Confidence assumed when a ranker selects a candidate without stating one.
const DEFAULT_RANKED_CONFIDENCE: f32 = 0.8;

/// Idiom matcher: meaning extraction, embedding, search and ranking.
///
/// The matcher is immutable after construction and can serve concurrent
/// requests through a shared reference. The only interior state is the
/// candidate embedding cache, which memoises reproducible vectors.
pub struct IdiomMatcher {
    config: MatcherConfig,
    corpus: Arc<CorpusStore>,
    embedder: CachedProvider,
    analyzer: Option<Arc<dyn SemanticAnalyzer>>,
    ranker: Option<Arc<dyn Ranker>>,
}

impl IdiomMatcher {
    pub fn builder() -> IdiomMatcherBuilder {
        IdiomMatcherBuilder::default()
    }

    /// Wire the matcher from configuration, reading the API key from the
    /// environment variable named in `config.remote`.
    pub fn from_config(
        config: MatcherConfig,
        corpus: Arc<CorpusStore>,
    ) -> Result<Self, ConfigError> {
        let api_key = config.remote.api_key();
        Self::from_config_with_key(config, corpus, api_key)
    }

    /// Wire the matcher from configuration with an explicit API key. Without a
    /// key every remote capability is left out.
    pub fn from_config_with_key(
        config: MatcherConfig,
        corpus: Arc<CorpusStore>,
        api_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut builder = Self::builder().with_corpus(corpus);

        match api_key.filter(|key| !key.trim().is_empty()) {
            Some(key) => {
                let client = GeminiClient::from_config(&config.remote, Some(key.clone()))?;
                let client = Arc::new(client);

                builder = builder
                    .with_analyzer(Arc::new(GeminiAnalyzer::new(Arc::clone(&client))))
                    .with_ranker(Arc::new(GeminiRanker::new(client)));

                if config.embedding.provider == EmbeddingProviderKind::Gemini {
                    builder = builder.with_embedder(Arc::new(
                        GeminiEmbeddingProvider::new(Some(key))
                            .with_base_url(&config.remote.base_url)
                            .with_model(&config.remote.embedding_model)
                            .with_client(config.remote.http_client()?),
                    ));
                }
            }
            None => {
                debug!(
                    "No API key in {}, remote capabilities disabled",
                    config.remote.api_key_env
                );
            }
        }

        Ok(builder.with_config(config).build())
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    /// Cache holding candidate and query embeddings.
    pub fn embedding_cache(&self) -> &EmbeddingCache {
        self.embedder.cache()
    }

    /// Find the idiom in `target` that best matches `input` from `source`.
    ///
    /// Remote failures never surface here: they only change which strategy
    /// produced the result, visible in [`MatchResult::provenance`].
    pub async fn translate(
        &self,
        input: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<MatchResult, TranslateError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(TranslateError::EmptyInput);
        }
        if source == target {
            return Err(TranslateError::SameLanguage(source));
        }

        let candidates = self.corpus.partition(target);
        if candidates.is_empty() {
            warn!("No {target} idioms in corpus");
            return Err(TranslateError::EmptyCandidatePartition { language: target });
        }

        if let Some(record) = self.corpus.find_by_text(target, text) {
            return Ok(self.finish(
                text,
                source,
                SemanticAnalysis::neutral(text),
                record,
                1.0,
                Provenance::Exact,
            ));
        }

        // Stage 1
        let analysis = self.extract_meaning(text, source).await;

        // Stage 2
        let query = match self.embedder.embed(EmbeddingRequest::new(text)).await {
            Ok(response) => Some(response.embedding),
            Err(err) => {
                warn!("Failed to embed input, vector search skipped: {err}");
                None
            }
        };

        // Stage 3
        let vectors = match &query {
            Some(query) => self.candidate_vectors(query, candidates).await,
            None => Vec::new(),
        };
        let pairs = || vectors.iter().map(|(record, embedding)| (*record, &**embedding));

        let best = match &query {
            Some(query) if !vectors.is_empty() => match find_best_match(query, pairs()) {
                Ok(best) => best,
                Err(err) => {
                    warn!("Vector search failed: {err}");
                    None
                }
            },
            _ => None,
        };

        let limit = self.config.ranked_candidates();
        let shortlist: Vec<&IdiomRecord> = match &query {
            Some(query) if !vectors.is_empty() => {
                match find_top_k(query, pairs(), limit, f32::NEG_INFINITY) {
                    Ok(top) => top.into_iter().map(|candidate| candidate.item).collect(),
                    Err(_) => candidates.iter().take(limit).collect(),
                }
            }
            _ => candidates.iter().take(limit).collect(),
        };

        if let Some((record, confidence)) =
            self.remote_rank(text, source, target, &analysis, &shortlist).await
        {
            return Ok(self.finish(
                text,
                source,
                analysis,
                record,
                confidence,
                Provenance::Semantic,
            ));
        }

        // Stage 4
        let Some(best) = best else {
            warn!("No {target} candidate could be scored");
            return Err(TranslateError::NoMatchFound { language: target });
        };

        let floor = self.config.confidence_floor;
        let confidence = if best.score.is_finite() {
            best.score.max(floor)
        } else {
            floor
        };

        Ok(self.finish(
            text,
            source,
            analysis,
            best.item,
            confidence,
            Provenance::Similarity,
        ))
    }

    /// Nearest neighbour of a corpus record among the idioms of `target`,
    /// compared in the corpus embedding space. The record itself is excluded.
    pub fn related(
        &self,
        id: &str,
        target: LanguageCode,
    ) -> Result<ScoredCandidate<&IdiomRecord>, TranslateError> {
        let record = self
            .corpus
            .get(id)
            .ok_or_else(|| TranslateError::UnknownIdiom(id.to_string()))?;

        let candidates = self.corpus.partition(target);
        if candidates.is_empty() {
            return Err(TranslateError::EmptyCandidatePartition { language: target });
        }

        let pairs = candidates
            .iter()
            .filter(|candidate| candidate.id != record.id)
            .map(|candidate| (candidate, &candidate.embedding));

        match find_best_match(&record.embedding, pairs) {
            Ok(Some(best)) => Ok(best),
            Ok(None) => Err(TranslateError::NoMatchFound { language: target }),
            Err(err) => {
                warn!("Related search for {id} failed: {err}");
                Err(TranslateError::NoMatchFound { language: target })
            }
        }
    }

    async fn extract_meaning(&self, text: &str, source: LanguageCode) -> SemanticAnalysis {
        let Some(analyzer) = &self.analyzer else {
            return SemanticAnalysis::neutral(text);
        };

        if !analyzer.is_available() {
            debug!("Analyzer {} unavailable, using neutral analysis", analyzer.name());
            return SemanticAnalysis::neutral(text);
        }

        match analyzer.analyze(text, source).await {
            Ok(analysis) => analysis,
            Err(RemoteError::Unavailable) => {
                debug!("Analyzer {} unavailable, using neutral analysis", analyzer.name());
                SemanticAnalysis::neutral(text)
            }
            Err(err) => {
                warn!("Meaning extraction failed, using neutral analysis: {err}");
                SemanticAnalysis::neutral(text)
            }
        }
    }

    /// Vectors for each candidate in the query's own space. Corpus-space
    /// queries reuse the stored vectors; any other space embeds the surface
    /// text with the same provider. Incomparable vectors are skipped.
    async fn candidate_vectors<'a>(
        &self,
        query: &Embedding,
        candidates: &'a [IdiomRecord],
    ) -> Vec<(&'a IdiomRecord, Cow<'a, Embedding>)> {
        let mut vectors = Vec::with_capacity(candidates.len());

        for record in candidates {
            let embedding = if query.space() == EmbeddingSpace::Corpus {
                Cow::Borrowed(&record.embedding)
            } else {
                match self
                    .embedder
                    .embed(EmbeddingRequest::new(record.text.as_str()))
                    .await
                {
                    Ok(response) => Cow::Owned(response.embedding),
                    Err(err) => {
                        warn!("Failed to embed candidate {}: {err}", record.id);
                        continue;
                    }
                }
            };

            if !query.is_comparable(&embedding) {
                warn!(
                    "Skipping candidate {}: {} vector of dimension {} is not comparable",
                    record.id,
                    embedding.space(),
                    embedding.dimension()
                );
                continue;
            }

            vectors.push((record, embedding));
        }

        vectors
    }

    /// Ask the ranker to pick from `shortlist`. `None` means the vector
    /// result stands.
    async fn remote_rank<'a>(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
        analysis: &SemanticAnalysis,
        shortlist: &[&'a IdiomRecord],
    ) -> Option<(&'a IdiomRecord, f32)> {
        let ranker = self.ranker.as_ref()?;
        if !ranker.is_available() || shortlist.is_empty() {
            debug!("Ranker {} unavailable, using vector search", ranker.name());
            return None;
        }

        let request = RankingRequest {
            input: text.to_string(),
            source,
            target,
            analysis: analysis.clone(),
            candidates: shortlist
                .iter()
                .map(|record| RankCandidate {
                    text: record.text.clone(),
                    semantic_meaning: record.semantic_meaning.clone(),
                })
                .collect(),
        };

        match ranker.rank(&request).await {
            Ok(ranking) => {
                let Some(record) = ranking
                    .position(shortlist.len())
                    .and_then(|position| shortlist.get(position).copied())
                else {
                    warn!(
                        "Ranker index {} out of range for {} candidates, using vector search",
                        ranking.selected_index,
                        shortlist.len()
                    );
                    return None;
                };

                let confidence = ranking
                    .confidence
                    .filter(|confidence| confidence.is_finite())
                    .unwrap_or(DEFAULT_RANKED_CONFIDENCE);
                Some((record, confidence))
            }
            Err(RemoteError::Unavailable) => {
                debug!("Ranker {} unavailable, using vector search", ranker.name());
                None
            }
            Err(err) => {
                warn!("Remote ranking failed, using vector search: {err}");
                None
            }
        }
    }

    fn finish(
        &self,
        text: &str,
        source: LanguageCode,
        analysis: SemanticAnalysis,
        record: &IdiomRecord,
        confidence: f32,
        provenance: Provenance,
    ) -> MatchResult {
        let confidence = confidence.clamp(0.0, 1.0);
        info!(
            "Matched {text:?} to {} via {provenance} ({confidence:.2})",
            record.id
        );

        MatchResult {
            source_text: text.to_string(),
            source_language: source,
            analysis,
            target: record.clone(),
            confidence,
            provenance,
        }
    }
}

/// Builder for [`IdiomMatcher`]. Unset parts default to the seed corpus, the
/// seeded embedder and no remote capabilities.
#[derive(Default)]
pub struct IdiomMatcherBuilder {
    config: Option<MatcherConfig>,
    corpus: Option<Arc<CorpusStore>>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    analyzer: Option<Arc<dyn SemanticAnalyzer>>,
    ranker: Option<Arc<dyn Ranker>>,
}

impl IdiomMatcherBuilder {
    pub fn with_config(mut self, config: MatcherConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_corpus(mut self, corpus: Arc<CorpusStore>) -> Self {
        self.corpus = Some(corpus);
        self
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn SemanticAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_ranker(mut self, ranker: Arc<dyn Ranker>) -> Self {
        self.ranker = Some(ranker);
        self
    }

    pub fn build(self) -> IdiomMatcher {
        let config = self.config.unwrap_or_default();
        let corpus = self
            .corpus
            .unwrap_or_else(|| Arc::new(CorpusStore::seeded()));
        let provider = self
            .embedder
            .unwrap_or_else(|| Arc::new(SeededProvider::new()));

        debug!(
            "Building idiom matcher with {} embeddings over {} idioms",
            provider.name(),
            corpus.len()
        );

        let cache = EmbeddingCache::new(config.embedding.cache_max_entries);

        IdiomMatcher {
            embedder: CachedProvider::new(provider, cache),
            config,
            corpus,
            analyzer: self.analyzer,
            ranker: self.ranker,
        }
    }
}
