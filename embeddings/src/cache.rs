//! In-memory memoisation of embedding vectors, keyed by text, model and space.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::embedding::{Embedding, EmbeddingSpace};
use crate::error::Result;
use crate::provider::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};

/// A memoised vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub embedding: Embedding,

    pub model: String,

    /// Insertion order. The lowest value is evicted first.
    pub sequence: u64,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<u64, CacheEntry>,
    next_sequence: u64,
}

/// Bounded vector store shared by every clone.
///
/// A capacity of zero disables storage.
#[derive(Clone)]
pub struct EmbeddingCache {
    state: Arc<RwLock<CacheState>>,
    max_entries: usize,
}

impl EmbeddingCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState::default())),
            max_entries,
        }
    }

    fn hash_key(
        text: &str,
        model: &str,
        space: EmbeddingSpace,
        dimensions: Option<usize>,
    ) -> u64 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        model.hash(&mut hasher);
        space.hash(&mut hasher);
        dimensions.hash(&mut hasher);
        hasher.finish()
    }

    /// Look up a vector in `space` for `text` under `model`.
    ///
    /// `dimensions` is the requested output length as sent to the provider;
    /// `None` stands for the provider default and is a key of its own.
    pub async fn get(
        &self,
        text: &str,
        model: &str,
        space: EmbeddingSpace,
        dimensions: Option<usize>,
    ) -> Option<Embedding> {
        let key = Self::hash_key(text, model, space, dimensions);
        let state = self.state.read().await;
        state.entries.get(&key).map(|entry| entry.embedding.clone())
    }

    /// Store `embedding` under its own space, evicting the oldest entry when full.
    pub async fn put(
        &self,
        text: &str,
        model: &str,
        dimensions: Option<usize>,
        embedding: Embedding,
    ) {
        if self.max_entries == 0 {
            return;
        }

        let space = embedding.space();
        let key = Self::hash_key(text, model, space, dimensions);
        let mut state = self.state.write().await;

        if state.entries.len() >= self.max_entries && !state.entries.contains_key(&key) {
            if let Some(oldest) = state
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.sequence)
                .map(|(key, _)| *key)
            {
                state.entries.remove(&oldest);
            }
        }

        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.entries.insert(
            key,
            CacheEntry {
                embedding,
                model: model.to_string(),
                sequence,
            },
        );
        debug!("Memoised {space} vector for model {model}");
    }

    pub async fn contains(
        &self,
        text: &str,
        model: &str,
        space: EmbeddingSpace,
        dimensions: Option<usize>,
    ) -> bool {
        let key = Self::hash_key(text, model, space, dimensions);
        self.state.read().await.entries.contains_key(&key)
    }

    pub async fn stats(&self) -> CacheStats {
        let state = self.state.read().await;
        let models: HashSet<String> = state.entries.values().map(|entry| entry.model.clone()).collect();
        CacheStats {
            entries: state.entries.len(),
            max_entries: self.max_entries,
            models: models.into_iter().collect(),
        }
    }
}

/// Snapshot of cache occupancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub max_entries: usize,

    /// Distinct models among the stored vectors.
    pub models: Vec<String>,
}

/// A provider wrapper that memoises reproducible embeddings.
///
/// Responses flagged as not reproducible (random fallback vectors) are
/// passed through without being cached, so a later successful call can
/// replace them.
pub struct CachedProvider {
    provider: Arc<dyn EmbeddingProvider>,
    cache: EmbeddingCache,
}

impl CachedProvider {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, cache: EmbeddingCache) -> Self {
        Self { provider, cache }
    }

    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }
}

#[async_trait]
impl EmbeddingProvider for CachedProvider {
    fn name(&self) -> &str {
        self.provider.name()
    }

    fn default_model(&self) -> &str {
        self.provider.default_model()
    }

    fn default_dimension(&self) -> usize {
        self.provider.default_dimension()
    }

    fn space(&self) -> EmbeddingSpace {
        self.provider.space()
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string());
        let space = self.provider.space();
        let dimensions = request.dimensions;

        if let Some(embedding) = self.cache.get(&request.text, &model, space, dimensions).await {
            debug!("Embedding served from cache");
            return Ok(EmbeddingResponse {
                embedding,
                model,
                reproducible: true,
            });
        }

        let text = request.text.clone();
        let response = self.provider.embed(request).await?;
        if response.reproducible {
            self.cache
                .put(&text, &model, dimensions, response.embedding.clone())
                .await;
        }

        Ok(response)
    }

    fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SEEDED_DIMENSION;
    use crate::provider::SeededProvider;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn vector(values: Vec<f32>) -> Embedding {
        Embedding::new(EmbeddingSpace::Seeded, values)
    }

    #[tokio::test]
    async fn test_cache_put_get() {
        let cache = EmbeddingCache::new(100);
        let embedding = vector(vec![1.0, 2.0, 3.0]);

        cache.put("hello", "model-1", None, embedding.clone()).await;

        let retrieved = cache.get("hello", "model-1", EmbeddingSpace::Seeded, None).await;
        assert_eq!(retrieved, Some(embedding));
    }

    #[tokio::test]
    async fn test_cache_miss() {
        let cache = EmbeddingCache::new(100);
        let result = cache.get("not cached", "model-1", EmbeddingSpace::Seeded, None).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_cache_keys_include_space() {
        let cache = EmbeddingCache::new(100);
        cache.put("hello", "m", None, vector(vec![1.0])).await;

        assert!(cache.contains("hello", "m", EmbeddingSpace::Seeded, None).await);
        assert!(!cache.contains("hello", "m", EmbeddingSpace::Remote, None).await);
        assert!(!cache.contains("hello", "m", EmbeddingSpace::Seeded, Some(1)).await);
    }

    #[tokio::test]
    async fn test_cache_eviction() {
        let cache = EmbeddingCache::new(2);

        cache.put("a", "model", None, vector(vec![1.0])).await;
        cache.put("b", "model", None, vector(vec![2.0])).await;
        cache.put("c", "model", None, vector(vec![3.0])).await;

        let stats = cache.stats().await;
        assert_eq!(stats.entries, 2);
        assert!(!cache.contains("a", "model", EmbeddingSpace::Seeded, None).await);
        assert!(cache.contains("c", "model", EmbeddingSpace::Seeded, None).await);
    }

    struct CountingProvider {
        calls: AtomicUsize,
        reproducible: bool,
    }

    #[async_trait]
    impl EmbeddingProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn default_model(&self) -> &str {
            "counting-model"
        }

        fn default_dimension(&self) -> usize {
            2
        }

        fn space(&self) -> EmbeddingSpace {
            EmbeddingSpace::Remote
        }

        async fn embed(&self, _request: EmbeddingRequest) -> Result<EmbeddingResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(EmbeddingResponse {
                embedding: Embedding::new(EmbeddingSpace::Remote, vec![1.0, 0.0]),
                model: "counting-model".to_string(),
                reproducible: self.reproducible,
            })
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_cached_provider_memoises_reproducible() {
        let inner = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            reproducible: true,
        });
        let cached = CachedProvider::new(inner.clone(), EmbeddingCache::new(10));

        cached.embed(EmbeddingRequest::new("x")).await.unwrap();
        cached.embed(EmbeddingRequest::new("x")).await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cached_provider_keys_on_requested_dimension() {
        let cached = CachedProvider::new(Arc::new(SeededProvider::new()), EmbeddingCache::new(10));

        let short = cached
            .embed(EmbeddingRequest::new("x").with_dimensions(4))
            .await
            .unwrap();
        let full = cached.embed(EmbeddingRequest::new("x")).await.unwrap();
        let short_again = cached
            .embed(EmbeddingRequest::new("x").with_dimensions(4))
            .await
            .unwrap();

        assert_eq!(short.dimension(), 4);
        assert_eq!(full.dimension(), SEEDED_DIMENSION);
        assert_eq!(short_again.embedding, short.embedding);
        assert_eq!(cached.cache().stats().await.entries, 2);
    }

    #[tokio::test]
    async fn test_cached_provider_skips_fallback_vectors() {
        let inner = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            reproducible: false,
        });
        let cached = CachedProvider::new(inner.clone(), EmbeddingCache::new(10));

        cached.embed(EmbeddingRequest::new("x")).await.unwrap();
        cached.embed(EmbeddingRequest::new("x")).await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached.cache().stats().await.entries, 0);
    }

    #[tokio::test]
    async fn test_cached_provider_forwards_space() {
        let cached = CachedProvider::new(Arc::new(SeededProvider::new()), EmbeddingCache::new(10));
        assert_eq!(cached.space(), EmbeddingSpace::Seeded);

        let response = cached.embed(EmbeddingRequest::new("Spill the beans")).await.unwrap();
        assert_eq!(response.embedding.space(), EmbeddingSpace::Seeded);
    }
}
