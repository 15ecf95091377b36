//! Read-only corpus store.
//!
//! The store is assembled once and never mutated, so it can be shared
//! between concurrent requests behind an `Arc` without locking.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use idiom_embeddings::EmbeddingSpace;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CorpusError, Result};
use crate::language::LanguageCode;
use crate::record::IdiomRecord;
use crate::seed::seed_records;

/// Aggregate counts over the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Number of records across all partitions.
    pub total: usize,

    /// Records per language. Every supported language is present.
    pub by_language: BTreeMap<LanguageCode, usize>,

    /// Records per category label.
    pub categories: BTreeMap<String, usize>,
}

/// Immutable table of idiom records partitioned by language.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    partitions: BTreeMap<LanguageCode, Vec<IdiomRecord>>,
    by_id: HashMap<String, (LanguageCode, usize)>,
}

impl CorpusStore {
    /// The built-in seed corpus: twenty idioms for each language.
    pub fn seeded() -> Self {
        let mut partitions: BTreeMap<LanguageCode, Vec<IdiomRecord>> = BTreeMap::new();
        for record in seed_records() {
            partitions.entry(record.language).or_default().push(record);
        }
        Self::from_partitions(partitions)
    }

    /// Start assembling a custom corpus.
    pub fn builder() -> CorpusBuilder {
        CorpusBuilder::new()
    }

    fn from_partitions(partitions: BTreeMap<LanguageCode, Vec<IdiomRecord>>) -> Self {
        let by_id = partitions
            .iter()
            .flat_map(|(language, records)| {
                records
                    .iter()
                    .enumerate()
                    .map(|(position, record)| (record.id.clone(), (*language, position)))
            })
            .collect();

        Self { partitions, by_id }
    }

    /// Records of one language in corpus order. Empty when the language has
    /// no records.
    pub fn partition(&self, language: LanguageCode) -> &[IdiomRecord] {
        self.partitions
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every record, partition by partition.
    pub fn all(&self) -> Vec<&IdiomRecord> {
        self.partitions.values().flatten().collect()
    }

    /// Look up a record by identifier.
    pub fn get(&self, id: &str) -> Option<&IdiomRecord> {
        let (language, position) = self.by_id.get(id)?;
        self.partitions.get(language)?.get(*position)
    }

    /// Find a record of `language` whose surface text equals `text`,
    /// ignoring case and surrounding whitespace.
    pub fn find_by_text(&self, language: LanguageCode, text: &str) -> Option<&IdiomRecord> {
        self.partition(language)
            .iter()
            .find(|record| record.matches_text(text))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Record count per language, including languages with no records.
    pub fn count_by_language(&self) -> BTreeMap<LanguageCode, usize> {
        LanguageCode::ALL
            .into_iter()
            .map(|language| (language, self.partition(language).len()))
            .collect()
    }

    /// Record count per category across the full corpus.
    pub fn category_histogram(&self) -> BTreeMap<String, usize> {
        let mut histogram = BTreeMap::new();
        for record in self.partitions.values().flatten() {
            *histogram.entry(record.category.clone()).or_insert(0) += 1;
        }
        histogram
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            total: self.len(),
            by_language: self.count_by_language(),
            categories: self.category_histogram(),
        }
    }
}

impl Default for CorpusStore {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Builder that validates the partition invariants before producing a
/// [`CorpusStore`].
#[derive(Debug, Default)]
pub struct CorpusBuilder {
    partitions: BTreeMap<LanguageCode, Vec<IdiomRecord>>,
    excluded: BTreeSet<LanguageCode>,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the built-in seed records.
    pub fn with_seed_data(mut self) -> Self {
        for record in seed_records() {
            self.partitions.entry(record.language).or_default().push(record);
        }
        self
    }

    /// Append a record to its own language's partition.
    pub fn with_record(mut self, record: IdiomRecord) -> Self {
        self.partitions.entry(record.language).or_default().push(record);
        self
    }

    /// Append records to the partition of `language`. Records whose own
    /// language differs are rejected by [`CorpusBuilder::build`].
    pub fn with_partition(mut self, language: LanguageCode, records: Vec<IdiomRecord>) -> Self {
        self.partitions.entry(language).or_default().extend(records);
        self
    }

    /// Leave the partition of `language` empty.
    pub fn without_language(mut self, language: LanguageCode) -> Self {
        self.excluded.insert(language);
        self
    }

    pub fn build(self) -> Result<CorpusStore> {
        let Self {
            mut partitions,
            excluded,
        } = self;

        partitions.retain(|language, _| !excluded.contains(language));

        let mut seen = BTreeSet::new();
        let mut dimension = None;

        for (language, records) in &partitions {
            for record in records {
                if record.language != *language {
                    return Err(CorpusError::PartitionMismatch {
                        id: record.id.clone(),
                        expected: *language,
                        actual: record.language,
                    });
                }

                if !seen.insert(record.id.as_str()) {
                    return Err(CorpusError::DuplicateId(record.id.clone()));
                }

                if record.embedding.space() != EmbeddingSpace::Corpus {
                    return Err(CorpusError::WrongEmbeddingSpace {
                        id: record.id.clone(),
                        space: record.embedding.space(),
                    });
                }

                let expected = *dimension.get_or_insert(record.embedding.dimension());
                if record.embedding.dimension() != expected {
                    return Err(CorpusError::DimensionMismatch {
                        id: record.id.clone(),
                        expected,
                        actual: record.embedding.dimension(),
                    });
                }
            }
        }

        let store = CorpusStore::from_partitions(partitions);
        debug!("Built corpus with {} records", store.len());
        Ok(store)
    }
}
