use std::collections::{BTreeMap, BTreeSet, HashMap};

use indexmap::IndexSet;

use crate::error::IndexError;

/// Vectorizer parameters
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSettings {
    /// Inclusive (min, max) n-gram lengths
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a term must occur in
    pub min_df: usize,
    /// Maximum fraction of documents a term may occur in
    pub max_df: f64,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            min_df: 2,
            max_df: 0.8,
        }
    }
}

impl From<&crate::config::Config> for IndexSettings {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            ngram_range: (config.tfidf_ngram_min, config.tfidf_ngram_max),
            min_df: config.tfidf_min_df,
            max_df: config.tfidf_max_df,
        }
    }
}

/// Sparse vector keyed by vocabulary index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: BTreeMap<usize, f64>,
}

impl SparseVector {
    /// Builds a vector, dropping zero weights
    pub fn from_entries(entries: impl IntoIterator<Item = (usize, f64)>) -> Self {
        Self {
            entries: entries.into_iter().filter(|(_, w)| *w != 0.0).collect(),
        }
    }

    pub fn get(&self, index: usize) -> f64 {
        self.entries.get(&index).copied().unwrap_or(0.0)
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-zero indices in ascending order
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    pub fn norm(&self) -> f64 {
        self.entries.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (small, large) = if self.nnz() <= other.nnz() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .entries
            .iter()
            .filter_map(|(i, w)| large.entries.get(i).map(|v| w * v))
            .sum()
    }

    /// Cosine similarity; zero when either side is the zero vector
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        self.dot(other) / denom
    }

    /// Indices that are non-zero in both vectors, ascending
    pub fn shared_indices(&self, other: &SparseVector) -> Vec<usize> {
        let mine: BTreeSet<usize> = self.indices().collect();
        let theirs: BTreeSet<usize> = other.indices().collect();
        mine.intersection(&theirs).copied().collect()
    }

    fn l2_normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for weight in self.entries.values_mut() {
                *weight /= norm;
            }
        }
        self
    }
}

/// TF-IDF vectorizer with smoothed idf and L2-normalized rows
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    ngram_range: (usize, usize),
    vocabulary: IndexSet<String>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learns vocabulary and idf from `documents` and returns the document-term rows
    pub fn fit_transform(
        documents: &[String],
        settings: &IndexSettings,
    ) -> Result<(Self, Vec<SparseVector>), IndexError> {
        let (min_n, max_n) = settings.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(IndexError::InvalidNgramRange(min_n, max_n));
        }

        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| count_terms(doc, settings.ngram_range))
            .collect();

        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for doc in &counts {
            for term in doc.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        if document_frequency.is_empty() {
            return Err(IndexError::EmptyVocabulary);
        }

        let n_docs = documents.len();
        let max_docs = settings.max_df * n_docs as f64;
        if max_docs < settings.min_df as f64 {
            return Err(IndexError::InconsistentDocumentFrequency {
                max_docs,
                min_df: settings.min_df,
            });
        }

        let kept: BTreeMap<&str, usize> = document_frequency
            .into_iter()
            .filter(|(_, df)| *df >= settings.min_df && (*df as f64) <= max_docs)
            .collect();
        if kept.is_empty() {
            return Err(IndexError::NoTermsRemain);
        }

        let vocabulary: IndexSet<String> = kept.keys().map(|t| t.to_string()).collect();
        let idf = kept
            .values()
            .map(|df| ((1.0 + n_docs as f64) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let vectorizer = Self {
            ngram_range: settings.ngram_range,
            vocabulary,
            idf,
        };
        let rows = counts.iter().map(|c| vectorizer.weigh(c)).collect();

        Ok((vectorizer, rows))
    }

    /// Projects a document into the fitted space; unknown terms are ignored
    pub fn transform(&self, document: &str) -> SparseVector {
        self.weigh(&count_terms(document, self.ngram_range))
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.vocabulary.get_index(index).map(String::as_str)
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get_index_of(term)
    }

    pub fn idf(&self, index: usize) -> Option<f64> {
        self.idf.get(index).copied()
    }

    fn weigh(&self, counts: &HashMap<String, usize>) -> SparseVector {
        SparseVector::from_entries(counts.iter().filter_map(|(term, count)| {
            self.vocabulary
                .get_index_of(term.as_str())
                .map(|i| (i, *count as f64 * self.idf[i]))
        }))
        .l2_normalized()
    }
}

/// Splits on non-word characters and keeps tokens of at least two characters
fn tokenize(document: &str) -> Vec<&str> {
    document
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .collect()
}

fn count_terms(document: &str, (min_n, max_n): (usize, usize)) -> HashMap<String, usize> {
    let tokens = tokenize(document);
    let mut counts = HashMap::new();
    for n in min_n..=max_n {
        for window in tokens.windows(n) {
            *counts.entry(window.join(" ")).or_insert(0) += 1;
        }
    }
    counts
}

/// Fitted vocabulary plus one TF-IDF row per module; read-only after construction
#[derive(Debug, Clone)]
pub struct VectorSpace {
    vectorizer: TfidfVectorizer,
    matrix: Vec<SparseVector>,
}

impl VectorSpace {
    pub fn fit(documents: &[String], settings: &IndexSettings) -> Result<Self, IndexError> {
        let (vectorizer, matrix) = TfidfVectorizer::fit_transform(documents, settings)?;
        Ok(Self { vectorizer, matrix })
    }

    pub fn project(&self, document: &str) -> SparseVector {
        self.vectorizer.transform(document)
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.matrix
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.matrix.get(index)
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.vectorizer.term(index)
    }

    pub fn features_count(&self) -> usize {
        self.vectorizer.vocabulary_len()
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }
}
