//! TF-IDF vectorization of combined feature strings.
//!
//! Tokens are lowercased runs of two or more word characters (letters,
//! digits, underscore). The vocabulary is built from the documents passed
//! to a single [`TfidfVectorizer::fit_transform`] call and is not kept
//! between calls.
//!
//! Weights use raw term counts and smoothed inverse document frequency,
//! `idf(t) = ln((1 + n) / (1 + df(t))) + 1`, and every document vector is
//! L2-normalized. A document without tokens gets the zero vector.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

/// A sparse vector of `(term id, weight)` pairs sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(u32, f64)>,
}

impl SparseVector {
    /// Build from entries already sorted by term id.
    fn from_sorted(entries: Vec<(u32, f64)>) -> Self {
        Self { entries }
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted entry lists.
    pub fn dot(&self, other: &Self) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ti, wi) = self.entries[i];
            let (tj, wj) = other.entries[j];
            match ti.cmp(&tj) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wi * wj;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Output of a fit: the call-scoped vocabulary, its IDF weights, and one
/// normalized vector per input document.
#[derive(Debug, Clone)]
pub struct Vectorized {
    pub vocabulary: Vec<String>,
    pub idf: Vec<f64>,
    pub vectors: Vec<SparseVector>,
}

/// Shortest token, in characters, kept by the tokenizer.
const MIN_TOKEN_LEN: usize = 2;

/// Bag-of-words TF-IDF vectorizer.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer;

impl TfidfVectorizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Split a document into lowercased tokens.
    pub fn tokenize(&self, document: &str) -> Vec<String> {
        document
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
            .map(str::to_lowercase)
            .collect()
    }

    /// Learn a vocabulary from `documents` and return their TF-IDF vectors,
    /// in input order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Vectorization`] when there are no documents or no
    /// document contains a single token.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vectorized> {
        if documents.is_empty() {
            return Err(Error::Vectorization("no documents to vectorize".into()));
        }

        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.tokenize(doc.as_ref()))
            .collect();

        let vocabulary: Vec<String> = tokenized
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if vocabulary.is_empty() {
            return Err(Error::Vectorization(
                "empty vocabulary; the documents contain no tokens".into(),
            ));
        }

        let counts: Vec<BTreeMap<u32, u32>> = tokenized
            .iter()
            .map(|tokens| {
                let mut doc_counts = BTreeMap::new();
                for token in tokens {
                    if let Ok(id) = vocabulary.binary_search(token) {
                        *doc_counts.entry(id as u32).or_insert(0) += 1;
                    }
                }
                doc_counts
            })
            .collect();

        let mut df = vec![0u32; vocabulary.len()];
        for doc_counts in &counts {
            for term in doc_counts.keys() {
                df[*term as usize] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + f64::from(d))).ln() + 1.0)
            .collect();

        let vectors = counts
            .into_iter()
            .map(|doc_counts| {
                let mut entries: Vec<(u32, f64)> = doc_counts
                    .into_iter()
                    .map(|(term, count)| (term, f64::from(count) * idf[term as usize]))
                    .collect();
                let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, w) in &mut entries {
                        *w /= norm;
                    }
                }
                SparseVector::from_sorted(entries)
            })
            .collect();

        log::debug!(
            "Vectorized {} documents over {} terms",
            documents.len(),
            vocabulary.len()
        );

        Ok(Vectorized {
            vocabulary,
            idf,
            vectors,
        })
    }
}
