//! Prebuilt recommendation index and its copy-and-swap handle.
//!
//! Loading, combining, and vectorizing do not depend on the query, so
//! they run once per dataset snapshot. The resulting
//! [`RecommendationIndex`] is immutable; [`IndexHandle`] publishes it to
//! readers and swaps in a fully built replacement on refresh.

use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use marquee_core::{combine_features, Dataset, FeatureSet};

use crate::error::Result;
use crate::resolver::{self, QueryOptions, Recommendations};
use crate::similarity::SimilarityMatrix;
use crate::vectorize::TfidfVectorizer;

/// A dataset snapshot together with its similarity matrix.
#[derive(Debug)]
pub struct RecommendationIndex {
    dataset: Dataset,
    features: FeatureSet,
    matrix: SimilarityMatrix,
    fingerprint: u64,
    vocabulary_size: usize,
    build_time: Duration,
}

impl RecommendationIndex {
    /// Combine, vectorize, and score every record of `dataset`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Core`] if a record lacks a selected field and
    /// [`crate::Error::Vectorization`] if no vocabulary can be built.
    pub fn build(dataset: Dataset, features: FeatureSet) -> Result<Self> {
        let started = Instant::now();
        let fingerprint = dataset.fingerprint(&features);

        let documents = combine_features(&dataset, &features)?;
        let vectorized = TfidfVectorizer::new().fit_transform(documents.as_slice())?;
        let matrix = SimilarityMatrix::from_vectors(&vectorized.vectors);

        let build_time = started.elapsed();
        log::info!(
            "Built similarity index: {} movies, {} terms, {:.2?}",
            dataset.len(),
            vectorized.vocabulary.len(),
            build_time
        );

        Ok(Self {
            dataset,
            features,
            matrix,
            fingerprint,
            vocabulary_size: vectorized.vocabulary.len(),
            build_time,
        })
    }

    /// Answer a query against this snapshot.
    ///
    /// # Errors
    ///
    /// See [`resolver::recommend`].
    pub fn recommend(&self, query: &str, options: &QueryOptions) -> Result<Recommendations> {
        resolver::recommend(query, &self.dataset, &self.matrix, options)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    pub fn build_time(&self) -> Duration {
        self.build_time
    }
}

/// Shared access to the current index snapshot.
///
/// Readers take an `Arc` to the snapshot and keep using it for the whole
/// query, even if a refresh publishes a newer one meanwhile. Refreshes run
/// one at a time, so each one compares against the snapshot the previous
/// refresh left behind.
#[derive(Debug)]
pub struct IndexHandle {
    current: RwLock<Arc<RecommendationIndex>>,
    refreshing: Mutex<()>,
}

impl IndexHandle {
    #[must_use]
    pub fn new(index: RecommendationIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
            refreshing: Mutex::new(()),
        }
    }

    /// The snapshot queries should run against right now.
    pub fn snapshot(&self) -> Arc<RecommendationIndex> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    fn publish(&self, index: RecommendationIndex) {
        let fresh = Arc::new(index);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = fresh;
    }

    /// Rebuild from `dataset` unless it matches the current snapshot.
    ///
    /// The new index is built before the read/write lock is taken, so
    /// queries keep running during the build. A concurrent refresh waits
    /// for this one to publish. Returns `true` when a new snapshot was
    /// published.
    ///
    /// # Errors
    ///
    /// Returns the build error and leaves the current snapshot in place.
    pub fn refresh(&self, dataset: Dataset) -> Result<bool> {
        let _refreshing = self.refreshing.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.snapshot();
        let features = current.features().clone();

        if dataset.fingerprint(&features) == current.fingerprint() {
            log::warn!("Dataset unchanged since last build; keeping current index");
            return Ok(false);
        }

        let rebuilt = RecommendationIndex::build(dataset, features)?;
        self.publish(rebuilt);
        Ok(true)
    }

    /// Convenience for `snapshot().recommend(..)`.
    ///
    /// # Errors
    ///
    /// See [`resolver::recommend`].
    pub fn recommend(&self, query: &str, options: &QueryOptions) -> Result<Recommendations> {
        self.snapshot().recommend(query, options)
    }
}
