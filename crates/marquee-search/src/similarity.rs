//! All-pairs cosine similarity over TF-IDF vectors.

use crate::error::Result;
use crate::vectorize::{SparseVector, TfidfVectorizer};

/// Symmetric N x N matrix of cosine similarity scores in `[0, 1]`.
///
/// Only the upper triangle (diagonal included) is stored, row by row, so
/// `get(i, j) == get(j, i)` holds by construction. The diagonal is `1.0`
/// for every record with at least one token; a record whose feature
/// string has no tokens scores `0.0` against everything, itself included.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    packed: Vec<f32>,
}

impl SimilarityMatrix {
    /// Vectorize `documents` and compute their similarity matrix.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Vectorization`] when no vocabulary can be
    /// built from the documents.
    pub fn compute<S: AsRef<str>>(documents: &[S], vectorizer: &TfidfVectorizer) -> Result<Self> {
        let vectorized = vectorizer.fit_transform(documents)?;
        Ok(Self::from_vectors(&vectorized.vectors))
    }

    /// Cosine similarity between every pair of L2-normalized vectors.
    pub fn from_vectors(vectors: &[SparseVector]) -> Self {
        let size = vectors.len();
        let mut packed = Vec::with_capacity(size * (size + 1) / 2);

        for (i, row) in vectors.iter().enumerate() {
            let row_is_zero = row.is_zero();
            packed.push(if row_is_zero { 0.0 } else { 1.0 });
            for column in &vectors[i + 1..] {
                let score = if row_is_zero {
                    0.0
                } else {
                    row.dot(column).clamp(0.0, 1.0) as f32
                };
                packed.push(score);
            }
        }

        Self { size, packed }
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i >= self.size || j >= self.size {
            return None;
        }
        let (row, col) = if i <= j { (i, j) } else { (j, i) };
        Some(self.packed[self.row_start(row) + (col - row)])
    }

    /// The full row `i` as `(column, score)` pairs in column order.
    pub fn row(&self, i: usize) -> Option<Vec<(usize, f32)>> {
        if i >= self.size {
            return None;
        }
        Some(
            (0..self.size)
                .filter_map(|j| self.get(i, j).map(|score| (j, score)))
                .collect(),
        )
    }

    /// Offset of row `r`'s diagonal entry in the packed storage.
    fn row_start(&self, r: usize) -> usize {
        r * (2 * self.size - r + 1) / 2
    }
}
