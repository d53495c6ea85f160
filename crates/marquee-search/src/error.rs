//! Error types for index building and query resolution.

use thiserror::Error;

/// Errors raised while building a similarity index or answering a query.
#[derive(Debug, Error)]
pub enum Error {
    /// No usable vocabulary could be built from the feature strings.
    #[error("vectorization failed: {0}")]
    Vectorization(String),

    /// The query did not fuzzy-match any known title.
    #[error("no close match found for '{query}'")]
    NoMatchFound { query: String },

    /// A matched title has no record in the dataset.
    #[error("no record index found for title '{title}'")]
    IndexNotFound { title: String },

    /// A record index lies outside the similarity matrix.
    #[error("index {index} is out of range for a {size}x{size} similarity matrix")]
    IndexOutOfRange { index: usize, size: usize },

    /// An error propagated from the dataset layer.
    #[error(transparent)]
    Core(#[from] marquee_core::Error),
}

impl Error {
    /// Short machine-readable name of the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Vectorization(_) => "vectorization",
            Self::NoMatchFound { .. } => "no_match_found",
            Self::IndexNotFound { .. } => "index_not_found",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::Core(e) => e.kind(),
        }
    }

    /// Returns `true` when the query itself was at fault rather than the
    /// data behind it.
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatchFound { .. })
    }
}

/// Convenience alias for search results.
pub type Result<T> = std::result::Result<T, Error>;
