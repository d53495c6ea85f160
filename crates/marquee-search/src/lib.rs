//! Similarity search for marquee.
//!
//! Turns each movie's combined feature string into a TF-IDF vector,
//! scores every pair of movies by cosine similarity, and answers
//! free-text title queries with a ranked list of similar movies.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod index;
pub mod matcher;
pub mod resolver;
pub mod similarity;
pub mod vectorize;

pub use error::{Error, Result};
pub use index::{IndexHandle, RecommendationIndex};
pub use matcher::{Candidate, TitleMatcher};
pub use resolver::{recommend, QueryOptions, Recommendations, Suggestion, DEFAULT_LIMIT};
pub use similarity::SimilarityMatrix;
pub use vectorize::{SparseVector, TfidfVectorizer};
