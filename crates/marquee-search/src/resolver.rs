//! Query resolution: fuzzy title match, index lookup, ranking, and
//! materializing suggestion titles.

use marquee_core::Dataset;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::matcher::{Candidate, TitleMatcher, DEFAULT_CUTOFF, DEFAULT_MAX_CANDIDATES};
use crate::similarity::SimilarityMatrix;

/// Number of suggestions returned when no limit is given.
pub const DEFAULT_LIMIT: usize = 30;

/// Knobs for a single query.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Maximum number of suggestions.
    pub limit: usize,

    /// Whether the matched movie itself leads the suggestions.
    pub include_query: bool,

    /// Minimum fuzzy-match score for a title to match the query.
    pub cutoff: f64,

    /// Number of close title matches considered (the first is used).
    pub max_candidates: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            include_query: true,
            cutoff: DEFAULT_CUTOFF,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl QueryOptions {
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_include_query(mut self, include: bool) -> Self {
        self.include_query = include;
        self
    }

    #[must_use]
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }
}

/// One suggested movie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub index: usize,
    pub title: String,
    pub score: f32,
}

/// A successful query: what the query matched and what to watch next.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub query: String,

    /// The title the query resolved to.
    pub matched: Candidate,

    /// Record index of the matched title.
    pub matched_index: usize,

    /// Other close title matches, best first.
    pub alternatives: Vec<Candidate>,

    pub suggestions: Vec<Suggestion>,
}

impl Recommendations {
    /// Suggested titles in rank order.
    pub fn titles(&self) -> Vec<&str> {
        self.suggestions.iter().map(|s| s.title.as_str()).collect()
    }
}

/// Resolve `query` against `dataset` and return up to `options.limit`
/// similar movies.
///
/// # Errors
///
/// - [`Error::NoMatchFound`] if no title is close enough to the query.
/// - [`Error::IndexNotFound`] if the matched title has no record.
/// - [`Error::IndexOutOfRange`] if `matrix` is smaller than the dataset.
pub fn recommend(
    query: &str,
    dataset: &Dataset,
    matrix: &SimilarityMatrix,
    options: &QueryOptions,
) -> Result<Recommendations> {
    let matcher = TitleMatcher::new(options.cutoff, options.max_candidates);
    let mut candidates = matcher
        .close_matches(query, dataset.titles())
        .into_iter();
    let matched = candidates.next().ok_or_else(|| Error::NoMatchFound {
        query: query.to_string(),
    })?;

    let matched_index = resolve_index(&matched.title, dataset, matrix)?;
    let ranked = rank(matrix, matched_index, options.include_query)?;

    let suggestions = ranked
        .into_iter()
        .take(options.limit)
        .map(|(index, score)| {
            let title = dataset
                .title(index)
                .ok_or(Error::IndexOutOfRange {
                    index,
                    size: dataset.len(),
                })?
                .to_string();
            Ok(Suggestion { index, title, score })
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "'{}' resolved to '{}' (index {}), {} suggestion(s)",
        query,
        matched.title,
        matched_index,
        suggestions.len()
    );

    Ok(Recommendations {
        query: query.to_string(),
        matched,
        matched_index,
        alternatives: candidates.collect(),
        suggestions,
    })
}

/// Record index for a title, checked against the matrix dimensions.
///
/// # Errors
///
/// Returns [`Error::IndexNotFound`] if no record has this exact title and
/// [`Error::IndexOutOfRange`] if the index is outside the matrix.
pub fn resolve_index(title: &str, dataset: &Dataset, matrix: &SimilarityMatrix) -> Result<usize> {
    let index = dataset
        .position_of_title(title)
        .ok_or_else(|| Error::IndexNotFound {
            title: title.to_string(),
        })?;

    if index >= matrix.size() {
        return Err(Error::IndexOutOfRange {
            index,
            size: matrix.size(),
        });
    }
    Ok(index)
}

/// Every column of row `index` ordered for presentation.
///
/// The queried record comes first when included (and is dropped
/// otherwise); the rest follow by score, highest first, with equal
/// scores in ascending index order.
///
/// # Errors
///
/// Returns [`Error::IndexOutOfRange`] if `index` is outside the matrix.
pub fn rank(
    matrix: &SimilarityMatrix,
    index: usize,
    include_query: bool,
) -> Result<Vec<(usize, f32)>> {
    let row = matrix.row(index).ok_or(Error::IndexOutOfRange {
        index,
        size: matrix.size(),
    })?;

    let (own, mut others): (Vec<_>, Vec<_>) = row.into_iter().partition(|(j, _)| *j == index);
    others.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    if include_query {
        Ok(own.into_iter().chain(others).collect())
    } else {
        Ok(others)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorize::TfidfVectorizer;
    use marquee_core::Record;

    fn fixture() -> (Dataset, SimilarityMatrix) {
        let docs = [
            "action hero armor",
            "animation robot hero",
            "fairy tale princess",
            "action hero armor",
        ];
        let records = ["Iron Man", "The Iron Giant", "Cinderella", "Iron Man 2"]
            .iter()
            .enumerate()
            .map(|(i, title)| Record::new(i, *title))
            .collect();
        let dataset = Dataset::new(records).unwrap();
        let matrix = SimilarityMatrix::compute(&docs, &TfidfVectorizer::new()).unwrap();
        (dataset, matrix)
    }

    #[test]
    fn test_recommend_puts_query_first() {
        let (dataset, matrix) = fixture();
        let recs = recommend("iron man", &dataset, &matrix, &QueryOptions::default()).unwrap();

        assert_eq!(recs.matched.title, "Iron Man");
        assert_eq!(recs.matched_index, 0);
        assert_eq!(recs.titles(), ["Iron Man", "Iron Man 2", "The Iron Giant", "Cinderella"]);
        assert_eq!(recs.suggestions[0].score, 1.0);
        assert_eq!(recs.alternatives[0].title, "Iron Man 2");
    }

    #[test]
    fn test_recommend_can_exclude_query() {
        let (dataset, matrix) = fixture();
        let options = QueryOptions::default().with_include_query(false);
        let recs = recommend("Iron Man", &dataset, &matrix, &options).unwrap();
        assert_eq!(recs.titles(), ["Iron Man 2", "The Iron Giant", "Cinderella"]);
    }

    #[test]
    fn test_recommend_respects_limit() {
        let (dataset, matrix) = fixture();
        let options = QueryOptions::default().with_limit(2);
        let recs = recommend("Iron Man", &dataset, &matrix, &options).unwrap();
        assert_eq!(recs.suggestions.len(), 2);

        let none = recommend("Iron Man", &dataset, &matrix, &QueryOptions::default().with_limit(0))
            .unwrap();
        assert!(none.suggestions.is_empty());
    }

    #[test]
    fn test_no_match_is_typed_error() {
        let (dataset, matrix) = fixture();
        let err = recommend("Zzyzx Quantum Files", &dataset, &matrix, &QueryOptions::default())
            .unwrap_err();
        assert!(err.is_no_match());
    }

    #[test]
    fn test_stale_matrix_is_out_of_range() {
        let (dataset, _) = fixture();
        let small =
            SimilarityMatrix::compute(&["action", "robot"], &TfidfVectorizer::new()).unwrap();
        let err = recommend("Cinderella", &dataset, &small, &QueryOptions::default()).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 2, size: 2 }));
    }

    #[test]
    fn test_resolve_unknown_title() {
        let (dataset, matrix) = fixture();
        let err = resolve_index("Heat", &dataset, &matrix).unwrap_err();
        assert!(matches!(err, Error::IndexNotFound { .. }));
    }

    #[test]
    fn test_rank_ties_in_index_order() {
        let matrix = SimilarityMatrix::compute(
            &["hero", "hero", "villain", "hero"],
            &TfidfVectorizer::new(),
        )
        .unwrap();
        let ranked = rank(&matrix, 3, true).unwrap();
        let order: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, [3, 0, 1, 2]);
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let (dataset, matrix) = fixture();
        let first = recommend("Iron Giant", &dataset, &matrix, &QueryOptions::default()).unwrap();
        let second = recommend("Iron Giant", &dataset, &matrix, &QueryOptions::default()).unwrap();
        assert_eq!(first, second);
    }
}
