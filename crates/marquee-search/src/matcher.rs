//! Fuzzy title matching.
//!
//! Titles are compared case-insensitively with the Ratcliff/Obershelp
//! ratio `2 * M / (len(a) + len(b))`, where `M` counts the characters in
//! the matching blocks found by repeatedly taking the longest common
//! substring, so a partial query such as "Dark Knight" still finds
//! "The Dark Knight Rises". Candidates below the cutoff are dropped; the
//! rest are ordered by score (highest first), then by title.

use std::collections::HashSet;

use serde::Serialize;

/// Minimum similarity for a title to count as a close match.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Maximum number of close matches reported.
pub const DEFAULT_MAX_CANDIDATES: usize = 3;

/// A title that matched a query, with its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub title: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct TitleMatcher {
    cutoff: f64,
    max_candidates: usize,
}

impl Default for TitleMatcher {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl TitleMatcher {
    #[must_use]
    pub fn new(cutoff: f64, max_candidates: usize) -> Self {
        Self {
            cutoff: cutoff.clamp(0.0, 1.0),
            max_candidates: max_candidates.max(1),
        }
    }

    /// Close matches for `query` among `titles`, best first.
    ///
    /// Duplicate titles are considered once. A blank query matches nothing.
    pub fn close_matches<'a, I>(&self, query: &str, titles: I) -> Vec<Candidate>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let needle: Vec<char> = query.trim().to_lowercase().chars().collect();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut candidates: Vec<Candidate> = titles
            .into_iter()
            .filter(|title| seen.insert(*title))
            .filter_map(|title| {
                let hay: Vec<char> = title.to_lowercase().chars().collect();
                let score = ratio(&hay, &needle);
                (score >= self.cutoff).then(|| Candidate {
                    title: title.to_string(),
                    score,
                })
            })
            .collect();

        // Equal scores fall back to title order.
        candidates.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.title.cmp(&b.title))
        });
        candidates.truncate(self.max_candidates);

        log::debug!(
            "Query '{}' matched {} candidate(s)",
            query,
            candidates.len()
        );
        candidates
    }

    /// The single best match, if any title clears the cutoff.
    pub fn best_match<'a, I>(&self, query: &str, titles: I) -> Option<Candidate>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.close_matches(query, titles).into_iter().next()
    }
}

/// Similarity of two character sequences in `[0.0, 1.0]`.
///
/// Two empty sequences are identical.
fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(a, b) as f64 / total as f64
}

/// Characters covered by the matching blocks of `a` and `b`.
///
/// The longest common run is taken first, then the parts to its left and
/// right are matched the same way.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut matched = 0;

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]` as
/// `(start in a, start in b, length)`.
///
/// Among runs of equal length the one starting earliest in `a`, then
/// earliest in `b`, wins.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run[col + 1] is the length of the common run ending at the previous
    // row's character and b[blo + col].
    let mut run = vec![0usize; bhi - blo + 1];
    let mut next = vec![0usize; bhi - blo + 1];

    for (row, ca) in a[alo..ahi].iter().enumerate() {
        for (col, cb) in b[blo..bhi].iter().enumerate() {
            next[col + 1] = if ca == cb { run[col] + 1 } else { 0 };
            if next[col + 1] > best_size {
                best_size = next[col + 1];
                best_i = alo + row + 1 - best_size;
                best_j = blo + col + 1 - best_size;
            }
        }
        std::mem::swap(&mut run, &mut next);
    }

    (best_i, best_j, best_size)
}
