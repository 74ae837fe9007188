use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::SearchResult;

/// Orders, deduplicates, thresholds, and truncates the candidate list.
///
/// The sort is stable and compares score only: candidates with equal scores
/// keep their scan order, and no secondary key is introduced. Deduplication
/// keeps the first occurrence of each `(path, text)` pair in sorted order,
/// which is the highest-scored one. The threshold runs before truncation, so
/// `max_results` is filled from results that actually qualify.
#[must_use]
pub fn rank(
    mut candidates: Vec<SearchResult>,
    min_score: f32,
    max_results: usize,
) -> Vec<SearchResult> {
    candidates.sort_by(compare_score_desc);

    let mut seen = HashSet::new();
    let mut ranked: Vec<SearchResult> = candidates
        .into_iter()
        .filter(|candidate| {
            seen.insert((
                candidate.document.path.clone(),
                candidate.unit.text.clone(),
            ))
        })
        .filter(|candidate| candidate.score >= min_score)
        .collect();

    ranked.truncate(max_results);
    ranked
}

fn compare_score_desc(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}
