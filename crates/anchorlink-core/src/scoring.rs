use std::collections::HashSet;

/// Number of query tokens present in the unit's token set.
#[must_use]
pub fn match_count(unit_tokens: &HashSet<String>, query_tokens: &HashSet<String>) -> usize {
    query_tokens
        .iter()
        .filter(|token| unit_tokens.contains(*token))
        .count()
}

/// Overlap score relative to the query: `|unit ∩ query| / |query|`.
///
/// The denominator is always the query token-set size, never the unit's, so
/// a unit containing every query token scores 1.0 regardless of how much
/// other text it carries. Query preparation guarantees a non-empty query
/// set; an empty one here is a caller bug.
#[must_use]
pub fn overlap_score(unit_tokens: &HashSet<String>, query_tokens: &HashSet<String>) -> f32 {
    assert!(
        !query_tokens.is_empty(),
        "overlap_score requires a non-empty query token set"
    );
    usize_to_f32(match_count(unit_tokens, query_tokens)) / usize_to_f32(query_tokens.len())
}

#[allow(
    clippy::cast_precision_loss,
    reason = "overlap ratios are intentionally lossy floating-point values"
)]
const fn usize_to_f32(value: usize) -> f32 {
    value as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn score_is_match_count_over_query_size() {
        let unit = set(&["machine", "learning", "intro"]);
        let query = set(&["machine", "learning", "pipelines", "deployment"]);
        assert!((overlap_score(&unit, &query) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn score_is_one_exactly_when_query_is_subset_of_unit() {
        let unit = set(&["machine", "learning", "extra", "words"]);
        let query = set(&["machine", "learning"]);
        assert!((overlap_score(&unit, &query) - 1.0).abs() < f32::EPSILON);

        let partial_query = set(&["machine", "absent"]);
        assert!(overlap_score(&unit, &partial_query) < 1.0);
    }

    #[test]
    fn score_stays_within_unit_interval() {
        let unit = set(&["a", "b"]);
        let query = set(&["b", "c", "d"]);
        let score = overlap_score(&unit, &query);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn disjoint_sets_score_zero() {
        assert_eq!(overlap_score(&set(&["x"]), &set(&["y"])), 0.0);
    }

    #[test]
    #[should_panic(expected = "non-empty query token set")]
    fn empty_query_set_fails_fast() {
        let _ = overlap_score(&set(&["x"]), &HashSet::new());
    }
}
