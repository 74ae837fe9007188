use std::collections::HashSet;

use crate::error::{LinkError, Result};
use crate::stopwords::StopwordSet;

/// Queries shorter than this after trimming are rejected outright.
const MIN_QUERY_CHARS: usize = 1;

/// Lowercases `text` and splits it on runs of whitespace.
///
/// Punctuation attached to a word stays part of the token (`"learning,"` is
/// not `"learning"`). That keeps matching strict and cheap; it is a known
/// limitation, not an oversight.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(ToString::to_string)
        .collect()
}

/// Tokenizes `text` and drops stopwords, yielding the token set used for
/// scoring. Filtering is idempotent: re-filtering an already filtered set
/// changes nothing.
#[must_use]
pub fn token_set(text: &str, stopwords: &StopwordSet) -> HashSet<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| !stopwords.is_stopword(token))
        .collect()
}

/// Validates and tokenizes the raw query.
///
/// Fails with `EmptyQuery` when the trimmed query is too short and with
/// `QueryAllStopwords` when filtering removes every token. The all-stopwords
/// case deliberately fails instead of falling back to the unfiltered tokens,
/// so a query like "a the" never silently returns zero results.
pub fn prepare_query(raw_query: &str, stopwords: &StopwordSet) -> Result<HashSet<String>> {
    let trimmed = raw_query.trim();
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        return Err(LinkError::EmptyQuery);
    }

    let query_tokens = token_set(trimmed, stopwords);
    if query_tokens.is_empty() {
        return Err(LinkError::QueryAllStopwords);
    }
    Ok(query_tokens)
}
