use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use serde_json::json;

use crate::config::SearchSettings;
use crate::error::{LinkError, Result};
use crate::extract::extract_units;
use crate::models::SearchResult;
use crate::rank::rank;
use crate::scoring::{match_count, overlap_score};
use crate::stopwords::StopwordSet;
use crate::text::{prepare_query, token_set};

use super::AnchorLink;

impl AnchorLink {
    /// Runs one search of the whole corpus against `raw_query`.
    ///
    /// `active_path` identifies the caller's current document, which is
    /// excluded from the scan unless `search_current_file` is set. An `Ok`
    /// value is always non-empty; empty outcomes surface as the
    /// distinguishable `NoMatches` / `BelowThreshold` errors.
    pub fn search(
        &self,
        raw_query: &str,
        active_path: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();
        let query_preview = raw_query.trim().to_string();

        let output = (|| -> Result<Vec<SearchResult>> {
            let _gate = SearchGate::acquire(&self.search_gate)?;

            let (settings, stopwords) = self.search_profile()?;
            let query_tokens = prepare_query(raw_query, &stopwords)?;

            let candidates = self.scan_corpus(
                &query_tokens,
                &stopwords,
                &settings,
                active_path,
                &request_id,
                started,
            )?;
            if candidates.is_empty() {
                return Err(LinkError::NoMatches);
            }

            let ranked = rank(candidates, settings.min_score, settings.max_results);
            if ranked.is_empty() {
                return Err(LinkError::BelowThreshold);
            }
            Ok(ranked)
        })();

        match output {
            Ok(results) => {
                self.log_request_status(
                    request_id,
                    "search",
                    "ok",
                    started,
                    active_path.map(ToString::to_string),
                    Some(json!({
                        "query": query_preview,
                        "result_count": results.len(),
                        "top_score": results.first().map(|r| r.score),
                    })),
                );
                Ok(results)
            }
            Err(err) => {
                self.log_request_error(
                    request_id,
                    "search",
                    started,
                    active_path.map(ToString::to_string),
                    &err,
                    Some(json!({ "query": query_preview })),
                );
                Err(err)
            }
        }
    }

    /// Visits every eligible document and collects each unit sharing at
    /// least one token with the query. Per-document read failures are logged
    /// and skipped so one bad document cannot fail the whole scan.
    fn scan_corpus(
        &self,
        query_tokens: &std::collections::HashSet<String>,
        stopwords: &StopwordSet,
        settings: &SearchSettings,
        active_path: Option<&str>,
        request_id: &str,
        started: Instant,
    ) -> Result<Vec<SearchResult>> {
        let ignore_prefixes = settings.normalized_ignore_prefixes();
        let mut candidates = Vec::new();

        for document in self.vault.list_documents()? {
            if !settings.search_current_file && active_path == Some(document.path.as_str()) {
                continue;
            }
            if ignore_prefixes
                .iter()
                .any(|prefix| document.path.starts_with(prefix.as_str()))
            {
                continue;
            }

            let metadata = match self.vault.metadata(&document.path) {
                Ok(Some(metadata)) => metadata,
                Ok(None) => continue,
                Err(err) => {
                    self.log_request_warning(
                        request_id.to_string(),
                        "search",
                        started,
                        Some(document.path.clone()),
                        &format!("metadata unavailable, document skipped: {err}"),
                        None,
                    );
                    continue;
                }
            };
            let content = match self.vault.read(&document.path) {
                Ok(content) => content,
                Err(err) => {
                    self.log_request_warning(
                        request_id.to_string(),
                        "search",
                        started,
                        Some(document.path.clone()),
                        &format!("content unreadable, document skipped: {err}"),
                        None,
                    );
                    continue;
                }
            };

            for unit in extract_units(&metadata, &content) {
                let unit_tokens = token_set(&unit.text, stopwords);
                if match_count(&unit_tokens, query_tokens) == 0 {
                    continue;
                }
                let score = overlap_score(&unit_tokens, query_tokens);
                candidates.push(SearchResult {
                    document: document.clone(),
                    unit,
                    score,
                });
            }
        }

        Ok(candidates)
    }
}

/// Single-slot reentrancy guard: a second search while one is active fails
/// fast instead of queuing. Released on drop, including error paths.
struct SearchGate<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SearchGate<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        if flag
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(LinkError::SearchBusy);
        }
        Ok(Self { flag })
    }
}

impl Drop for SearchGate<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::SearchGate;

    #[test]
    fn gate_rejects_a_second_acquisition_while_held() {
        let flag = AtomicBool::new(false);
        let first = SearchGate::acquire(&flag).expect("first acquisition");
        assert!(SearchGate::acquire(&flag).is_err());
        drop(first);
        assert!(SearchGate::acquire(&flag).is_ok());
    }
}
