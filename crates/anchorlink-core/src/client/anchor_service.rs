use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde_json::json;

use crate::error::{LinkError, Result};
use crate::link;
use crate::models::{DocumentRecord, SearchResult};

use super::AnchorLink;

const BLOCK_ID_LEN: usize = 6;

impl AnchorLink {
    /// Returns a stable link target for `result`, materializing a block
    /// anchor on first use.
    ///
    /// Results that already carry a target (headings, pre-anchored blocks,
    /// or a result this method already resolved) return it unchanged without
    /// touching the document. Otherwise a fresh id is generated, appended to
    /// the end of the block's last line, and persisted exactly once; the
    /// result is updated in place so repeated calls take the fast path.
    /// Writes to one document are serialized through a per-path lock, and a
    /// document whose content changed since the scan is refused rather than
    /// spliced at a stale line.
    pub fn resolve_link_target(&self, result: &mut SearchResult) -> Result<String> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();
        let target_path = result.document.path.clone();

        let output = (|| -> Result<String> {
            if result.unit.has_link_target() {
                return Ok(result.unit.link_target.clone());
            }
            let Some(position) = result.unit.position else {
                return Err(LinkError::Validation(
                    "result carries neither a link target nor a block position".to_string(),
                ));
            };

            let path_lock = self.anchor_lock(&result.document.path)?;
            let _guard = path_lock
                .lock()
                .map_err(|_| LinkError::lock_poisoned("anchor write"))?;

            let existing_ids = self
                .vault
                .metadata(&result.document.path)?
                .map(|metadata| metadata.blocks)
                .unwrap_or_default();
            let id = generate_block_id(&existing_ids);

            let new_etag = self
                .vault
                .append_to_line(
                    &result.document.path,
                    position.end_line,
                    &format!(" ^{id}"),
                    &result.document.etag,
                )
                .map_err(|err| {
                    LinkError::AnchorWriteFailed(format!("{}: {err}", result.document.path))
                })?;

            result.document.etag = new_etag;
            result.unit.link_target = format!("^{id}");
            result.unit.position = None;
            Ok(result.unit.link_target.clone())
        })();

        match output {
            Ok(link_target) => {
                self.log_request_status(
                    request_id,
                    "resolve_link_target",
                    "ok",
                    started,
                    Some(target_path),
                    Some(json!({ "link_target": link_target })),
                );
                Ok(link_target)
            }
            Err(err) => {
                self.log_request_error(
                    request_id,
                    "resolve_link_target",
                    started,
                    Some(target_path),
                    &err,
                    None,
                );
                Err(err)
            }
        }
    }

    /// Resolves the result's link target (materializing an anchor if needed)
    /// and composes the caller-facing link path in one step.
    pub fn resolve_link_path(&self, result: &mut SearchResult) -> Result<String> {
        let link_target = self.resolve_link_target(result)?;
        Ok(link::build_link_path(&result.document.path, &link_target))
    }

    /// Link path for an already-known target; no document access.
    #[must_use]
    pub fn build_link_path(&self, document: &DocumentRecord, link_target: &str) -> String {
        link::build_link_path(&document.path, link_target)
    }

    fn anchor_lock(&self, path: &str) -> Result<Arc<Mutex<()>>> {
        let mut locks = self
            .anchor_locks
            .lock()
            .map_err(|_| LinkError::lock_poisoned("anchor lock map"))?;
        Ok(locks
            .entry(path.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }
}

/// Short random block id, re-drawn until it is unused within the document.
fn generate_block_id(existing_ids: &BTreeMap<String, usize>) -> String {
    loop {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(BLOCK_ID_LEN);
        if !existing_ids.contains_key(&id) {
            return id;
        }
    }
}
