use crate::error::Result;
use crate::models::{DocumentMetadata, DocumentRecord};

/// The document store the engine searches over.
///
/// The engine never parses or persists documents itself; it consumes this
/// capability interface for enumeration, fresh content reads, structural
/// metadata, and the single line-append write the anchor resolver needs.
pub trait Vault: Send + Sync {
    /// Every document in corpus scope, in source order. The record's etag is
    /// the content hash at enumeration time.
    fn list_documents(&self) -> Result<Vec<DocumentRecord>>;

    /// Current content of one document, read fresh.
    fn read(&self, path: &str) -> Result<String>;

    /// Structural metadata for one document, or `None` when the document has
    /// not been indexed yet (the document is then skipped, not failed).
    fn metadata(&self, path: &str) -> Result<Option<DocumentMetadata>>;

    /// Appends `text` to the end of line `line` and persists the document.
    /// Fails with `Conflict` when the current content hash no longer matches
    /// `expected_etag`. Returns the etag of the persisted content.
    fn append_to_line(
        &self,
        path: &str,
        line: usize,
        text: &str,
        expected_etag: &str,
    ) -> Result<String>;
}

/// Content hash used as the document etag.
#[must_use]
pub fn content_etag(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}
