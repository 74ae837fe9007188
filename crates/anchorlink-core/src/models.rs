use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One document in corpus scope, as enumerated by the vault.
///
/// `etag` is the blake3 hex digest of the content at enumeration time; the
/// anchor resolver uses it to refuse a write against a document that changed
/// after the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub path: String,
    pub etag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub text: String,
    pub level: u8,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Heading,
    Content,
}

/// A structural span of a document. Lines and byte offsets both refer to the
/// raw content the metadata was computed from; `end_offset` is exclusive and
/// does not include the trailing newline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub start_line: usize,
    pub end_line: usize,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Externally computed structure of one document: ordered headings, ordered
/// sections, and a mapping from block-anchor id to the line the anchored
/// block ends on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub headings: Vec<Heading>,
    pub sections: Vec<Section>,
    pub blocks: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Heading,
    Block,
}

/// Where a not-yet-anchored block ends; the anchor is appended to this line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPosition {
    pub end_line: usize,
}

/// The atomic scorable item: a heading or a content block.
///
/// Exactly one of `link_target` / `position` is populated for block units;
/// heading units always carry their heading text as the link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentUnit {
    pub kind: UnitKind,
    pub text: String,
    pub link_target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<BlockPosition>,
}

impl ContentUnit {
    #[must_use]
    pub fn has_link_target(&self) -> bool {
        !self.link_target.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub document: DocumentRecord,
    pub unit: ContentUnit,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLogEntry {
    pub request_id: String,
    pub operation: String,
    pub status: String,
    pub latency_ms: u128,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
