// Public fallible APIs in this crate share one concrete error contract (`LinkError`).
// Repeating per-function `# Errors` boilerplate obscures behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod fs;
pub mod link;
pub mod markdown;
pub mod models;
pub mod rank;
pub mod scoring;
pub mod stopwords;
pub mod text;
pub mod vault;

pub use client::AnchorLink;
pub use config::SearchSettings;
pub use error::{LinkError, Result};
pub use fs::LocalVault;
pub use models::{ContentUnit, DocumentMetadata, DocumentRecord, SearchResult, UnitKind};
pub use vault::Vault;
