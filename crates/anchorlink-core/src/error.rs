use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinkError>;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("query is empty after trimming; select more text")]
    EmptyQuery,

    #[error("query contains only stopwords; try a more specific query")]
    QueryAllStopwords,

    #[error("a search is already in progress")]
    SearchBusy,

    #[error("no similar content found")]
    NoMatches,

    #[error("matches were found, but all scored below the minimum score threshold")]
    BelowThreshold,

    #[error("anchor write failed: {0}")]
    AnchorWriteFailed(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl LinkError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "EMPTY_QUERY",
            Self::QueryAllStopwords => "QUERY_ALL_STOPWORDS",
            Self::SearchBusy => "SEARCH_BUSY",
            Self::NoMatches => "NO_MATCHES",
            Self::BelowThreshold => "BELOW_THRESHOLD",
            Self::AnchorWriteFailed(_) => "ANCHOR_WRITE_FAILED",
            Self::Conflict(_) => "CONFLICT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub(crate) fn lock_poisoned(label: &str) -> Self {
        Self::Internal(format!("poisoned lock: {label}"))
    }
}

#[cfg(test)]
mod tests {
    use super::LinkError;

    #[test]
    fn error_codes_are_stable_per_variant() {
        assert_eq!(LinkError::EmptyQuery.code(), "EMPTY_QUERY");
        assert_eq!(LinkError::QueryAllStopwords.code(), "QUERY_ALL_STOPWORDS");
        assert_eq!(LinkError::SearchBusy.code(), "SEARCH_BUSY");
        assert_eq!(LinkError::NoMatches.code(), "NO_MATCHES");
        assert_eq!(LinkError::BelowThreshold.code(), "BELOW_THRESHOLD");
        assert_eq!(
            LinkError::AnchorWriteFailed("x".to_string()).code(),
            "ANCHOR_WRITE_FAILED"
        );
    }

    #[test]
    fn outcome_variants_render_caller_facing_messages() {
        assert_eq!(LinkError::NoMatches.to_string(), "no similar content found");
        assert!(LinkError::BelowThreshold.to_string().contains("minimum score"));
    }
}
