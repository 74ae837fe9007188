use serde::{Deserialize, Serialize};

use crate::error::{LinkError, Result};

const ENV_MAX_RESULTS: &str = "ANCHORLINK_MAX_RESULTS";
const ENV_MIN_SCORE: &str = "ANCHORLINK_MIN_SCORE";

const DEFAULT_MAX_RESULTS: usize = 25;
const DEFAULT_MIN_SCORE: f32 = 0.1;

/// Caller-supplied search configuration.
///
/// Unknown fields in persisted JSON are ignored and missing fields fall back
/// to defaults, so older settings payloads keep loading after upgrades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub folders_to_ignore: Vec<String>,
    pub max_results: usize,
    pub min_score: f32,
    pub use_default_stopwords: bool,
    pub custom_stopwords: Vec<String>,
    pub search_current_file: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            folders_to_ignore: Vec::new(),
            max_results: DEFAULT_MAX_RESULTS,
            min_score: DEFAULT_MIN_SCORE,
            use_default_stopwords: true,
            custom_stopwords: Vec::new(),
            search_current_file: false,
        }
    }
}

impl SearchSettings {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_results < 1 {
            return Err(LinkError::Validation(
                "max_results must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_score) || !self.min_score.is_finite() {
            return Err(LinkError::Validation(format!(
                "min_score must be within [0, 1]: {}",
                self.min_score
            )));
        }
        Ok(())
    }

    /// Applies environment overrides; invalid or out-of-range values keep the
    /// configured setting.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        self.max_results = read_env_usize(ENV_MAX_RESULTS, self.max_results, 1);
        if let Some(min_score) = read_env_f32(ENV_MIN_SCORE)
            && (0.0..=1.0).contains(&min_score)
        {
            self.min_score = min_score;
        }
        self
    }

    /// Ignored-folder prefixes, trimmed of surrounding whitespace and any
    /// trailing slash, with empty entries dropped.
    #[must_use]
    pub(crate) fn normalized_ignore_prefixes(&self) -> Vec<String> {
        self.folders_to_ignore
            .iter()
            .map(|folder| folder.trim().trim_end_matches('/').to_string())
            .filter(|folder| !folder.is_empty())
            .collect()
    }
}

#[must_use]
fn read_env_usize(name: &str, default_value: usize, min_value: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|value| *value >= min_value)
        .unwrap_or(default_value)
}

#[must_use]
fn read_env_f32(name: &str) -> Option<f32> {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<f32>().ok())
}
