use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, RwLock};

use crate::config::SearchSettings;
use crate::error::{LinkError, Result};
use crate::stopwords::StopwordSet;
use crate::vault::Vault;

mod anchor_service;
mod request_log_service;
mod search_service;

/// The similarity search engine.
///
/// Owns the effective stopword set (recomputed whenever settings change),
/// the single-slot search gate, and the per-document anchor write locks.
/// Cloning shares all of that state, so one engine instance per vault is
/// the intended shape.
#[derive(Clone)]
pub struct AnchorLink {
    vault: Arc<dyn Vault>,
    settings: Arc<RwLock<SearchSettings>>,
    stopwords: Arc<RwLock<StopwordSet>>,
    search_gate: Arc<AtomicBool>,
    anchor_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
    request_log: Option<PathBuf>,
}

impl std::fmt::Debug for AnchorLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnchorLink").finish_non_exhaustive()
    }
}

impl AnchorLink {
    pub fn new(vault: Arc<dyn Vault>, settings: SearchSettings) -> Result<Self> {
        settings.validate()?;
        let stopwords = StopwordSet::from_settings(&settings);
        Ok(Self {
            vault,
            settings: Arc::new(RwLock::new(settings)),
            stopwords: Arc::new(RwLock::new(stopwords)),
            search_gate: Arc::new(AtomicBool::new(false)),
            anchor_locks: Arc::new(Mutex::new(HashMap::new())),
            request_log: None,
        })
    }

    /// Enables jsonl request logging to `path`. Logging failures are
    /// swallowed; they never fail an operation.
    #[must_use]
    pub fn with_request_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.request_log = Some(path.into());
        self
    }

    /// Swaps in new settings and recomputes the effective stopword set.
    /// Settings stay immutable for the duration of any single search.
    pub fn update_settings(&self, settings: SearchSettings) -> Result<()> {
        settings.validate()?;
        let rebuilt = StopwordSet::from_settings(&settings);
        *self
            .settings
            .write()
            .map_err(|_| LinkError::lock_poisoned("settings"))? = settings;
        *self
            .stopwords
            .write()
            .map_err(|_| LinkError::lock_poisoned("stopwords"))? = rebuilt;
        Ok(())
    }

    pub fn settings(&self) -> Result<SearchSettings> {
        Ok(self
            .settings
            .read()
            .map_err(|_| LinkError::lock_poisoned("settings"))?
            .clone())
    }

    /// Snapshot of the settings and stopword set one search runs against.
    pub(crate) fn search_profile(&self) -> Result<(SearchSettings, StopwordSet)> {
        let settings = self.settings()?;
        let stopwords = self
            .stopwords
            .read()
            .map_err(|_| LinkError::lock_poisoned("stopwords"))?
            .clone();
        Ok((settings, stopwords))
    }
}
