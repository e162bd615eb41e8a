//! History Manager for Chromini.
//!
//! Implements `HistoryManagerTrait`: recording, listing and removing
//! recently visited pages. The list lives in the persisted config document
//! and every operation rewrites it as a whole.

use url::Url;

use crate::services::config_store::{ConfigStore, ConfigStoreTrait};
use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;

/// Maximum number of entries kept; the oldest are evicted first.
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Trait defining history management operations.
pub trait HistoryManagerTrait {
    fn record(&mut self, entry: HistoryEntry) -> Result<(), HistoryError>;
    fn list(&self) -> Vec<HistoryEntry>;
    fn remove(&mut self, url: &str) -> Result<(), HistoryError>;
    fn clear(&mut self) -> Result<(), HistoryError>;
}

/// Canonical form of a URL used for history equality.
///
/// Keeps scheme, host (with port), path and query. Drops the fragment and a
/// single trailing slash on non-root paths. Unparseable input is returned
/// unchanged.
pub fn normalize_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    parsed.set_fragment(None);

    let Some(host) = parsed.host_str() else {
        return parsed.to_string();
    };

    let mut path = parsed.path();
    if path.len() > 1 && path.ends_with('/') {
        path = &path[..path.len() - 1];
    }

    let port = parsed.port().map(|p| format!(":{}", p)).unwrap_or_default();
    let query = match parsed.query() {
        Some(q) if !q.is_empty() => format!("?{}", q),
        _ => String::new(),
    };

    format!("{}://{}{}{}{}", parsed.scheme(), host, port, path, query)
}

/// History manager backed by the config store.
pub struct HistoryManager {
    store: ConfigStore,
    max_entries: usize,
}

impl HistoryManager {
    /// Creates a new `HistoryManager` writing through `store`.
    pub fn new(store: ConfigStore) -> Self {
        Self::with_capacity(store, MAX_HISTORY_ENTRIES)
    }

    /// Creates a manager that keeps at most `max_entries` entries.
    pub fn with_capacity(store: ConfigStore, max_entries: usize) -> Self {
        Self { store, max_entries }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl HistoryManagerTrait for HistoryManager {
    /// Records a visit at the front of the list.
    ///
    /// An existing entry with the same normalized URL is dropped first, so a
    /// revisit moves the page to the top instead of duplicating it.
    fn record(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let key = normalize_url(&entry.url);
        let max_entries = self.max_entries;
        let mut entry = Some(entry);

        self.store.update(&mut |config| {
            config.history.retain(|h| normalize_url(&h.url) != key);
            if let Some(entry) = entry.take() {
                config.history.insert(0, entry);
            }
            config.history.truncate(max_entries);
        })?;

        log::debug!("Recorded history entry {}", key);
        Ok(())
    }

    /// Returns the history, most recent first.
    fn list(&self) -> Vec<HistoryEntry> {
        self.store.load_or_default().history
    }

    /// Removes the entry whose normalized URL matches `url`. Absent entries
    /// are not an error.
    fn remove(&mut self, url: &str) -> Result<(), HistoryError> {
        let key = normalize_url(url);
        self.store.update(&mut |config| {
            config.history.retain(|h| normalize_url(&h.url) != key);
        })?;
        Ok(())
    }

    /// Clears all history entries.
    fn clear(&mut self) -> Result<(), HistoryError> {
        self.store.update(&mut |config| config.history.clear())?;
        Ok(())
    }
}
