use crate::models::SearchHistoryEntry;
use crate::storage::{load_json, save_json, KeyValueStore};
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

pub const HISTORY_KEY: &str = "nomad-korea-search-history";
pub const MAX_HISTORY: usize = 10;

/// Most-recent-first list of past queries.
///
/// Storage failures never reach the caller: reads degrade to an empty
/// history and failed writes are logged and dropped.
pub struct SearchHistory<S> {
    store: S,
}

impl<S: KeyValueStore> SearchHistory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn entries(&self) -> Vec<SearchHistoryEntry> {
        let mut entries: Vec<SearchHistoryEntry> = match load_json(&self.store, HISTORY_KEY) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Failed to load search history");
                return Vec::new();
            }
        };
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    /// Remember `query`, moving an identical earlier query to the front.
    /// Blank queries are ignored.
    pub fn add(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        let entry = SearchHistoryEntry {
            id: Uuid::now_v7().to_string(),
            query: query.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        };

        let updated: Vec<SearchHistoryEntry> = std::iter::once(entry)
            .chain(self.entries().into_iter().filter(|h| h.query != query))
            .take(MAX_HISTORY)
            .collect();

        self.save(&updated);
    }

    pub fn delete(&self, id: &str) {
        let updated: Vec<SearchHistoryEntry> = self
            .entries()
            .into_iter()
            .filter(|h| h.id != id)
            .collect();
        self.save(&updated);
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.delete(HISTORY_KEY) {
            warn!(error = %e, "Failed to clear search history");
        }
    }

    fn save(&self, entries: &[SearchHistoryEntry]) {
        if let Err(e) = save_json(&self.store, HISTORY_KEY, entries) {
            warn!(error = %e, "Failed to save search history");
        }
    }
}
