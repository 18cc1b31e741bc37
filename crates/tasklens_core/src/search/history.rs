//! Bounded recent-search history.
//!
//! # Responsibility
//! - Record normalized queries most-recent-first.
//! - Persist the list through a [`KeyValueRepository`].
//!
//! # Invariants
//! - At most `max_items` entries; no two share a `query`.
//! - Storage failures and corrupt blobs degrade to empty history; they are
//!   logged and never returned to callers.
//! - Each mutating call is one read-modify-write cycle; callers serialize
//!   access (wrap in a `Mutex` when shared across threads).

use crate::config::HistoryConfig;
use crate::repo::kv_repo::KeyValueRepository;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

const MIN_QUERY_CHARS: usize = 2;

/// One remembered query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Trimmed, lowercased query text.
    pub query: String,
    /// Epoch milliseconds of the last time this query was recorded.
    pub timestamp: i64,
}

/// Search history service over a key/value store.
pub struct SearchHistory<S: KeyValueRepository> {
    store: S,
    config: HistoryConfig,
}

impl<S: KeyValueRepository> SearchHistory<S> {
    /// Creates a history with default key and capacity.
    pub fn new(store: S) -> Self {
        Self::with_config(store, HistoryConfig::default())
    }

    pub fn with_config(store: S, config: HistoryConfig) -> Self {
        Self { store, config }
    }

    /// Returns stored entries, most recent first.
    ///
    /// Missing, unreadable or corrupt data yields an empty list.
    pub fn get_history(&self) -> Vec<HistoryEntry> {
        let raw = match self.store.get(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("event=history_read module=search status=error error={err}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(mut entries) => {
                entries.truncate(self.config.max_items);
                entries
            }
            Err(err) => {
                warn!("event=history_read module=search status=corrupt error={err}");
                Vec::new()
            }
        }
    }

    /// Records `query` now. See [`Self::add_search_at`].
    pub fn add_search(&self, query: &str) {
        self.add_search_at(query, Utc::now());
    }

    /// Records `query` with an explicit timestamp.
    ///
    /// Queries shorter than 2 chars after trimming are ignored. An existing
    /// entry with the same normalized text is moved to the front.
    pub fn add_search_at(&self, query: &str, now: DateTime<Utc>) {
        let normalized = query.trim().to_lowercase();
        if normalized.chars().count() < MIN_QUERY_CHARS {
            return;
        }

        let mut entries = self.get_history();
        entries.retain(|entry| entry.query != normalized);
        entries.insert(
            0,
            HistoryEntry {
                query: normalized,
                timestamp: now.timestamp_millis(),
            },
        );
        entries.truncate(self.config.max_items);

        let encoded = match serde_json::to_string(&entries) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!("event=history_write module=search status=error error={err}");
                return;
            }
        };
        match self.store.set(&self.config.storage_key, &encoded) {
            Ok(()) => debug!(
                "event=history_write module=search status=ok entries={}",
                entries.len()
            ),
            Err(err) => warn!("event=history_write module=search status=error error={err}"),
        }
    }

    /// Drops all stored entries.
    pub fn clear_history(&self) {
        if let Err(err) = self.store.remove(&self.config.storage_key) {
            warn!("event=history_clear module=search status=error error={err}");
        }
    }
}
