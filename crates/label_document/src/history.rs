//! Linear undo/redo over whole-collection snapshots.
//!
//! The log always holds at least one snapshot (the empty collection at session
//! start) and a cursor pointing at the snapshot that matches the live
//! collection. Committing truncates everything after the cursor before pushing,
//! so a new edit after an undo discards the redo tail for good.

use tracing::debug;

use crate::collection::BoxCollection;

/// Configuration for the snapshot log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of snapshots retained, including the current one.
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 100 }
    }
}

#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<BoxCollection>,
    cursor: usize,
    config: HistoryConfig,
}

impl Default for History {
    fn default() -> Self {
        Self::with_config(HistoryConfig::default())
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            snapshots: vec![BoxCollection::new()],
            cursor: 0,
            config: HistoryConfig {
                max_entries: config.max_entries.max(1),
            },
        }
    }

    /// Record `collection` as the newest snapshot.
    pub fn commit(&mut self, collection: &BoxCollection) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(collection.clone());
        self.cursor = self.snapshots.len() - 1;

        let overflow = self.snapshots.len().saturating_sub(self.config.max_entries);
        if overflow > 0 {
            self.snapshots.drain(0..overflow);
            self.cursor -= overflow;
        }

        debug!(
            cursor = self.cursor,
            boxes = collection.len(),
            "history: committed snapshot"
        );
    }

    /// Step back one snapshot. Returns the snapshot to restore, or `None` at the start.
    pub fn undo(&mut self) -> Option<&BoxCollection> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, "history: undo");
        self.snapshots.get(self.cursor)
    }

    /// Step forward one snapshot. Returns the snapshot to restore, or `None` at the end.
    pub fn redo(&mut self) -> Option<&BoxCollection> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        debug!(cursor = self.cursor, "history: redo");
        self.snapshots.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn current(&self) -> &BoxCollection {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Whether the snapshot at the cursor equals `live`.
    pub fn is_synced_with(&self, live: &BoxCollection) -> bool {
        self.current() == live
    }

    pub fn config(&self) -> HistoryConfig {
        self.config
    }
}
