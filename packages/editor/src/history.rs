//! # Undo/Redo History
//!
//! Snapshot-based linear history over the element collection.
//!
//! ## Design
//!
//! - After every mutation the whole collection is offered to [`History::record`]
//! - A snapshot equal to the one under the cursor is ignored
//! - Recording after an undo discards everything beyond the cursor
//! - Undo/redo move the cursor and hand back the snapshot to restore
//!
//! Collections are small (tens of elements), so a deep copy per step is
//! cheaper to reason about than per-variant inverse operations.

use artboard_model::DesignElement;

pub type Snapshot = Vec<DesignElement>;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Snapshot>,
    cursor: usize,
    /// Maximum number of entries kept (0 = unlimited)
    limit: usize,
}

impl History {
    /// Start a history whose first entry is `initial`
    pub fn new(initial: Snapshot) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(initial: Snapshot, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            limit,
        }
    }

    /// Record the collection if it differs from the current entry.
    /// Returns whether a new entry was pushed.
    pub fn record(&mut self, elements: &[DesignElement]) -> bool {
        if self.current() == elements {
            return false;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(elements.to_vec());
        self.cursor = self.entries.len() - 1;

        if self.limit > 0 && self.entries.len() > self.limit {
            let overflow = self.entries.len() - self.limit;
            self.entries.drain(..overflow);
            self.cursor -= overflow;
        }

        true
    }

    /// Step back; returns the snapshot to restore
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward; returns the snapshot to restore
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> &[DesignElement] {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all history and start over from `initial`
    pub fn reset(&mut self, initial: Snapshot) {
        self.entries = vec![initial];
        self.cursor = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
