//! Undo/redo functionality
//!
//! Entries are pre-mutation snapshots. `cursor` is the index of the entry
//! matching the live scene; `cursor == entries.len()` means the live scene is
//! newer than every entry and has not been snapshotted yet.

use shared::SceneSnapshot;
use tracing::{info, warn};

use super::SceneState;
use crate::error::{EditorError, Result};

pub const DEFAULT_CAPACITY: usize = 50;

/// Bounded list of scene snapshots with a navigation cursor
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<SceneSnapshot>,
    cursor: usize,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            capacity: capacity.max(2),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Push a pre-mutation snapshot, discarding any redo future.
    pub fn record(&mut self, snapshot: SceneSnapshot) {
        self.entries.truncate(self.cursor);
        self.entries.push(snapshot);
        self.cursor = self.entries.len();
        self.evict();
    }

    /// Move back one entry. `live` is captured first when the live scene
    /// has no entry of its own, so that redo can return to it.
    pub fn step_back(&mut self, live: impl FnOnce() -> SceneSnapshot) -> Option<&SceneSnapshot> {
        if !self.can_undo() {
            return None;
        }
        if self.cursor == self.entries.len() {
            self.entries.push(live());
            self.cursor = self.entries.len() - 1;
            self.evict();
        }
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Move forward one entry.
    pub fn step_forward(&mut self) -> Option<&SceneSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(2);
        self.evict();
    }

    fn evict(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.remove(0);
            self.cursor = self.cursor.saturating_sub(1);
        }
    }
}

impl SceneState {
    /// Snapshot the current scene before a mutation
    pub fn record_history(&mut self) {
        let snapshot = self.snapshot();
        self.history.record(snapshot);
    }

    /// Revert the last recorded mutation
    pub fn undo(&mut self) -> Result<()> {
        if !self.history.can_undo() {
            warn!("Undo stack is empty.");
            return Err(EditorError::State("Nothing to undo.".into()));
        }
        let live = self.snapshot();
        let target = self.history.step_back(|| live).cloned();
        if let Some(snapshot) = target {
            self.restore(snapshot);
            info!(cursor = self.history.cursor(), "undo");
        }
        Ok(())
    }

    /// Re-apply the last undone mutation
    pub fn redo(&mut self) -> Result<()> {
        let target = self.history.step_forward().cloned();
        match target {
            Some(snapshot) => {
                self.restore(snapshot);
                info!(cursor = self.history.cursor(), "redo");
                Ok(())
            }
            None => {
                warn!("Redo stack is empty.");
                Err(EditorError::State("Nothing to redo.".into()))
            }
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn set_history_capacity(&mut self, capacity: usize) {
        self.history.set_capacity(capacity);
    }
}
