//! # History
//!
//! Linear undo/redo over whole-canvas snapshots. Every committing edit stores a complete copy of
//! the committed strokes; undo and redo just move a cursor over those copies. Memory is bounded
//! by keeping only the most recent [`HistoryManager::DEFAULT_CAPACITY`] snapshots.
//!
//! Writing after an undo discards everything that could have been redone - there is no tree.

use std::collections::VecDeque;

use crate::stroke::Stroke;

/// An independent copy of the committed strokes at one point in time.
pub type HistorySnapshot = Box<[Stroke]>;

#[derive(Clone, Debug)]
pub struct HistoryManager {
    snapshots: VecDeque<HistorySnapshot>,
    /// Invariant: `cursor < snapshots.len()` when non-empty, zero otherwise.
    cursor: usize,
    capacity: usize,
}
impl Default for HistoryManager {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}
impl HistoryManager {
    pub const DEFAULT_CAPACITY: usize = 7;
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Keep at most `capacity` snapshots. At least one is always kept.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity + 1),
            cursor: 0,
            capacity,
        }
    }
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
    /// No edit has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    /// The snapshot the cursor points at, if any.
    #[must_use]
    pub fn present(&self) -> Option<&[Stroke]> {
        self.snapshots.get(self.cursor).map(AsRef::as_ref)
    }
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor > 0
    }
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor < self.snapshots.len() - 1
    }
    /// Seed with the empty canvas, if nothing has been recorded yet.
    ///
    /// Called before the first snapshot, so that the first edit can itself be undone.
    pub fn seed_empty(&mut self) {
        if self.snapshots.is_empty() {
            self.snapshots.push_back(HistorySnapshot::default());
            self.cursor = 0;
        }
    }
    /// Forget everything, leaving `strokes` as the one and only snapshot.
    pub fn reset_to(&mut self, strokes: &[Stroke]) {
        self.snapshots.clear();
        self.snapshots.push_back(strokes.into());
        self.cursor = 0;
    }
    /// Record a copy of `strokes` as the newest state.
    ///
    /// Anything past the cursor is dropped first. When over capacity, the oldest snapshot is
    /// evicted and the cursor stays put, which leaves it on the new snapshot anyway.
    pub fn snapshot(&mut self, strokes: &[Stroke]) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.cursor + 1);
        }
        self.snapshots.push_back(strokes.into());

        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        } else if self.snapshots.len() > 1 {
            self.cursor += 1;
        }
        self.cursor = self.cursor.min(self.snapshots.len() - 1);

        log::trace!(
            "Saved snapshot of {} strokes, cursor {} of {}",
            strokes.len(),
            self.cursor,
            self.snapshots.len()
        );
    }
    /// Step back one snapshot. `None` at the start of history.
    ///
    /// The returned strokes belong to the history - callers adopting them must clone.
    pub fn undo(&mut self) -> Option<&[Stroke]> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!("Undo to {} of {}", self.cursor, self.snapshots.len());
        self.present()
    }
    /// Step forward one snapshot. `None` at the end of history.
    ///
    /// The returned strokes belong to the history - callers adopting them must clone.
    pub fn redo(&mut self) -> Option<&[Stroke]> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("Redo to {} of {}", self.cursor, self.snapshots.len());
        self.present()
    }
}
