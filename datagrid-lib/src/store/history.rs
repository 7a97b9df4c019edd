//! Bounded undo/redo history
//!
//! A linear stack of pre-image snapshots with a cursor. `commit` records
//! the state as it was *before* a mutation; `undo`/`redo` exchange the
//! adjacent snapshot with the current live state and move the cursor, so
//! the stack never grows during traversal and `undo` immediately after an
//! operation always restores the exact pre-image.

use crate::model::TableSnapshot;

/// Maximum number of retained snapshots. Older entries are dropped.
pub const HISTORY_CAP: usize = 50;

#[derive(Debug, Default)]
pub(crate) struct History {
    snapshots: Vec<TableSnapshot>,
    /// Number of past snapshots; entries at `cursor..` are the redo branch.
    cursor: usize,
}

impl History {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records the pre-image of a history-worthy mutation, truncating any
    /// redo branch and enforcing the retention cap.
    pub(crate) fn commit(&mut self, pre_image: TableSnapshot) {
        self.snapshots.truncate(self.cursor);
        self.snapshots.push(pre_image);
        if self.snapshots.len() > HISTORY_CAP {
            let excess = self.snapshots.len() - HISTORY_CAP;
            self.snapshots.drain(..excess);
        }
        self.cursor = self.snapshots.len();
    }

    /// Steps back one snapshot. The caller passes the current live state,
    /// which takes the restored snapshot's slot so `redo` can return to it.
    pub(crate) fn undo(&mut self, current: TableSnapshot) -> Option<TableSnapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(std::mem::replace(&mut self.snapshots[self.cursor], current))
    }

    /// Steps forward one snapshot, the inverse of [`undo`](Self::undo).
    pub(crate) fn redo(&mut self, current: TableSnapshot) -> Option<TableSnapshot> {
        if self.cursor >= self.snapshots.len() {
            return None;
        }
        let restored = std::mem::replace(&mut self.snapshots[self.cursor], current);
        self.cursor += 1;
        Some(restored)
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub(crate) fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub(crate) fn can_redo(&self) -> bool {
        self.cursor < self.snapshots.len()
    }
}
