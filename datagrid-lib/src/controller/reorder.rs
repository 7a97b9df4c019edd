//! Drag reorder and resize coordination
//!
//! Small state machines tracking one drag interaction each. The host
//! feeds pointer events in; the coordinators translate them into store
//! operations. Reorders splice live so the drop target is always
//! visible; resizes stay continuous (non-history) until the pointer is
//! released.

use log::debug;

use crate::model::ColumnPatch;
use crate::store::TableStore;

/// What a reorder drag is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderTarget {
    /// Reordering the column display order.
    Column,
    /// Reordering rows.
    Row,
}

/// Tracks one drag-to-reorder interaction.
///
/// `drag_over` moves the dragged item to the hovered index immediately,
/// so the grid shows the pending order while the drag is still in
/// flight. Indices are re-tracked after every move; a drop on the
/// starting index is a no-op.
#[derive(Debug, Default)]
pub struct ReorderCoordinator {
    active: Option<(ReorderTarget, usize)>,
}

impl ReorderCoordinator {
    /// Creates an idle coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a drag is in flight.
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Begins a drag from the given index. A drag already in flight is
    /// abandoned.
    pub fn drag_start(&mut self, target: ReorderTarget, index: usize) {
        if self.active.is_some() {
            debug!("abandoning unfinished drag");
        }
        self.active = Some((target, index));
    }

    /// Reports the index currently hovered. Moves the dragged item there
    /// and keeps tracking it under its new index.
    pub fn drag_over(&mut self, store: &mut TableStore, target: ReorderTarget, index: usize) {
        let Some((active_target, current)) = self.active else {
            return;
        };
        if active_target != target || current == index {
            return;
        }
        match target {
            ReorderTarget::Column => store.move_column(current, index),
            ReorderTarget::Row => store.move_row(current, index),
        }
        // Out-of-bounds hovers are rejected by the store; only track the
        // new index when the move actually happened.
        let len = match target {
            ReorderTarget::Column => store.state().column_order.len(),
            ReorderTarget::Row => store.state().rows.len(),
        };
        if index < len {
            self.active = Some((target, index));
        }
    }

    /// Ends the drag.
    pub fn drag_end(&mut self) {
        self.active = None;
    }
}

/// Tracks one column resize interaction.
///
/// Width updates during the drag go through the store's live width map
/// and are not history-worthy; releasing the pointer writes the final
/// width onto the column definition, which records a single undo entry.
#[derive(Debug, Default)]
pub struct ResizeCoordinator {
    active: Option<(String, u32)>,
}

impl ResizeCoordinator {
    /// Creates an idle coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a resize is in flight.
    pub fn is_resizing(&self) -> bool {
        self.active.is_some()
    }

    /// Begins resizing a column from its current effective width.
    pub fn resize_start(&mut self, store: &TableStore, column_id: &str) {
        let width = store.state().column_width(column_id);
        self.active = Some((column_id.to_string(), width));
    }

    /// Applies live drag feedback.
    pub fn resize_update(&mut self, store: &mut TableStore, width: u32) {
        let Some((column_id, _)) = &self.active else {
            return;
        };
        let column_id = column_id.clone();
        store.resize_column(&column_id, width);
    }

    /// Finalizes the interaction, committing the width when it changed.
    pub fn resize_end(&mut self, store: &mut TableStore) {
        let Some((column_id, start_width)) = self.active.take() else {
            return;
        };
        let final_width = store.state().column_width(&column_id);
        if final_width != start_width {
            store.edit_column(&column_id, ColumnPatch::new().width(final_width));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnDef;
    use crate::model::RowData;
    use crate::model::MIN_COLUMN_WIDTH;

    fn store() -> TableStore {
        let columns = vec![
            ColumnDef::new("c1", "A", "text"),
            ColumnDef::new("c2", "B", "text"),
            ColumnDef::new("c3", "C", "text"),
        ];
        let rows = vec![RowData::new("r1"), RowData::new("r2"), RowData::new("r3")];
        TableStore::new(columns, rows, None)
    }

    #[test]
    fn test_column_drag_splices_live() {
        let mut store = store();
        let mut drag = ReorderCoordinator::new();
        drag.drag_start(ReorderTarget::Column, 0);
        drag.drag_over(&mut store, ReorderTarget::Column, 2);
        assert_eq!(store.state().column_order, vec!["c2", "c3", "c1"]);
        drag.drag_over(&mut store, ReorderTarget::Column, 1);
        assert_eq!(store.state().column_order, vec!["c2", "c1", "c3"]);
        drag.drag_end();
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_row_drag_tracks_moved_index() {
        let mut store = store();
        let mut drag = ReorderCoordinator::new();
        drag.drag_start(ReorderTarget::Row, 2);
        drag.drag_over(&mut store, ReorderTarget::Row, 0);
        assert_eq!(store.state().rows[0].id, "r3");
        drag.drag_over(&mut store, ReorderTarget::Row, 0);
        assert_eq!(store.state().rows[0].id, "r3");
        drag.drag_end();
    }

    #[test]
    fn test_drop_on_start_index_is_a_no_op() {
        let mut store = store();
        let mut drag = ReorderCoordinator::new();
        drag.drag_start(ReorderTarget::Column, 1);
        drag.drag_over(&mut store, ReorderTarget::Column, 1);
        drag.drag_end();
        assert_eq!(store.state().column_order, vec!["c1", "c2", "c3"]);
        assert_eq!(store.history_len(), 0);
    }

    #[test]
    fn test_mismatched_target_is_ignored() {
        let mut store = store();
        let mut drag = ReorderCoordinator::new();
        drag.drag_start(ReorderTarget::Column, 0);
        drag.drag_over(&mut store, ReorderTarget::Row, 2);
        assert_eq!(store.state().rows[0].id, "r1");
        assert_eq!(store.state().column_order, vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn test_resize_commits_once_on_release() {
        let mut store = store();
        let mut resize = ResizeCoordinator::new();
        resize.resize_start(&store, "c1");
        resize.resize_update(&mut store, 240);
        resize.resize_update(&mut store, 260);
        resize.resize_update(&mut store, 10);
        assert_eq!(store.history_len(), 0);
        resize.resize_end(&mut store);
        assert_eq!(store.history_len(), 1);
        assert_eq!(store.state().column("c1").unwrap().width, Some(MIN_COLUMN_WIDTH));
    }

    #[test]
    fn test_unchanged_resize_records_no_history() {
        let mut store = store();
        let mut resize = ResizeCoordinator::new();
        resize.resize_start(&store, "c1");
        resize.resize_end(&mut store);
        assert_eq!(store.history_len(), 0);
    }
}
