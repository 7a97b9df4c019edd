//! Table store
//!
//! The authoritative state container for the grid: columns, rows, column
//! order and widths, the selection/editing cursor, and the undo/redo
//! history. Every public mutation is synchronous and atomic from the
//! caller's perspective; stale-identity calls are silent no-ops. The
//! store is a plain observable container: callers read via [`state`]
//! and watch via [`subscribe`].
//!
//! The store never consults the plugin registry, with one exception:
//! [`delete_column_with_cleanup`] awaits the registry's best-effort
//! resource release before the structural delete.
//!
//! [`state`]: TableStore::state
//! [`subscribe`]: TableStore::subscribe
//! [`delete_column_with_cleanup`]: TableStore::delete_column_with_cleanup

mod history;

pub use history::HISTORY_CAP;

use std::cmp::Ordering;
use std::collections::HashMap;

use log::debug;
use uuid::Uuid;

use crate::model::CellCoord;
use crate::model::CellValue;
use crate::model::ColumnDef;
use crate::model::ColumnPatch;
use crate::model::Direction;
use crate::model::RowData;
use crate::model::RowPatch;
use crate::model::SortDirection;
use crate::model::TableSnapshot;
use crate::model::DEFAULT_COLUMN_WIDTH;
use crate::model::MIN_COLUMN_WIDTH;
use crate::plugin::PluginRegistry;

use history::History;

/// The observable table state.
///
/// Owned exclusively by [`TableStore`]; callers mutate it only through
/// the store's operations.
#[derive(Debug, Clone, Default)]
pub struct TableState {
    /// Column definitions, in creation order.
    pub columns: Vec<ColumnDef>,
    /// Row data, in display order.
    pub rows: Vec<RowData>,
    /// Display order of column ids.
    pub column_order: Vec<String>,
    /// Live column widths, including uncommitted drag feedback.
    pub column_widths: HashMap<String, u32>,
    /// The selected cell, if any.
    pub selected_cell: Option<CellCoord>,
    /// The cell currently being edited, if any.
    pub editing_cell: Option<CellCoord>,
}

impl TableState {
    /// Looks up a row by id.
    pub fn row(&self, row_id: &str) -> Option<&RowData> {
        self.rows.iter().find(|r| r.id == row_id)
    }

    /// Looks up a column by id.
    pub fn column(&self, column_id: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Returns a row's positional index.
    pub fn row_index(&self, row_id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id == row_id)
    }

    /// Returns a column's positional index in the display order.
    pub fn column_position(&self, column_id: &str) -> Option<usize> {
        self.column_order.iter().position(|id| id == column_id)
    }

    /// Returns the effective width of a column.
    pub fn column_width(&self, column_id: &str) -> u32 {
        self.column_widths
            .get(column_id)
            .copied()
            .or_else(|| self.column(column_id).and_then(|c| c.width))
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            columns: self.columns.clone(),
            rows: self.rows.clone(),
            column_order: self.column_order.clone(),
        }
    }
}

/// Handle returned by [`TableStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn(&TableState) + Send>;

/// The authoritative state container for one grid.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{ColumnDef, RowData, CellValue};
/// use datagrid_lib::store::TableStore;
///
/// let columns = vec![
///     ColumnDef::new("c1", "Name", "text"),
///     ColumnDef::new("c2", "Count", "number"),
/// ];
/// let rows = vec![RowData::new("r1").set("c1", "hi").set("c2", 5.0)];
/// let mut store = TableStore::new(columns, rows, None);
///
/// store.update_cell_value("r1", "c2", CellValue::from(10.0));
/// assert_eq!(store.state().row("r1").unwrap().cell("c2"), &CellValue::from(10.0));
///
/// store.undo();
/// assert_eq!(store.state().row("r1").unwrap().cell("c2"), &CellValue::from(5.0));
/// ```
pub struct TableStore {
    state: TableState,
    history: History,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

impl TableStore {
    /// Creates a store from initial columns and rows.
    ///
    /// When `column_order` is `None`, the columns' own order is used.
    /// Widths are seeded from each column's preferred width, defaulting
    /// to [`DEFAULT_COLUMN_WIDTH`].
    pub fn new(
        columns: Vec<ColumnDef>,
        rows: Vec<RowData>,
        column_order: Option<Vec<String>>,
    ) -> Self {
        let column_order =
            column_order.unwrap_or_else(|| columns.iter().map(|c| c.id.clone()).collect());
        let column_widths = columns
            .iter()
            .map(|c| (c.id.clone(), c.width.unwrap_or(DEFAULT_COLUMN_WIDTH)))
            .collect();
        Self {
            state: TableState {
                columns,
                rows,
                column_order,
                column_widths,
                selected_cell: None,
                editing_cell: None,
            },
            history: History::new(),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Registers a listener invoked after every applied mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&TableState) + Send + 'static) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        ListenerId(id)
    }

    /// Removes a previously registered listener.
    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _)| *lid != id.0);
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }

    /// Applies a mutation to the state and notifies listeners once.
    fn mutate(&mut self, f: impl FnOnce(&mut TableState)) {
        f(&mut self.state);
        self.notify();
    }

    // =========================================================================
    // Cell values
    // =========================================================================

    /// Writes a cell value, recording the pre-image for undo.
    ///
    /// A stale `row_id` or `column_id` (deleted while an async producer
    /// was in flight) is silently dropped; no history entry is recorded.
    pub fn update_cell_value(&mut self, row_id: &str, column_id: &str, value: CellValue) {
        if self.state.row(row_id).is_none() {
            debug!("dropping cell write for missing row {row_id}");
            return;
        }
        if self.state.column(column_id).is_none() {
            debug!("dropping cell write for missing column {column_id}");
            return;
        }
        self.history.commit(self.state.snapshot());
        self.mutate(|state| {
            if let Some(row) = state.rows.iter_mut().find(|r| r.id == row_id) {
                row.set_cell(column_id, value);
            }
        });
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Sets a column's live width, clamped to [`MIN_COLUMN_WIDTH`].
    ///
    /// This is a continuous adjustment and is *not* history-worthy; the
    /// caller finalizes the interaction through [`edit_column`] (see the
    /// resize coordinator).
    ///
    /// [`edit_column`]: Self::edit_column
    pub fn resize_column(&mut self, column_id: &str, width: u32) {
        if self.state.column(column_id).is_none() {
            debug!("dropping resize for missing column {column_id}");
            return;
        }
        self.mutate(|state| {
            state
                .column_widths
                .insert(column_id.to_string(), width.max(MIN_COLUMN_WIDTH));
        });
    }

    /// Moves a column between positional indices in the display order.
    pub fn move_column(&mut self, from_index: usize, to_index: usize) {
        let len = self.state.column_order.len();
        if from_index >= len || to_index >= len || from_index == to_index {
            return;
        }
        self.history.commit(self.state.snapshot());
        self.mutate(|state| {
            let id = state.column_order.remove(from_index);
            state.column_order.insert(to_index, id);
        });
    }

    /// Appends a column, back-filling every existing row with null.
    ///
    /// Returns the new column's id.
    pub fn add_column(&mut self, patch: ColumnPatch) -> String {
        let id = patch
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        self.history.commit(self.state.snapshot());
        self.mutate(|state| {
            let mut column = ColumnDef::new(
                id.clone(),
                patch.title.unwrap_or_else(|| "New column".to_string()),
                patch.type_key.unwrap_or_else(|| "text".to_string()),
            );
            column.width = patch.width;
            column.config = patch.config;
            column.validation = patch.validation;
            column.hidden = patch.hidden.unwrap_or(false);

            let width = column
                .width
                .unwrap_or(DEFAULT_COLUMN_WIDTH)
                .max(MIN_COLUMN_WIDTH);
            state.column_widths.insert(id.clone(), width);
            state.column_order.push(id.clone());
            state.columns.push(column);
            for row in &mut state.rows {
                row.set_cell(id.clone(), CellValue::Null);
            }
        });
        id
    }

    /// Deletes a column from the definitions, the order, the width map,
    /// and every row.
    pub fn delete_column(&mut self, column_id: &str) {
        if self.state.column(column_id).is_none() {
            return;
        }
        self.history.commit(self.state.snapshot());
        self.mutate(|state| {
            state.columns.retain(|c| c.id != column_id);
            state.column_order.retain(|id| id != column_id);
            state.column_widths.remove(column_id);
            for row in &mut state.rows {
                row.remove_cell(column_id);
            }
            if state
                .selected_cell
                .as_ref()
                .is_some_and(|c| c.column_id == column_id)
            {
                state.selected_cell = None;
            }
            if state
                .editing_cell
                .as_ref()
                .is_some_and(|c| c.column_id == column_id)
            {
                state.editing_cell = None;
            }
        });
    }

    /// Deletes a column after releasing externally held resources.
    ///
    /// The column's non-null values are handed to its plugin's cleanup
    /// hook through the registry; releases run fan-out and are joined
    /// with all-settled semantics. Failures are logged and never block
    /// the structural delete (best-effort, not transactional).
    pub async fn delete_column_with_cleanup(
        &mut self,
        column_id: &str,
        registry: &PluginRegistry,
    ) {
        let Some(column) = self.state.column(column_id) else {
            return;
        };
        let type_key = column.type_key.clone();
        let values: Vec<CellValue> = self
            .state
            .rows
            .iter()
            .map(|row| row.cell(column_id))
            .filter(|v| !v.is_null())
            .cloned()
            .collect();

        registry.cleanup_column(&type_key, &values).await;
        self.delete_column(column_id);
    }

    /// Merges a patch into a column, recording the pre-image for undo.
    ///
    /// A new width is clamped and mirrored into the live width map.
    pub fn edit_column(&mut self, column_id: &str, patch: ColumnPatch) {
        if self.state.column(column_id).is_none() {
            return;
        }
        self.history.commit(self.state.snapshot());
        self.mutate(|state| {
            let Some(column) = state.columns.iter_mut().find(|c| c.id == column_id) else {
                return;
            };
            if let Some(title) = patch.title {
                column.title = title;
            }
            if let Some(type_key) = patch.type_key {
                column.type_key = type_key;
            }
            if let Some(config) = patch.config {
                column.config = Some(config);
            }
            if let Some(validation) = patch.validation {
                column.validation = Some(validation);
            }
            if let Some(hidden) = patch.hidden {
                column.hidden = hidden;
            }
            if let Some(width) = patch.width {
                let width = width.max(MIN_COLUMN_WIDTH);
                column.width = Some(width);
                state.column_widths.insert(column_id.to_string(), width);
            }
        });
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Moves a row between positional indices.
    pub fn move_row(&mut self, from_index: usize, to_index: usize) {
        let len = self.state.rows.len();
        if from_index >= len || to_index >= len || from_index == to_index {
            return;
        }
        self.history.commit(self.state.snapshot());
        self.mutate(|state| {
            let row = state.rows.remove(from_index);
            state.rows.insert(to_index, row);
        });
    }

    /// Appends a row, back-filling every known column with null.
    ///
    /// Returns the new row's id.
    pub fn add_row(&mut self, patch: RowPatch) -> String {
        let id = patch
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        self.history.commit(self.state.snapshot());
        self.mutate(|state| {
            let mut row = RowData::new(id.clone());
            row.cells = patch.cells;
            for column in &state.columns {
                if !row.cells.contains_key(&column.id) {
                    row.set_cell(column.id.clone(), CellValue::Null);
                }
            }
            state.rows.push(row);
        });
        id
    }

    /// Deletes a row by id.
    pub fn delete_row(&mut self, row_id: &str) {
        if self.state.row(row_id).is_none() {
            return;
        }
        self.history.commit(self.state.snapshot());
        self.mutate(|state| {
            state.rows.retain(|r| r.id != row_id);
            if state.selected_cell.as_ref().is_some_and(|c| c.row_id == row_id) {
                state.selected_cell = None;
            }
            if state.editing_cell.as_ref().is_some_and(|c| c.row_id == row_id) {
                state.editing_cell = None;
            }
        });
    }

    // =========================================================================
    // Selection and editing cursor
    // =========================================================================

    /// Selects a cell, clearing any editing state.
    pub fn select_cell(&mut self, row_id: &str, column_id: &str) {
        let coord = CellCoord::new(row_id, column_id);
        self.mutate(|state| {
            state.selected_cell = Some(coord);
            state.editing_cell = None;
        });
    }

    /// Marks a cell as being edited. Starting an edit always also selects.
    pub fn start_editing(&mut self, row_id: &str, column_id: &str) {
        let coord = CellCoord::new(row_id, column_id);
        self.mutate(|state| {
            state.selected_cell = Some(coord.clone());
            state.editing_cell = Some(coord);
        });
    }

    /// Clears the editing cursor, keeping the selection.
    pub fn stop_editing(&mut self) {
        self.mutate(|state| {
            state.editing_cell = None;
        });
    }

    /// Clears both the selection and the editing cursor.
    pub fn clear_cell_selection(&mut self) {
        self.mutate(|state| {
            state.selected_cell = None;
            state.editing_cell = None;
        });
    }

    /// Moves the selection one cell in the given direction.
    ///
    /// No-op when nothing is selected, while a cell is being edited, or
    /// at the grid boundary (no wraparound). The new selection is
    /// resolved back to identities, so a reorder applied before the next
    /// move never desyncs the selection from its visible position.
    pub fn move_cell_selection(&mut self, direction: Direction) {
        if self.state.editing_cell.is_some() {
            return;
        }
        let Some(selected) = self.state.selected_cell.clone() else {
            return;
        };
        let Some(row_index) = self.state.row_index(&selected.row_id) else {
            return;
        };
        let Some(col_index) = self.state.column_position(&selected.column_id) else {
            return;
        };

        let (mut new_row, mut new_col) = (row_index, col_index);
        match direction {
            Direction::Up => new_row = row_index.saturating_sub(1),
            Direction::Down => new_row = (row_index + 1).min(self.state.rows.len() - 1),
            Direction::Left => new_col = col_index.saturating_sub(1),
            Direction::Right => new_col = (col_index + 1).min(self.state.column_order.len() - 1),
        }
        if new_row == row_index && new_col == col_index {
            return;
        }

        let coord = CellCoord::new(
            self.state.rows[new_row].id.clone(),
            self.state.column_order[new_col].clone(),
        );
        self.mutate(|state| {
            state.selected_cell = Some(coord);
        });
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Pushes a snapshot of the current state onto the history stack.
    ///
    /// Mutating operations call this internally with their pre-image;
    /// hosts call it to finalize continuous interactions they drove
    /// through non-history operations.
    pub fn commit_history(&mut self) {
        self.history.commit(self.state.snapshot());
    }

    /// Steps back one snapshot. Returns `false` at the oldest entry.
    ///
    /// Restores columns, rows and column order wholesale; widths and the
    /// selection are transient and left untouched.
    pub fn undo(&mut self) -> bool {
        let current = self.state.snapshot();
        match self.history.undo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Steps forward one snapshot. Returns `false` at the newest entry.
    pub fn redo(&mut self) -> bool {
        let current = self.state.snapshot();
        match self.history.redo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, snapshot: TableSnapshot) {
        self.mutate(|state| {
            state.columns = snapshot.columns;
            state.rows = snapshot.rows;
            state.column_order = snapshot.column_order;
        });
    }

    /// Returns `true` if an undo step is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns `true` if a redo step is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of retained history snapshots (at most [`HISTORY_CAP`]).
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Cycles a column's sort direction (none → asc → desc → none) and
    /// reorders rows with the default value ordering. Not history-worthy.
    pub fn sort_rows(&mut self, column_id: &str) {
        self.sort_rows_with(column_id, default_value_compare);
    }

    /// Like [`sort_rows`](Self::sort_rows) with a caller-supplied
    /// comparator, used by the facade to route plugin comparators in.
    /// Null values sort last regardless of direction.
    pub fn sort_rows_with(
        &mut self,
        column_id: &str,
        compare: impl Fn(&CellValue, &CellValue) -> Ordering,
    ) {
        if self.state.column(column_id).is_none() {
            return;
        }
        self.mutate(|state| {
            let next = match state.column(column_id).and_then(|c| c.sort) {
                None => Some(SortDirection::Asc),
                Some(SortDirection::Asc) => Some(SortDirection::Desc),
                Some(SortDirection::Desc) => None,
            };
            for column in &mut state.columns {
                column.sort = if column.id == column_id { next } else { None };
            }
            let Some(direction) = next else {
                return;
            };

            state.rows.sort_by(|a, b| {
                let va = a.cell(column_id);
                let vb = b.cell(column_id);
                match (va.is_null(), vb.is_null()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => {
                        let ord = compare(va, vb);
                        match direction {
                            SortDirection::Asc => ord,
                            SortDirection::Desc => ord.reverse(),
                        }
                    }
                }
            });
        });
    }

    // =========================================================================
    // External synchronization
    // =========================================================================

    /// Reconciles externally supplied columns and rows into the store.
    ///
    /// Applies structural changes only when a value-equality check shows
    /// an actual difference. Locally known widths and the current sort
    /// direction survive the reconcile.
    pub fn sync_external_data(&mut self, columns: Vec<ColumnDef>, rows: Vec<RowData>) {
        let merged: Vec<ColumnDef> = columns
            .into_iter()
            .map(|mut incoming| {
                incoming.sort = self.state.column(&incoming.id).and_then(|c| c.sort);
                incoming
            })
            .collect();
        let columns_changed = merged != self.state.columns;
        let rows_changed = rows != self.state.rows;
        if !columns_changed && !rows_changed {
            return;
        }

        self.mutate(|state| {
            if columns_changed {
                state.column_order = merged.iter().map(|c| c.id.clone()).collect();
                state.column_widths = merged
                    .iter()
                    .map(|c| {
                        let width = state
                            .column_widths
                            .get(&c.id)
                            .copied()
                            .or(c.width)
                            .unwrap_or(DEFAULT_COLUMN_WIDTH);
                        (c.id.clone(), width)
                    })
                    .collect();
                state.columns = merged;
            }
            if rows_changed {
                state.rows = rows;
            }
        });
    }
}

/// Default ordering for cell values of the same canonical variant, used
/// when a column's plugin supplies no comparator.
fn default_value_compare(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        (CellValue::Date(x), CellValue::Date(y)) => x.start.cmp(&y.start),
        (CellValue::Progress(x), CellValue::Progress(y)) => x
            .percent()
            .partial_cmp(&y.percent())
            .unwrap_or(Ordering::Equal),
        (CellValue::Tags(x), CellValue::Tags(y)) => x.len().cmp(&y.len()),
        _ => a.type_name().cmp(b.type_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering as AtomicOrdering;
    use std::sync::Arc;

    fn store() -> TableStore {
        let columns = vec![
            ColumnDef::new("c1", "Name", "text"),
            ColumnDef::new("c2", "Count", "number"),
        ];
        let rows = vec![RowData::new("r1").set("c1", "hi").set("c2", 5.0)];
        TableStore::new(columns, rows, None)
    }

    #[test]
    fn test_update_cell_value_and_undo() {
        let mut store = store();
        store.update_cell_value("r1", "c2", CellValue::from(10.0));
        assert_eq!(
            store.state().row("r1").unwrap().cell("c2"),
            &CellValue::from(10.0)
        );
        assert_eq!(
            store.state().row("r1").unwrap().cell("c1"),
            &CellValue::from("hi")
        );
        store.undo();
        assert_eq!(
            store.state().row("r1").unwrap().cell("c2"),
            &CellValue::from(5.0)
        );
    }

    #[test]
    fn test_stale_row_write_is_dropped_without_history() {
        let mut store = store();
        store.update_cell_value("gone", "c1", CellValue::from("x"));
        assert_eq!(store.history_len(), 0);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_stale_column_write_is_dropped() {
        let mut store = store();
        store.update_cell_value("r1", "gone", CellValue::from("x"));
        assert!(store.state().row("r1").unwrap().cell("gone").is_null());
        assert_eq!(store.history_len(), 0);
    }

    #[test]
    fn test_move_column_reorders_display_order() {
        let mut store = store();
        store.move_column(0, 1);
        assert_eq!(store.state().column_order, vec!["c2", "c1"]);
        store.undo();
        assert_eq!(store.state().column_order, vec!["c1", "c2"]);
    }

    #[test]
    fn test_add_column_backfills_rows() {
        let mut store = store();
        let id = store.add_column(ColumnPatch::new().title("Tags").type_key("multiSelect"));
        assert_eq!(store.state().columns.len(), 3);
        assert!(store.state().row("r1").unwrap().cells.contains_key(&id));
        assert!(store.state().row("r1").unwrap().cell(&id).is_null());
        assert_eq!(store.state().column_width(&id), DEFAULT_COLUMN_WIDTH);
    }

    #[test]
    fn test_delete_column_consistency() {
        let mut store = store();
        store.delete_column("c1");
        assert!(store.state().column("c1").is_none());
        assert!(!store.state().column_order.contains(&"c1".to_string()));
        assert!(!store.state().column_widths.contains_key("c1"));
        assert!(!store.state().row("r1").unwrap().cells.contains_key("c1"));
    }

    #[test]
    fn test_add_row_backfills_columns() {
        let mut store = store();
        let id = store.add_row(RowPatch::new());
        let row = store.state().row(&id).unwrap();
        assert!(row.cells.contains_key("c1"));
        assert!(row.cells.contains_key("c2"));
    }

    #[test]
    fn test_undo_redo_inverse_law_for_structural_ops() {
        let mut store = store();
        let before = store.state().snapshot();
        store.add_row(RowPatch::new().id("r2"));
        let after = store.state().snapshot();

        assert!(store.undo());
        assert_eq!(store.state().snapshot(), before);
        assert!(store.redo());
        assert_eq!(store.state().snapshot(), after);
    }

    #[test]
    fn test_resize_is_not_history_worthy_and_clamps() {
        let mut store = store();
        store.resize_column("c1", 10);
        assert_eq!(store.state().column_width("c1"), MIN_COLUMN_WIDTH);
        assert_eq!(store.history_len(), 0);
    }

    #[test]
    fn test_edit_column_mirrors_width() {
        let mut store = store();
        store.edit_column("c1", ColumnPatch::new().title("Renamed").width(20));
        let column = store.state().column("c1").unwrap();
        assert_eq!(column.title, "Renamed");
        assert_eq!(column.width, Some(MIN_COLUMN_WIDTH));
        assert_eq!(store.state().column_width("c1"), MIN_COLUMN_WIDTH);
    }

    #[test]
    fn test_selection_survives_reorder() {
        let mut store = store();
        store.add_row(RowPatch::new().id("r2"));
        store.select_cell("r1", "c2");
        store.move_column(0, 1);
        store.move_row(0, 1);
        let selected = store.state().selected_cell.clone().unwrap();
        assert_eq!(selected, CellCoord::new("r1", "c2"));
        // The identity still resolves to the same content.
        assert_eq!(
            store.state().row(&selected.row_id).unwrap().cell("c1"),
            &CellValue::from("hi")
        );
    }

    #[test]
    fn test_navigation_boundaries_are_no_ops() {
        let mut store = store();
        store.select_cell("r1", "c1");
        store.move_cell_selection(Direction::Up);
        store.move_cell_selection(Direction::Left);
        assert_eq!(
            store.state().selected_cell,
            Some(CellCoord::new("r1", "c1"))
        );
        store.move_cell_selection(Direction::Down);
        assert_eq!(
            store.state().selected_cell,
            Some(CellCoord::new("r1", "c1"))
        );
        store.move_cell_selection(Direction::Right);
        assert_eq!(
            store.state().selected_cell,
            Some(CellCoord::new("r1", "c2"))
        );
        store.move_cell_selection(Direction::Right);
        assert_eq!(
            store.state().selected_cell,
            Some(CellCoord::new("r1", "c2"))
        );
    }

    #[test]
    fn test_navigation_blocked_while_editing() {
        let mut store = store();
        store.start_editing("r1", "c1");
        store.move_cell_selection(Direction::Right);
        assert_eq!(
            store.state().selected_cell,
            Some(CellCoord::new("r1", "c1"))
        );
    }

    #[test]
    fn test_history_bound() {
        let mut store = store();
        for i in 0..60 {
            store.update_cell_value("r1", "c2", CellValue::from(i as f64));
        }
        assert_eq!(store.history_len(), HISTORY_CAP);
        let mut undos = 0;
        while store.undo() {
            undos += 1;
        }
        assert_eq!(undos, HISTORY_CAP);
        // Oldest retained snapshot, not the initial state.
        assert_eq!(
            store.state().row("r1").unwrap().cell("c2"),
            &CellValue::from(9.0)
        );
    }

    #[test]
    fn test_sort_cycles_and_resets_other_columns() {
        let mut store = store();
        store.add_row(RowPatch::new().id("r2").cell("c2", 1.0));
        store.sort_rows("c2");
        assert_eq!(
            store.state().column("c2").unwrap().sort,
            Some(SortDirection::Asc)
        );
        assert_eq!(store.state().rows[0].id, "r2");
        store.sort_rows("c2");
        assert_eq!(store.state().rows[0].id, "r1");
        store.sort_rows("c1");
        assert_eq!(store.state().column("c2").unwrap().sort, None);
        assert_eq!(
            store.state().column("c1").unwrap().sort,
            Some(SortDirection::Asc)
        );
        store.sort_rows("c2");
        store.sort_rows("c2");
        store.sort_rows("c2");
        assert_eq!(store.state().column("c2").unwrap().sort, None);
    }

    #[test]
    fn test_sync_external_data_preserves_widths() {
        let mut store = store();
        store.resize_column("c1", 321);
        let columns = vec![
            ColumnDef::new("c1", "Name (renamed)", "text"),
            ColumnDef::new("c2", "Count", "number"),
        ];
        let rows = store.state().rows.clone();
        store.sync_external_data(columns, rows);
        assert_eq!(store.state().column("c1").unwrap().title, "Name (renamed)");
        assert_eq!(store.state().column_width("c1"), 321);
    }

    #[test]
    fn test_sync_external_data_noop_on_equal_input() {
        let mut store = store();
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notified);
        store.subscribe(move |_| {
            counter.fetch_add(1, AtomicOrdering::SeqCst);
        });
        let columns = store.state().columns.clone();
        let rows = store.state().rows.clone();
        store.sync_external_data(columns, rows);
        assert_eq!(notified.load(AtomicOrdering::SeqCst), 0);
    }

    #[test]
    fn test_delete_row_clears_dangling_selection() {
        let mut store = store();
        store.select_cell("r1", "c1");
        store.delete_row("r1");
        assert_eq!(store.state().selected_cell, None);
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let mut store = store();
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notified);
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, AtomicOrdering::SeqCst);
        });
        store.select_cell("r1", "c1");
        assert_eq!(notified.load(AtomicOrdering::SeqCst), 1);
        store.unsubscribe(id);
        store.select_cell("r1", "c2");
        assert_eq!(notified.load(AtomicOrdering::SeqCst), 1);
    }
}
