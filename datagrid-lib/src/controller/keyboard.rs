//! Keyboard navigation and shortcuts
//!
//! Translates host key events into store and edit-lifecycle calls. The
//! host maps its native key events onto [`Key`] and reports whether the
//! grid consumed the event; unconsumed keys (arrows while a text editor
//! is open, say) stay with the host's focused widget.

use crate::model::CellValue;
use crate::model::Direction;
use crate::plugin::PluginRegistry;
use crate::store::TableStore;

use super::EditController;

/// Grid-relevant keys, mapped from host key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Begin editing the selected cell, or commit the edit in progress.
    Enter,
    /// Cancel the edit in progress, or clear the selection.
    Escape,
    /// Commit and move the selection right.
    Tab,
    /// Commit and move the selection left.
    ShiftTab,
    /// Move the selection.
    Arrow(Direction),
    /// Clear the selected cell's value.
    Delete,
    /// Step the history back.
    Undo,
    /// Step the history forward.
    Redo,
}

/// Routes one key event. Returns `true` when the grid consumed it.
pub fn handle_key(
    store: &mut TableStore,
    registry: &PluginRegistry,
    edit: &mut EditController,
    key: Key,
) -> bool {
    let editing = store.state().editing_cell.is_some();
    let selected = store.state().selected_cell.clone();

    match key {
        Key::Enter => {
            if editing {
                edit.commit(store, registry);
                true
            } else if let Some(coord) = selected {
                edit.begin_edit(store, registry, &coord.row_id, &coord.column_id)
            } else {
                false
            }
        }
        Key::Escape => {
            if editing {
                edit.cancel(store);
                true
            } else if selected.is_some() {
                store.clear_cell_selection();
                true
            } else {
                false
            }
        }
        Key::Tab | Key::ShiftTab => {
            if selected.is_none() {
                return false;
            }
            if editing {
                edit.commit(store, registry);
            }
            let direction = if key == Key::Tab {
                Direction::Right
            } else {
                Direction::Left
            };
            store.move_cell_selection(direction);
            true
        }
        Key::Arrow(direction) => {
            // An open editor owns the arrow keys.
            if editing || selected.is_none() {
                return false;
            }
            store.move_cell_selection(direction);
            true
        }
        Key::Delete => {
            if editing {
                return false;
            }
            let Some(coord) = selected else {
                return false;
            };
            edit.apply_direct(
                store,
                registry,
                &coord.row_id,
                &coord.column_id,
                CellValue::Null,
            );
            true
        }
        Key::Undo => {
            if editing {
                return false;
            }
            store.undo()
        }
        Key::Redo => {
            if editing {
                return false;
            }
            store.redo()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::ExternalServices;
    use crate::model::CellCoord;
    use crate::model::ColumnDef;
    use crate::model::RowData;

    fn fixture() -> (TableStore, PluginRegistry, EditController) {
        let columns = vec![
            ColumnDef::new("c1", "Name", "text"),
            ColumnDef::new("c2", "Count", "number"),
        ];
        let rows = vec![
            RowData::new("r1").set("c1", "hi").set("c2", 5.0),
            RowData::new("r2"),
        ];
        let store = TableStore::new(columns, rows, None);
        let registry = PluginRegistry::with_builtins(&ExternalServices::default());
        (store, registry, EditController::new())
    }

    #[test]
    fn test_enter_toggles_edit_mode() {
        let (mut store, registry, mut edit) = fixture();
        store.select_cell("r1", "c1");
        assert!(handle_key(&mut store, &registry, &mut edit, Key::Enter));
        assert!(store.state().editing_cell.is_some());
        edit.update_draft(CellValue::from("typed"));
        assert!(handle_key(&mut store, &registry, &mut edit, Key::Enter));
        assert_eq!(store.state().editing_cell, None);
        assert_eq!(
            store.state().row("r1").unwrap().cell("c1"),
            &CellValue::from("typed")
        );
    }

    #[test]
    fn test_arrows_ignored_while_editing() {
        let (mut store, registry, mut edit) = fixture();
        store.select_cell("r1", "c1");
        edit.begin_edit(&mut store, &registry, "r1", "c1");
        assert!(!handle_key(
            &mut store,
            &registry,
            &mut edit,
            Key::Arrow(Direction::Right)
        ));
        assert_eq!(
            store.state().selected_cell,
            Some(CellCoord::new("r1", "c1"))
        );
    }

    #[test]
    fn test_tab_commits_and_advances() {
        let (mut store, registry, mut edit) = fixture();
        store.select_cell("r1", "c1");
        edit.begin_edit(&mut store, &registry, "r1", "c1");
        edit.update_draft(CellValue::from("done"));
        assert!(handle_key(&mut store, &registry, &mut edit, Key::Tab));
        assert_eq!(
            store.state().row("r1").unwrap().cell("c1"),
            &CellValue::from("done")
        );
        assert_eq!(
            store.state().selected_cell,
            Some(CellCoord::new("r1", "c2"))
        );
    }

    #[test]
    fn test_escape_cancels_then_clears_selection() {
        let (mut store, registry, mut edit) = fixture();
        store.select_cell("r1", "c1");
        edit.begin_edit(&mut store, &registry, "r1", "c1");
        edit.update_draft(CellValue::from("discarded"));
        assert!(handle_key(&mut store, &registry, &mut edit, Key::Escape));
        assert_eq!(
            store.state().row("r1").unwrap().cell("c1"),
            &CellValue::from("hi")
        );
        assert!(handle_key(&mut store, &registry, &mut edit, Key::Escape));
        assert_eq!(store.state().selected_cell, None);
    }

    #[test]
    fn test_delete_clears_cell() {
        let (mut store, registry, mut edit) = fixture();
        store.select_cell("r1", "c2");
        assert!(handle_key(&mut store, &registry, &mut edit, Key::Delete));
        assert!(store.state().row("r1").unwrap().cell("c2").is_null());
    }

    #[test]
    fn test_undo_redo_keys() {
        let (mut store, registry, mut edit) = fixture();
        store.update_cell_value("r1", "c2", CellValue::from(9.0));
        assert!(handle_key(&mut store, &registry, &mut edit, Key::Undo));
        assert_eq!(
            store.state().row("r1").unwrap().cell("c2"),
            &CellValue::from(5.0)
        );
        assert!(handle_key(&mut store, &registry, &mut edit, Key::Redo));
        assert_eq!(
            store.state().row("r1").unwrap().cell("c2"),
            &CellValue::from(9.0)
        );
    }

    #[test]
    fn test_unselected_grid_ignores_navigation() {
        let (mut store, registry, mut edit) = fixture();
        assert!(!handle_key(
            &mut store,
            &registry,
            &mut edit,
            Key::Arrow(Direction::Down)
        ));
        assert!(!handle_key(&mut store, &registry, &mut edit, Key::Enter));
    }
}
