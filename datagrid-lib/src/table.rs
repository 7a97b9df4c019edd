//! Grid facade
//!
//! [`Table`] bundles the store, the plugin registry and the interaction
//! controllers behind one handle. Hosts that want finer control can use
//! the parts directly; the facade wires them together the intended way
//! (plugin transforms on load and save, plugin comparators for sorting,
//! cleanup on column deletion) and exposes a change-export gate for
//! persisting the grid back into a host document.

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::controller::handle_key;
use crate::controller::EditController;
use crate::controller::Key;
use crate::controller::ReorderCoordinator;
use crate::controller::ReorderTarget;
use crate::controller::ResizeCoordinator;
use crate::external::ExternalServices;
use crate::model::CellValue;
use crate::model::ColumnDef;
use crate::model::ColumnPatch;
use crate::model::RowData;
use crate::model::RowPatch;
use crate::plugin::CellPlugin;
use crate::plugin::CellView;
use crate::plugin::EditorContext;
use crate::plugin::PluginRegistry;
use crate::plugin::RenderContext;
use crate::plugin::Theme;
use crate::store::TableStore;

/// The serializable grid content, as persisted into a host document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDocument {
    /// Column definitions.
    pub columns: Vec<ColumnDef>,
    /// Row data.
    pub rows: Vec<RowData>,
    /// Display order of column ids.
    pub column_order: Vec<String>,
}

/// Construction options for [`Table`].
#[derive(Default)]
pub struct TableOptions {
    columns: Vec<ColumnDef>,
    rows: Vec<RowData>,
    column_order: Option<Vec<String>>,
    theme: Theme,
    readonly: bool,
    services: ExternalServices,
    extra_plugins: Vec<Arc<dyn CellPlugin>>,
}

impl TableOptions {
    /// Starts from an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the initial columns.
    pub fn columns(mut self, columns: Vec<ColumnDef>) -> Self {
        self.columns = columns;
        self
    }

    /// Seeds the initial rows.
    pub fn rows(mut self, rows: Vec<RowData>) -> Self {
        self.rows = rows;
        self
    }

    /// Overrides the display order of column ids.
    pub fn column_order(mut self, order: Vec<String>) -> Self {
        self.column_order = Some(order);
        self
    }

    /// Sets the host theme passed to cell renderers.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Makes the grid read-only.
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Injects external collaborators for the built-in plugins.
    pub fn services(mut self, services: ExternalServices) -> Self {
        self.services = services;
        self
    }

    /// Registers additional plugins on top of the built-in set. A plugin
    /// sharing a built-in's type key shadows it.
    pub fn plugin(mut self, plugin: Arc<dyn CellPlugin>) -> Self {
        self.extra_plugins.push(plugin);
        self
    }

    /// Builds the table.
    pub fn build(self) -> Table {
        Table::new(self)
    }
}

/// One embedded grid: store, plugins and controllers wired together.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{CellValue, ColumnDef, RowData};
/// use datagrid_lib::TableOptions;
///
/// let mut table = TableOptions::new()
///     .columns(vec![ColumnDef::new("c1", "Name", "text")])
///     .rows(vec![RowData::new("r1").set("c1", "hi")])
///     .build();
///
/// table.select("r1", "c1");
/// table.begin_edit("r1", "c1");
/// table.update_draft(CellValue::from("hello"));
/// table.commit_edit();
/// assert_eq!(table.store().state().row("r1").unwrap().cell("c1"), &CellValue::from("hello"));
/// ```
pub struct Table {
    store: TableStore,
    registry: PluginRegistry,
    edit: EditController,
    reorder: ReorderCoordinator,
    resize: ResizeCoordinator,
    theme: Theme,
    readonly: bool,
    last_exported: Option<TableDocument>,
}

impl Table {
    fn new(options: TableOptions) -> Self {
        let mut registry = PluginRegistry::with_builtins(&options.services);
        registry.register_plugins(options.extra_plugins);
        registry.load_all_plugins();

        let rows = hydrate_rows(&registry, &options.columns, options.rows);
        let store = TableStore::new(options.columns, rows, options.column_order);
        Self {
            store,
            registry,
            edit: EditController::new(),
            reorder: ReorderCoordinator::new(),
            resize: ResizeCoordinator::new(),
            theme: options.theme,
            readonly: options.readonly,
            last_exported: None,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &TableStore {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut TableStore {
        &mut self.store
    }

    /// The plugin registry.
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// The edit lifecycle controller.
    pub fn edit(&self) -> &EditController {
        &self.edit
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Describes a cell for read-mode display. Unknown column types get
    /// a placeholder so the grid never renders a hole.
    pub fn render_cell(&self, row_id: &str, column_id: &str) -> CellView {
        let state = self.store.state();
        let (Some(row), Some(column)) = (state.row(row_id), state.column(column_id)) else {
            return CellView::Empty;
        };
        let Some(plugin) = self.registry.get_plugin(&column.type_key) else {
            return CellView::Placeholder {
                type_key: column.type_key.clone(),
            };
        };
        plugin.render(&RenderContext {
            value: row.cell(column_id),
            column,
            theme: self.theme,
            readonly: self.readonly,
        })
    }

    /// Describes the editor for the cell being edited, if any.
    pub fn editor_view(&self) -> Option<CellView> {
        let state = self.store.state();
        let coord = state.editing_cell.as_ref()?;
        let column = state.column(&coord.column_id)?;
        let plugin = self.registry.get_plugin(&column.type_key)?;
        plugin.edit(&EditorContext {
            value: self.edit.draft()?,
            column,
            theme: self.theme,
            readonly: self.readonly,
        })
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Routes a key event. Returns `true` when the grid consumed it.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if self.readonly {
            return false;
        }
        handle_key(&mut self.store, &self.registry, &mut self.edit, key)
    }

    /// Selects a cell, committing any edit in progress first.
    pub fn select(&mut self, row_id: &str, column_id: &str) {
        self.edit.select(&mut self.store, &self.registry, row_id, column_id);
    }

    /// Enters edit mode on a cell. Returns `false` for types without an
    /// edit mode and for read-only grids.
    pub fn begin_edit(&mut self, row_id: &str, column_id: &str) -> bool {
        if self.readonly {
            return false;
        }
        self.edit
            .begin_edit(&mut self.store, &self.registry, row_id, column_id)
    }

    /// Replaces the edit draft.
    pub fn update_draft(&mut self, value: CellValue) {
        self.edit.update_draft(value);
    }

    /// Commits the edit in progress.
    pub fn commit_edit(&mut self) -> crate::controller::CommitOutcome {
        self.edit.commit(&mut self.store, &self.registry)
    }

    /// Cancels the edit in progress.
    pub fn cancel_edit(&mut self) {
        self.edit.cancel(&mut self.store);
    }

    /// Clears the selection, committing any edit in progress first.
    pub fn deselect(&mut self) {
        self.edit.deselect(&mut self.store, &self.registry);
    }

    /// Writes a value without entering edit mode, for
    /// direct-manipulation cell types.
    pub fn apply_direct(
        &mut self,
        row_id: &str,
        column_id: &str,
        value: CellValue,
    ) -> crate::controller::CommitOutcome {
        self.edit
            .apply_direct(&mut self.store, &self.registry, row_id, column_id, value)
    }

    /// Begins a drag-to-reorder interaction.
    pub fn drag_start(&mut self, target: ReorderTarget, index: usize) {
        self.reorder.drag_start(target, index);
    }

    /// Reports the index currently hovered during a drag.
    pub fn drag_over(&mut self, target: ReorderTarget, index: usize) {
        self.reorder.drag_over(&mut self.store, target, index);
    }

    /// Ends a drag-to-reorder interaction.
    pub fn drag_end(&mut self) {
        self.reorder.drag_end();
    }

    /// Begins a column resize interaction.
    pub fn resize_start(&mut self, column_id: &str) {
        self.resize.resize_start(&self.store, column_id);
    }

    /// Applies live resize feedback.
    pub fn resize_update(&mut self, width: u32) {
        self.resize.resize_update(&mut self.store, width);
    }

    /// Finalizes a column resize.
    pub fn resize_end(&mut self) {
        self.resize.resize_end(&mut self.store);
    }

    /// Cycles a column's sort direction, ordering values with the
    /// column plugin's comparator when it has one.
    pub fn sort_column(&mut self, column_id: &str) {
        let Some(column) = self.store.state().column(column_id) else {
            return;
        };
        if !self.registry.has_plugin(&column.type_key) {
            self.store.sort_rows(column_id);
            return;
        }
        let type_key = column.type_key.clone();
        let config = column.config.clone();
        let registry = &self.registry;
        self.store.sort_rows_with(column_id, |a, b| {
            registry.compare_values(&type_key, a, b, config.as_ref())
        });
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Appends a column. Returns its id.
    pub fn add_column(&mut self, patch: ColumnPatch) -> String {
        self.store.add_column(patch)
    }

    /// Merges a patch into a column.
    pub fn edit_column(&mut self, column_id: &str, patch: ColumnPatch) {
        self.store.edit_column(column_id, patch);
    }

    /// Deletes a column after releasing externally held resources
    /// through its plugin's cleanup hook. Cleanup failures are logged
    /// and never block the delete.
    pub async fn delete_column(&mut self, column_id: &str) {
        self.store
            .delete_column_with_cleanup(column_id, &self.registry)
            .await;
    }

    /// Appends a row. Returns its id.
    pub fn add_row(&mut self, patch: RowPatch) -> String {
        self.store.add_row(patch)
    }

    /// Deletes a row.
    pub fn delete_row(&mut self, row_id: &str) {
        self.store.delete_row(row_id);
    }

    /// Steps the history back. Returns `false` at the oldest entry.
    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    /// Steps the history forward. Returns `false` at the newest entry.
    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    // =========================================================================
    // Host document exchange
    // =========================================================================

    /// Reconciles externally supplied content into the grid, hydrating
    /// incoming values through each column's plugin.
    pub fn sync_external_data(&mut self, columns: Vec<ColumnDef>, rows: Vec<RowData>) {
        let rows = hydrate_rows(&self.registry, &columns, rows);
        self.store.sync_external_data(columns, rows);
    }

    /// Returns the grid content when it differs from the last export,
    /// `None` otherwise. Hosts poll this after mutations to persist the
    /// grid without writing on every cursor move.
    pub fn take_change(&mut self) -> Option<TableDocument> {
        let state = self.store.state();
        let document = TableDocument {
            columns: state.columns.clone(),
            rows: state.rows.clone(),
            column_order: state.column_order.clone(),
        };
        if self.last_exported.as_ref() == Some(&document) {
            return None;
        }
        self.last_exported = Some(document.clone());
        Some(document)
    }

    /// Unmounts every loaded plugin. Called by hosts tearing the grid
    /// down; dropping the table without this skips the unmount hooks.
    pub fn shutdown(&mut self) {
        self.registry.unload_all_plugins();
    }
}

fn hydrate_rows(
    registry: &PluginRegistry,
    columns: &[ColumnDef],
    rows: Vec<RowData>,
) -> Vec<RowData> {
    rows.into_iter()
        .map(|mut row| {
            for column in columns {
                let value = row.cell(&column.id).clone();
                if value.is_null() {
                    continue;
                }
                let hydrated =
                    registry.transform_after_load(&column.type_key, value, column.config.as_ref());
                row.set_cell(column.id.clone(), hydrated);
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::DateRange;

    fn table() -> Table {
        TableOptions::new()
            .columns(vec![
                ColumnDef::new("c1", "Name", "text"),
                ColumnDef::new("c2", "Due", "date"),
            ])
            .rows(vec![RowData::new("r1").set("c1", "hi").set("c2", 1700000000000.0)])
            .build()
    }

    #[test]
    fn test_construction_hydrates_values() {
        let table = table();
        assert_eq!(
            table.store().state().row("r1").unwrap().cell("c2"),
            &CellValue::Date(DateRange::single(1700000000000))
        );
    }

    #[test]
    fn test_render_unknown_type_yields_placeholder() {
        let mut table = table();
        table.store_mut().add_column(
            ColumnPatch::new().id("c3").title("Custom").type_key("geo"),
        );
        assert_eq!(
            table.render_cell("r1", "c3"),
            CellView::Placeholder {
                type_key: "geo".to_string()
            }
        );
    }

    #[test]
    fn test_take_change_gates_on_equality() {
        let mut table = table();
        let first = table.take_change();
        assert!(first.is_some());
        assert_eq!(table.take_change(), None);

        table.select("r1", "c1");
        assert_eq!(table.take_change(), None);

        table.apply_direct("r1", "c1", CellValue::from("changed"));
        let exported = table.take_change().unwrap();
        assert_eq!(exported.rows[0].cell("c1"), &CellValue::from("changed"));
    }

    #[test]
    fn test_readonly_blocks_editing() {
        let mut table = TableOptions::new()
            .columns(vec![ColumnDef::new("c1", "Name", "text")])
            .rows(vec![RowData::new("r1")])
            .readonly()
            .build();
        assert!(!table.begin_edit("r1", "c1"));
        assert!(!table.handle_key(Key::Enter));
    }

    #[test]
    fn test_sort_column_uses_plugin_comparator() {
        let mut table = TableOptions::new()
            .columns(vec![ColumnDef::new("c1", "Due", "date")])
            .rows(vec![
                RowData::new("r1").set("c1", 2000.0),
                RowData::new("r2").set("c1", 1000.0),
            ])
            .build();
        table.sort_column("c1");
        assert_eq!(table.store().state().rows[0].id, "r2");
    }
}
