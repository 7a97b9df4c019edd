//! Cell edit lifecycle
//!
//! Drives the select → edit → commit/cancel cycle over a [`TableStore`],
//! consulting the [`PluginRegistry`] for editability and value
//! transforms. The draft being edited lives here, not in the store; the
//! store only sees the final value on a successful commit.

use log::debug;

use crate::error::ValidationError;
use crate::model::CellCoord;
use crate::model::CellValue;
use crate::plugin::PluginRegistry;
use crate::store::TableStore;
use crate::validation::validate_value;

/// Outcome of a commit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// The draft passed validation and was written.
    Saved,
    /// The draft failed validation; the cell keeps its previous value.
    Rejected(ValidationError),
    /// No edit was in progress.
    NotEditing,
}

/// Coordinates the edit lifecycle for one grid.
///
/// A commit that fails validation discards the draft, leaves editing
/// mode and keeps the cell's previous committed value; the error is
/// retained in [`last_error`](Self::last_error) until the next edit
/// begins.
#[derive(Debug, Default)]
pub struct EditController {
    draft: Option<CellValue>,
    last_error: Option<ValidationError>,
}

impl EditController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current draft, if an edit is in progress.
    pub fn draft(&self) -> Option<&CellValue> {
        self.draft.as_ref()
    }

    /// The most recent validation failure, cleared when a new edit
    /// begins.
    pub fn last_error(&self) -> Option<&ValidationError> {
        self.last_error.as_ref()
    }

    /// Selects a cell. An edit in progress on another cell is committed
    /// first.
    pub fn select(
        &mut self,
        store: &mut TableStore,
        registry: &PluginRegistry,
        row_id: &str,
        column_id: &str,
    ) {
        if store.state().editing_cell.is_some() {
            self.commit(store, registry);
        }
        store.select_cell(row_id, column_id);
    }

    /// Enters edit mode on a cell, seeding the draft from the stored
    /// value. Returns `false` when the cell's type has no edit mode.
    ///
    /// An edit already in progress on another cell is committed first.
    pub fn begin_edit(
        &mut self,
        store: &mut TableStore,
        registry: &PluginRegistry,
        row_id: &str,
        column_id: &str,
    ) -> bool {
        let Some(column) = store.state().column(column_id) else {
            return false;
        };
        let editable = registry
            .get_plugin(&column.type_key)
            .is_none_or(|p| p.editable());
        if !editable {
            debug!("column type `{}` has no edit mode", column.type_key);
            return false;
        }
        let coord = CellCoord::new(row_id, column_id);
        if store
            .state()
            .editing_cell
            .as_ref()
            .is_some_and(|c| *c != coord)
        {
            self.commit(store, registry);
        }

        let Some(column) = store.state().column(column_id) else {
            return false;
        };
        let Some(row) = store.state().row(row_id) else {
            return false;
        };
        let draft = registry.transform_after_load(
            &column.type_key,
            row.cell(column_id).clone(),
            column.config.as_ref(),
        );
        self.draft = Some(draft);
        self.last_error = None;
        store.start_editing(row_id, column_id);
        true
    }

    /// Replaces the draft while editing. Ignored when idle.
    pub fn update_draft(&mut self, value: CellValue) {
        if self.draft.is_some() {
            self.draft = Some(value);
        }
    }

    /// Finishes the edit: validates the draft, normalizes it through the
    /// plugin's save transform and writes it into the store.
    ///
    /// On rejection nothing is written and editing mode ends; the cell
    /// keeps its previous value.
    pub fn commit(&mut self, store: &mut TableStore, registry: &PluginRegistry) -> CommitOutcome {
        let Some(coord) = store.state().editing_cell.clone() else {
            self.draft = None;
            return CommitOutcome::NotEditing;
        };
        let Some(draft) = self.draft.take() else {
            store.stop_editing();
            return CommitOutcome::NotEditing;
        };
        let Some(column) = store.state().column(&coord.column_id) else {
            store.stop_editing();
            return CommitOutcome::NotEditing;
        };

        if let Some(rule) = &column.validation {
            if let Err(error) = validate_value(rule, &draft) {
                debug!("rejecting edit of {}/{}: {error}", coord.row_id, coord.column_id);
                self.last_error = Some(error.clone());
                store.stop_editing();
                return CommitOutcome::Rejected(error);
            }
        }

        let value =
            registry.transform_before_save(&column.type_key, draft, column.config.as_ref());
        store.update_cell_value(&coord.row_id, &coord.column_id, value);
        store.stop_editing();
        self.last_error = None;
        CommitOutcome::Saved
    }

    /// Abandons the edit without writing; the draft is discarded.
    pub fn cancel(&mut self, store: &mut TableStore) {
        self.draft = None;
        store.stop_editing();
    }

    /// Clears the selection, committing any edit in progress first.
    pub fn deselect(&mut self, store: &mut TableStore, registry: &PluginRegistry) {
        if store.state().editing_cell.is_some() {
            self.commit(store, registry);
        }
        store.clear_cell_selection();
    }

    /// Writes a value without entering edit mode, for
    /// direct-manipulation types (checkbox toggles, star clicks).
    ///
    /// The value still passes validation and the plugin's save
    /// transform; a rejected value is dropped.
    pub fn apply_direct(
        &mut self,
        store: &mut TableStore,
        registry: &PluginRegistry,
        row_id: &str,
        column_id: &str,
        value: CellValue,
    ) -> CommitOutcome {
        let Some(column) = store.state().column(column_id) else {
            return CommitOutcome::NotEditing;
        };
        if let Some(rule) = &column.validation {
            if let Err(error) = validate_value(rule, &value) {
                self.last_error = Some(error.clone());
                return CommitOutcome::Rejected(error);
            }
        }
        let value = registry.transform_before_save(&column.type_key, value, column.config.as_ref());
        store.update_cell_value(row_id, column_id, value);
        self.last_error = None;
        CommitOutcome::Saved
    }
}
