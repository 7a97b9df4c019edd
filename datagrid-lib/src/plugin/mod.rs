//! Cell plugin contract and registry
//!
//! A [`CellPlugin`] supplies the rendering, editing, serialization and
//! cleanup behavior for one column type. The store knows nothing about
//! plugins; controllers and the facade consult the [`PluginRegistry`]
//! at well-defined points (render, value transform, column teardown).

mod registry;
mod view;

pub use registry::*;
pub use view::*;

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::error::PluginError;
use crate::model::CellValue;
use crate::model::ColumnConfig;
use crate::model::ColumnDef;

/// Host color theme, passed through to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

/// Read-mode render input.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The stored (already hydrated) cell value.
    pub value: &'a CellValue,
    /// The cell's column.
    pub column: &'a ColumnDef,
    /// Host theme.
    pub theme: Theme,
    /// Whether the grid is read-only.
    pub readonly: bool,
}

/// Edit-mode render input. `value` is the current draft, not the stored
/// value; the store is only written on commit.
#[derive(Debug, Clone, Copy)]
pub struct EditorContext<'a> {
    /// The draft value being edited.
    pub value: &'a CellValue,
    /// The cell's column.
    pub column: &'a ColumnDef,
    /// Host theme.
    pub theme: Theme,
    /// Whether the grid is read-only.
    pub readonly: bool,
}

impl<'a> RenderContext<'a> {
    /// Convenience accessor for the column's plugin config.
    pub fn config(&self) -> Option<&'a ColumnConfig> {
        self.column.config.as_ref()
    }
}

impl<'a> EditorContext<'a> {
    /// Convenience accessor for the column's plugin config.
    pub fn config(&self) -> Option<&'a ColumnConfig> {
        self.column.config.as_ref()
    }
}

/// The extension contract for one column type.
///
/// Implementations are registered with a [`PluginRegistry`] under their
/// [`type_key`](Self::type_key). Plugins needing to change a column's
/// config (say, a select editor adding an option) route the change
/// through the host's column-change path (`edit_column`), never by
/// mutating the config in place.
///
/// # Contract
///
/// - `after_load(before_save(v))` must equal `after_load(v)` for valid
///   `v`, and `after_load` must be idempotent under composition.
/// - `before_save(Null)` must be null or the type's empty equivalent.
/// - `on_mount`/`on_unmount` must tolerate repeated calls; the registry's
///   loaded-set makes repeats no-ops, but defensive hosts may call them.
/// - `cleanup_value` releases external resources referenced by one cell
///   value; failures are reported, logged by the registry, and must not
///   leave the plugin unusable.
#[async_trait]
pub trait CellPlugin: Send + Sync {
    /// Unique column type key, e.g. `"text"` or `"multiSelect"`.
    fn type_key(&self) -> &'static str;

    /// Display label for column type pickers.
    fn name(&self) -> &'static str;

    /// Icon name for column headers, if any.
    fn icon(&self) -> Option<&'static str> {
        None
    }

    /// Whether the edit lifecycle may transition this cell into the
    /// editing state. Direct-manipulation plugins return `false` and
    /// mutate through [`EditController::apply_direct`] instead.
    ///
    /// [`EditController::apply_direct`]: crate::controller::EditController::apply_direct
    fn editable(&self) -> bool {
        true
    }

    /// Read-mode presentation.
    fn render(&self, ctx: &RenderContext<'_>) -> CellView;

    /// Edit-mode control, for types with a distinct edit mode.
    fn edit(&self, ctx: &EditorContext<'_>) -> Option<CellView> {
        let _ = ctx;
        None
    }

    /// Normalizes a value immediately before it is written into a row.
    fn before_save(&self, value: CellValue, config: Option<&ColumnConfig>) -> CellValue {
        let _ = config;
        value
    }

    /// Hydrates a stored value back into the shape this plugin expects.
    fn after_load(&self, value: CellValue, config: Option<&ColumnConfig>) -> CellValue {
        let _ = config;
        value
    }

    /// Orders two non-null values of this type for row sorting.
    fn compare(&self, a: &CellValue, b: &CellValue, config: Option<&ColumnConfig>) -> Ordering {
        let _ = (a, b, config);
        Ordering::Equal
    }

    /// Invoked once when the registry loads this plugin.
    fn on_mount(&self) -> Result<(), PluginError> {
        Ok(())
    }

    /// Invoked once when the registry unloads this plugin.
    fn on_unmount(&self) -> Result<(), PluginError> {
        Ok(())
    }

    /// Whether column deletion should collect values for cleanup.
    fn supports_cleanup(&self) -> bool {
        false
    }

    /// Releases external resources referenced by one cell value.
    async fn cleanup_value(&self, value: &CellValue) -> Result<(), PluginError> {
        let _ = value;
        Ok(())
    }
}
