//! Column definition types

use serde::Deserialize;
use serde::Serialize;

use super::config::ColumnConfig;
use crate::validation::ValidationRule;

/// Minimum column width, in layout units.
pub const MIN_COLUMN_WIDTH: u32 = 50;

/// Default column width, in layout units.
pub const DEFAULT_COLUMN_WIDTH: u32 = 200;

/// Sort direction for a column, cycled by [`TableStore::sort_rows`].
///
/// [`TableStore::sort_rows`]: crate::store::TableStore::sort_rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// A typed column of the grid.
///
/// The `type_key` names the [`CellPlugin`](crate::plugin::CellPlugin) that
/// renders and edits this column's cells. An unresolvable key degrades to
/// a neutral placeholder at render time; it never fails structurally.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::ColumnDef;
///
/// let col = ColumnDef::new("c1", "Title", "text").with_width(240);
/// assert_eq!(col.width, Some(240));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Unique, stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Plugin key, e.g. `"text"`, `"number"`, `"multiSelect"`.
    #[serde(rename = "type")]
    pub type_key: String,
    /// Preferred width in layout units, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Plugin-specific configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ColumnConfig>,
    /// Validation applied when a draft is committed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
    /// Whether the column is hidden from view (still part of the data).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    /// Current sort direction, if the rows are sorted by this column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDirection>,
}

impl ColumnDef {
    /// Creates a new column definition.
    pub fn new(id: impl Into<String>, title: impl Into<String>, type_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            type_key: type_key.into(),
            width: None,
            config: None,
            validation: None,
            hidden: false,
            sort: None,
        }
    }

    /// Sets the preferred width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the plugin-specific configuration.
    pub fn with_config(mut self, config: ColumnConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the validation rule.
    pub fn with_validation(mut self, validation: ValidationRule) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Marks the column hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// A partial column update, merged by
/// [`TableStore::edit_column`](crate::store::TableStore::edit_column) and
/// used to seed [`add_column`](crate::store::TableStore::add_column).
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ColumnPatch {
    /// Explicit id for `add_column`; ignored by `edit_column`.
    pub id: Option<String>,
    /// New display title.
    pub title: Option<String>,
    /// New plugin key.
    pub type_key: Option<String>,
    /// New width; clamped to [`MIN_COLUMN_WIDTH`] and mirrored into the
    /// store's width map.
    pub width: Option<u32>,
    /// Replacement configuration.
    pub config: Option<ColumnConfig>,
    /// Replacement validation rule.
    pub validation: Option<ValidationRule>,
    /// New hidden flag.
    pub hidden: Option<bool>,
}

impl ColumnPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit id for `add_column`.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the plugin key.
    pub fn type_key(mut self, type_key: impl Into<String>) -> Self {
        self.type_key = Some(type_key.into());
        self
    }

    /// Sets the width.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ColumnConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the validation rule.
    pub fn validation(mut self, validation: ValidationRule) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Sets the hidden flag.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }
}
