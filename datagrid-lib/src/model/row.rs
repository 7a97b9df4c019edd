//! Row data types

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::value::CellValue;

static NULL_CELL: CellValue = CellValue::Null;

/// One row of the grid: a stable id plus a cell value per column id.
///
/// Columns absent from the map read as [`CellValue::Null`]; structural
/// edits (`add_column`, `add_row`) back-fill explicit nulls so every
/// known column has an entry afterwards.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{CellValue, RowData};
///
/// let row = RowData::new("r1").set("c1", "hi");
/// assert_eq!(row.cell("c1"), &CellValue::from("hi"));
/// assert_eq!(row.cell("missing"), &CellValue::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowData {
    /// Unique, stable identifier.
    pub id: String,
    /// Cell values keyed by column id.
    #[serde(flatten)]
    pub cells: HashMap<String, CellValue>,
}

impl RowData {
    /// Creates a new empty row.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cells: HashMap::new(),
        }
    }

    /// Sets a cell value, builder style.
    pub fn set(mut self, column_id: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(column_id.into(), value.into());
        self
    }

    /// Returns the cell value for a column; absent entries read as null.
    pub fn cell(&self, column_id: &str) -> &CellValue {
        self.cells.get(column_id).unwrap_or(&NULL_CELL)
    }

    /// Writes a cell value in place.
    pub fn set_cell(&mut self, column_id: impl Into<String>, value: CellValue) {
        self.cells.insert(column_id.into(), value);
    }

    /// Removes a column's entry, returning the previous value if any.
    pub fn remove_cell(&mut self, column_id: &str) -> Option<CellValue> {
        self.cells.remove(column_id)
    }
}

/// Initial cell values for [`add_row`](crate::store::TableStore::add_row).
///
/// Columns not named here are back-filled with null.
#[derive(Debug, Clone, Default)]
pub struct RowPatch {
    /// Explicit id; a v4 UUID is generated when absent.
    pub id: Option<String>,
    /// Initial cell values keyed by column id.
    pub cells: HashMap<String, CellValue>,
}

impl RowPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit row id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets an initial cell value.
    pub fn cell(mut self, column_id: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(column_id.into(), value.into());
        self
    }
}
