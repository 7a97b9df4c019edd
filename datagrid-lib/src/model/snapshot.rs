//! History snapshot type

use serde::Deserialize;
use serde::Serialize;

use super::column::ColumnDef;
use super::row::RowData;

/// A structural deep copy of the reversible parts of the table state,
/// taken before a history-worthy mutation.
///
/// Column widths, selection and the editing cursor are transient and
/// deliberately excluded; undo/redo restores only columns, rows and
/// column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// The column definitions.
    pub columns: Vec<ColumnDef>,
    /// The row data.
    pub rows: Vec<RowData>,
    /// The display order of column ids.
    pub column_order: Vec<String>,
}
