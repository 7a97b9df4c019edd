//! Cell addressing types

use serde::Deserialize;
use serde::Serialize;

/// Identity-based address of a cell.
///
/// Rows and columns are addressed by stable id, not by index, so a
/// selection survives reordering without drifting to a different cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    /// The row id.
    pub row_id: String,
    /// The column id.
    pub column_id: String,
}

impl CellCoord {
    /// Creates a new coordinate.
    pub fn new(row_id: impl Into<String>, column_id: impl Into<String>) -> Self {
        Self {
            row_id: row_id.into(),
            column_id: column_id.into(),
        }
    }
}

/// Direction of a selection move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Previous row.
    Up,
    /// Next row.
    Down,
    /// Previous column in display order.
    Left,
    /// Next column in display order.
    Right,
}
