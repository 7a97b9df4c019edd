//! Select option types

use serde::Deserialize;
use serde::Serialize;

/// The enumerated color palette for select/multi-select option badges.
///
/// Colors are stored by name so serialized documents stay stable across
/// theme changes; the host maps each name to concrete light/dark swatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectColor {
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    Pink,
    Gray,
}

impl SelectColor {
    /// All palette colors, in display order.
    pub const ALL: [SelectColor; 8] = [
        SelectColor::Blue,
        SelectColor::Green,
        SelectColor::Yellow,
        SelectColor::Orange,
        SelectColor::Red,
        SelectColor::Purple,
        SelectColor::Pink,
        SelectColor::Gray,
    ];
}

impl Default for SelectColor {
    fn default() -> Self {
        SelectColor::Gray
    }
}

/// A single choice in a select or multi-select column.
///
/// Cells store the option `id`; the name and color live in the column
/// config, so renaming or recoloring an option never touches row data.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::types::{SelectColor, SelectOption};
///
/// let opt = SelectOption::new("opt-1", "In progress", SelectColor::Blue);
/// assert_eq!(opt.id, "opt-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stable identifier referenced by cell values.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Badge color, drawn from the enumerated palette.
    #[serde(default)]
    pub color: SelectColor,
}

impl SelectOption {
    /// Creates a new select option.
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: SelectColor) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
        }
    }
}
