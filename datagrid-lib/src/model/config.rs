//! Column configuration types

use serde::Deserialize;
use serde::Serialize;

use super::types::SelectOption;

/// Which end of a date range a comparator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateField {
    /// Compare by the range start.
    #[default]
    Start,
    /// Compare by the range end.
    End,
}

/// Configuration for select and multi-select columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectConfig {
    /// The available options. Cells reference options by id.
    pub options: Vec<SelectOption>,
}

impl SelectConfig {
    /// Looks up an option by id.
    pub fn option(&self, id: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// Configuration for date columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateConfig {
    /// Whether the column displays a time of day.
    #[serde(default)]
    pub show_time: bool,
    /// Whether the column holds a start/end range. When `false`, saving
    /// forces `end == start`.
    #[serde(default)]
    pub is_range: bool,
    /// Which end the column sorts by.
    #[serde(default)]
    pub sort_field: DateField,
}

/// Configuration for number columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberConfig {
    /// Decimal places shown by the renderer, if fixed. Serialized even
    /// when `None` so the document never collapses to an empty object.
    #[serde(default)]
    pub precision: Option<u8>,
    /// Unit suffix shown by the renderer.
    #[serde(default)]
    pub unit: Option<String>,
}

/// Configuration for progress columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgressConfig {
    /// Default target applied when a bare number is saved.
    pub target: f64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self { target: 100.0 }
    }
}

/// Configuration for rating columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatingConfig {
    /// Maximum number of stars.
    pub max: u8,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self { max: 5 }
    }
}

/// Plugin-specific column configuration.
///
/// Owned by the column and mutated only through explicit column edits
/// (`edit_column`), never in place by a plugin editor.
///
/// Deserialization is untagged; each known config struct rejects unknown
/// fields and always serializes a field set the other structs reject, so a
/// serialized config reloads as the variant it was saved as. `Custom`
/// stays last as the catch-all for external plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnConfig {
    /// Select/multi-select option list.
    Select(SelectConfig),
    /// Date column settings.
    Date(DateConfig),
    /// Number column settings.
    Number(NumberConfig),
    /// Progress column settings.
    Progress(ProgressConfig),
    /// Rating column settings.
    Rating(RatingConfig),
    /// Opaque configuration for external plugins.
    Custom(serde_json::Value),
}

impl ColumnConfig {
    /// Returns the select config, if this is one.
    pub fn as_select(&self) -> Option<&SelectConfig> {
        match self {
            ColumnConfig::Select(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the date config, if this is one.
    pub fn as_date(&self) -> Option<&DateConfig> {
        match self {
            ColumnConfig::Date(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the number config, if this is one.
    pub fn as_number(&self) -> Option<&NumberConfig> {
        match self {
            ColumnConfig::Number(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the progress config, if this is one.
    pub fn as_progress(&self) -> Option<&ProgressConfig> {
        match self {
            ColumnConfig::Progress(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the rating config, if this is one.
    pub fn as_rating(&self) -> Option<&RatingConfig> {
        match self {
            ColumnConfig::Rating(c) => Some(c),
            _ => None,
        }
    }
}
