//! Image list item type

use serde::Deserialize;
use serde::Serialize;

/// One image in an image cell's list.
///
/// The `url` points at an externally stored resource; deleting an image
/// column releases each referenced resource through the image plugin's
/// cleanup hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageItem {
    /// Stable identifier within the cell.
    pub id: String,
    /// Resource URL of the stored image.
    pub url: String,
    /// Original file name, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ImageItem {
    /// Creates a new image item.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            name: None,
        }
    }

    /// Sets the original file name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
