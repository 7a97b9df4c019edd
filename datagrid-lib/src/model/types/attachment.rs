//! Attachment list item type

use serde::Deserialize;
use serde::Serialize;

/// One attachment in an attachment cell's list.
///
/// `size` and `mime` are always serialized (as `null` when unknown) so a
/// stored attachment never deserializes as an [`ImageItem`] shape.
///
/// [`ImageItem`]: super::ImageItem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttachmentItem {
    /// Stable identifier within the cell.
    pub id: String,
    /// Display file name.
    pub name: String,
    /// Resource URL of the stored file.
    pub url: String,
    /// File size in bytes, if known.
    #[serde(default)]
    pub size: Option<u64>,
    /// MIME type, if known.
    #[serde(default)]
    pub mime: Option<String>,
}

impl AttachmentItem {
    /// Creates a new attachment item.
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            size: None,
            mime: None,
        }
    }

    /// Sets the file size in bytes.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the MIME type.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}
