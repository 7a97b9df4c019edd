//! Rich text reference type

use serde::Deserialize;
use serde::Serialize;

/// A reference to a rich text document stored outside the grid.
///
/// The grid never holds document content; cells hold a content id whose
/// reference count is managed through the injected
/// [`ContentRefStore`](crate::external::ContentRefStore). Deleting a rich
/// text column releases each referenced document through the plugin's
/// cleanup hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RichTextRef {
    /// Identifier of the referenced document.
    pub content_id: i64,
    /// Cached display title, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl RichTextRef {
    /// Creates a new reference to a document.
    pub fn new(content_id: i64) -> Self {
        Self {
            content_id,
            title: None,
        }
    }

    /// Sets the cached display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
