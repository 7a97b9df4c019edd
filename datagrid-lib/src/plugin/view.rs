//! Declarative cell view descriptions
//!
//! Plugins do not paint pixels; they describe what a cell shows and the
//! host rendering layer maps the description onto its own widget tree.
//! The engine never inspects what the host builds from a description.

use serde::Serialize;

use crate::model::types::AttachmentItem;
use crate::model::types::DateRange;
use crate::model::types::ImageItem;
use crate::model::types::SelectColor;
use crate::model::types::SelectOption;

/// A colored badge, used by select/multi-select renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeView {
    /// Badge label.
    pub label: String,
    /// Badge color from the palette.
    pub color: SelectColor,
}

/// What a cell shows in read mode, or the control shown in edit mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CellView {
    /// Nothing to show.
    Empty,
    /// Plain text.
    Text { content: String },
    /// Neutral fallback for unresolvable column types.
    Placeholder { type_key: String },
    /// Single-line text input (editor).
    TextInput { value: String },
    /// Numeric input (editor).
    NumberInput {
        value: Option<f64>,
        unit: Option<String>,
    },
    /// Direct-manipulation checkbox.
    Checkbox { checked: bool },
    /// Direct-manipulation star rating.
    Stars { filled: u8, max: u8 },
    /// One or more colored badges.
    Badges { badges: Vec<BadgeView> },
    /// Progress bar with a textual label.
    ProgressBar { percent: f64, label: String },
    /// Clickable link.
    Link { url: String, title: String },
    /// Image thumbnail strip.
    Thumbnails { images: Vec<ImageItem> },
    /// Attachment chip list.
    Attachments { items: Vec<AttachmentItem> },
    /// Reference chip for an external rich text document.
    DocumentRef {
        content_id: i64,
        title: Option<String>,
    },
    /// Date picker (editor).
    DatePicker {
        value: DateRange,
        show_time: bool,
        is_range: bool,
    },
    /// Option picker (editor) for select/multi-select.
    OptionPicker {
        options: Vec<SelectOption>,
        selected: Vec<String>,
        multiple: bool,
    },
}
