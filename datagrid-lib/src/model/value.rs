//! Cell value union

use serde::Deserialize;
use serde::Serialize;

use super::types::AttachmentItem;
use super::types::DateRange;
use super::types::ImageItem;
use super::types::LinkValue;
use super::types::ProgressValue;
use super::types::RichTextRef;

/// A dynamic cell value.
///
/// The store treats values as opaque; structural identity is defined by
/// `PartialEq` and serialization shape. Column plugins own the meaning of
/// each variant and normalize between variants in their
/// `before_save`/`after_load` hooks.
///
/// Deserialization is untagged, so variant order matters: `Tags` sits
/// before the struct variants (a JSON string array must never match a
/// struct's positional form), every payload struct rejects unknown fields,
/// and `Custom` stays last as the catch-all.
///
/// # Variant mapping
///
/// | Column type | Canonical variant |
/// |-------------|-------------------|
/// | text | `Text` |
/// | number, rating | `Number` |
/// | checkbox | `Bool` |
/// | select | `Text` (option id) |
/// | multiSelect | `Tags` (option ids) |
/// | date | `Date` |
/// | progress | `Progress` |
/// | link | `Link` |
/// | image | `Images` |
/// | attachment | `Attachments` |
/// | richText | `RichTextRef` |
///
/// # Example
///
/// ```
/// use datagrid_lib::model::CellValue;
///
/// let title = CellValue::from("hello");
/// let count = CellValue::from(5.0);
/// assert!(CellValue::Null.is_null());
/// assert_eq!(count.as_number(), Some(5.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Null/empty value.
    Null,
    /// Boolean value (checkbox).
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text value (also select option ids).
    Text(String),
    /// Multi-select option ids.
    Tags(Vec<String>),
    /// Date or date range.
    Date(DateRange),
    /// Progress toward a target.
    Progress(ProgressValue),
    /// URL with display title.
    Link(LinkValue),
    /// Image list.
    Images(Vec<ImageItem>),
    /// Attachment list.
    Attachments(Vec<AttachmentItem>),
    /// Reference to an external rich text document.
    RichTextRef(RichTextRef),
    /// Opaque payload for external plugins.
    Custom(serde_json::Value),
}

impl CellValue {
    /// Returns `true` for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns `true` for values a `required` rule treats as absent:
    /// `Null`, empty text, and empty lists.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Tags(tags) => tags.is_empty(),
            CellValue::Images(items) => items.is_empty(),
            CellValue::Attachments(items) => items.is_empty(),
            CellValue::Date(range) => range.is_empty(),
            _ => false,
        }
    }

    /// Returns the text content, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content, if this is a `Number` value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean content, if this is a `Bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the tag list, if this is a `Tags` value.
    pub fn as_tags(&self) -> Option<&[String]> {
        match self {
            CellValue::Tags(tags) => Some(tags),
            _ => None,
        }
    }

    /// A short name for the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "text",
            CellValue::Date(_) => "date",
            CellValue::Progress(_) => "progress",
            CellValue::Link(_) => "link",
            CellValue::Images(_) => "images",
            CellValue::Attachments(_) => "attachments",
            CellValue::RichTextRef(_) => "richTextRef",
            CellValue::Tags(_) => "tags",
            CellValue::Custom(_) => "custom",
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<DateRange> for CellValue {
    fn from(range: DateRange) -> Self {
        CellValue::Date(range)
    }
}

impl From<ProgressValue> for CellValue {
    fn from(progress: ProgressValue) -> Self {
        CellValue::Progress(progress)
    }
}

impl From<LinkValue> for CellValue {
    fn from(link: LinkValue) -> Self {
        CellValue::Link(link)
    }
}

impl From<RichTextRef> for CellValue {
    fn from(r: RichTextRef) -> Self {
        CellValue::RichTextRef(r)
    }
}

impl From<Vec<String>> for CellValue {
    fn from(tags: Vec<String>) -> Self {
        CellValue::Tags(tags)
    }
}

impl From<Vec<ImageItem>> for CellValue {
    fn from(items: Vec<ImageItem>) -> Self {
        CellValue::Images(items)
    }
}

impl From<Vec<AttachmentItem>> for CellValue {
    fn from(items: Vec<AttachmentItem>) -> Self {
        CellValue::Attachments(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_classification() {
        assert!(CellValue::Null.is_empty());
        assert!(CellValue::Text(String::new()).is_empty());
        assert!(CellValue::Tags(vec![]).is_empty());
        assert!(!CellValue::Bool(false).is_empty());
        assert!(!CellValue::Text("x".into()).is_empty());
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(serde_json::to_string(&CellValue::Null).unwrap(), "null");
        assert_eq!(serde_json::to_string(&CellValue::from(5.0)).unwrap(), "5.0");
        assert_eq!(
            serde_json::to_string(&CellValue::from("hi")).unwrap(),
            "\"hi\""
        );
    }

    #[test]
    fn test_deserialize_date_range() {
        let json = r#"{"start": 1700000000000, "end": null}"#;
        let value: CellValue = serde_json::from_str(json).unwrap();
        assert_eq!(
            value,
            CellValue::Date(DateRange::range(Some(1_700_000_000_000), None))
        );
    }

    #[test]
    fn test_deserialize_tags() {
        let json = r#"["a", "b"]"#;
        let value: CellValue = serde_json::from_str(json).unwrap();
        assert_eq!(value.as_tags(), Some(&["a".to_string(), "b".to_string()][..]));
    }

    fn round_trip(value: CellValue) -> CellValue {
        let json = serde_json::to_string(&value).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_round_trip_keeps_variant() {
        let values = vec![
            CellValue::Progress(ProgressValue::new(30.0, 100.0)),
            CellValue::Link(LinkValue::new("https://example.com", "Example")),
            CellValue::RichTextRef(RichTextRef::new(7).with_title("Notes")),
            CellValue::RichTextRef(RichTextRef::new(8)),
            CellValue::Date(DateRange::single(1_700_000_000_000)),
            CellValue::Date(DateRange::empty()),
            CellValue::Tags(vec!["a".into(), "b".into()]),
            CellValue::Images(vec![ImageItem::new("img-1", "res://1")]),
            CellValue::Attachments(vec![AttachmentItem::new("att-1", "a.pdf", "res://2")]),
        ];
        for value in values {
            assert_eq!(round_trip(value.clone()), value, "variant changed shape");
        }
    }

    #[test]
    fn test_foreign_object_falls_through_to_custom() {
        let json = r#"{"foo": 1, "bar": "x"}"#;
        let value: CellValue = serde_json::from_str(json).unwrap();
        assert!(matches!(value, CellValue::Custom(_)));
    }
}
