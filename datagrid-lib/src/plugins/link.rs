//! Link column plugin

use std::cmp::Ordering;

use async_trait::async_trait;
use url::Url;

use crate::model::types::LinkValue;
use crate::model::CellValue;
use crate::model::ColumnConfig;
use crate::plugin::CellPlugin;
use crate::plugin::CellView;
use crate::plugin::EditorContext;
use crate::plugin::RenderContext;

/// Normalizes a URL string, prepending `https://` for scheme-less input.
/// Unparseable input is kept verbatim. Idempotent.
fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        Ok(url) => url.to_string(),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            match Url::parse(&format!("https://{trimmed}")) {
                Ok(url) => url.to_string(),
                Err(_) => trimmed.to_string(),
            }
        }
        Err(_) => trimmed.to_string(),
    }
}

fn coerce(value: CellValue) -> CellValue {
    match value {
        CellValue::Link(link) => {
            let title = if link.title.is_empty() {
                link.url.clone()
            } else {
                link.title
            };
            CellValue::Link(LinkValue::new(normalize_url(&link.url), title))
        }
        CellValue::Text(raw) if !raw.trim().is_empty() => {
            let title = raw.trim().to_string();
            CellValue::Link(LinkValue::new(normalize_url(&raw), title))
        }
        _ => CellValue::Null,
    }
}

/// URL cells with a display title.
#[derive(Debug, Default)]
pub struct LinkPlugin;

#[async_trait]
impl CellPlugin for LinkPlugin {
    fn type_key(&self) -> &'static str {
        "link"
    }

    fn name(&self) -> &'static str {
        "Link"
    }

    fn icon(&self) -> Option<&'static str> {
        Some("link")
    }

    fn render(&self, ctx: &RenderContext<'_>) -> CellView {
        match ctx.value {
            CellValue::Link(link) => CellView::Link {
                url: link.url.clone(),
                title: link.title.clone(),
            },
            _ => CellView::Empty,
        }
    }

    fn edit(&self, ctx: &EditorContext<'_>) -> Option<CellView> {
        let value = match ctx.value {
            CellValue::Link(link) => link.url.clone(),
            CellValue::Text(raw) => raw.clone(),
            _ => String::new(),
        };
        Some(CellView::TextInput { value })
    }

    fn before_save(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn after_load(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn compare(&self, a: &CellValue, b: &CellValue, _config: Option<&ColumnConfig>) -> Ordering {
        let title = |v: &CellValue| match v {
            CellValue::Link(link) => link.title.clone(),
            _ => String::new(),
        };
        title(a).cmp(&title(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_less_input_gets_https() {
        let saved = LinkPlugin.before_save(CellValue::from("example.com/a"), None);
        let CellValue::Link(link) = saved else {
            panic!("expected a link");
        };
        assert_eq!(link.url, "https://example.com/a");
        assert_eq!(link.title, "example.com/a");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        assert_eq!(normalize_url("https://example.com/a"), "https://example.com/a");
        let once = normalize_url("example.com");
        assert_eq!(normalize_url(&once), once);
    }

    #[test]
    fn test_round_trip_law() {
        let plugin = LinkPlugin;
        for v in [
            CellValue::from("example.com"),
            CellValue::Link(LinkValue::new("https://example.com/", "Example")),
            CellValue::Null,
        ] {
            let loaded_saved = plugin.after_load(plugin.before_save(v.clone(), None), None);
            let loaded = plugin.after_load(v, None);
            assert_eq!(loaded_saved, loaded);
        }
    }

    #[test]
    fn test_empty_title_falls_back_to_url() {
        let saved = LinkPlugin.before_save(
            CellValue::Link(LinkValue::new("https://example.com/", "")),
            None,
        );
        let CellValue::Link(link) = saved else {
            panic!("expected a link");
        };
        assert_eq!(link.title, "https://example.com/");
    }
}
