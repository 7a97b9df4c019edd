//! Text column plugin

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::model::CellValue;
use crate::model::ColumnConfig;
use crate::plugin::CellPlugin;
use crate::plugin::CellView;
use crate::plugin::EditorContext;
use crate::plugin::RenderContext;

/// Formats a number without a trailing `.0` for whole values.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn coerce(value: CellValue) -> CellValue {
    match value {
        CellValue::Text(s) => CellValue::Text(s),
        CellValue::Number(n) => CellValue::Text(format_number(n)),
        CellValue::Bool(b) => CellValue::Text(b.to_string()),
        CellValue::Null => CellValue::Null,
        _ => CellValue::Null,
    }
}

/// Plain text cells.
#[derive(Debug, Default)]
pub struct TextPlugin;

#[async_trait]
impl CellPlugin for TextPlugin {
    fn type_key(&self) -> &'static str {
        "text"
    }

    fn name(&self) -> &'static str {
        "Text"
    }

    fn icon(&self) -> Option<&'static str> {
        Some("text")
    }

    fn render(&self, ctx: &RenderContext<'_>) -> CellView {
        match ctx.value {
            CellValue::Text(s) if !s.is_empty() => CellView::Text { content: s.clone() },
            _ => CellView::Empty,
        }
    }

    fn edit(&self, ctx: &EditorContext<'_>) -> Option<CellView> {
        Some(CellView::TextInput {
            value: ctx.value.as_text().unwrap_or("").to_string(),
        })
    }

    fn before_save(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn after_load(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn compare(&self, a: &CellValue, b: &CellValue, _config: Option<&ColumnConfig>) -> Ordering {
        a.as_text().unwrap_or("").cmp(b.as_text().unwrap_or(""))
    }
}
