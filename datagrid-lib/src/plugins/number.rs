//! Number column plugin

use std::cmp::Ordering;

use async_trait::async_trait;

use super::text::format_number;
use crate::model::CellValue;
use crate::model::ColumnConfig;
use crate::plugin::CellPlugin;
use crate::plugin::CellView;
use crate::plugin::EditorContext;
use crate::plugin::RenderContext;

fn coerce(value: CellValue) -> CellValue {
    match value {
        CellValue::Number(n) => CellValue::Number(n),
        CellValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Null,
        },
        _ => CellValue::Null,
    }
}

/// Numeric cells with optional fixed precision and unit suffix.
#[derive(Debug, Default)]
pub struct NumberPlugin;

#[async_trait]
impl CellPlugin for NumberPlugin {
    fn type_key(&self) -> &'static str {
        "number"
    }

    fn name(&self) -> &'static str {
        "Number"
    }

    fn icon(&self) -> Option<&'static str> {
        Some("hash")
    }

    fn render(&self, ctx: &RenderContext<'_>) -> CellView {
        let Some(n) = ctx.value.as_number() else {
            return CellView::Empty;
        };
        let config = ctx.config().and_then(ColumnConfig::as_number);
        let mut content = match config.and_then(|c| c.precision) {
            Some(precision) => format!("{n:.prec$}", prec = precision as usize),
            None => format_number(n),
        };
        if let Some(unit) = config.and_then(|c| c.unit.as_deref()) {
            content.push(' ');
            content.push_str(unit);
        }
        CellView::Text { content }
    }

    fn edit(&self, ctx: &EditorContext<'_>) -> Option<CellView> {
        Some(CellView::NumberInput {
            value: ctx.value.as_number(),
            unit: ctx
                .config()
                .and_then(ColumnConfig::as_number)
                .and_then(|c| c.unit.clone()),
        })
    }

    fn before_save(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn after_load(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn compare(&self, a: &CellValue, b: &CellValue, _config: Option<&ColumnConfig>) -> Ordering {
        let a = a.as_number().unwrap_or(f64::NAN);
        let b = b.as_number().unwrap_or(f64::NAN);
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    }
}
