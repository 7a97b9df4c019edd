//! Star rating column plugin
//!
//! Direct-manipulation: the host writes the clicked star count through
//! `apply_direct`, no edit mode.

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::model::CellValue;
use crate::model::ColumnConfig;
use crate::model::RatingConfig;
use crate::plugin::CellPlugin;
use crate::plugin::CellView;
use crate::plugin::RenderContext;

fn max_stars(config: Option<&ColumnConfig>) -> u8 {
    config
        .and_then(ColumnConfig::as_rating)
        .map(|c| c.max)
        .unwrap_or(RatingConfig::default().max)
}

fn coerce(value: CellValue, config: Option<&ColumnConfig>) -> CellValue {
    match value {
        CellValue::Number(n) if n.is_finite() => {
            let max = f64::from(max_stars(config));
            CellValue::Number(n.round().clamp(0.0, max))
        }
        _ => CellValue::Null,
    }
}

/// Integral star-count cells.
#[derive(Debug, Default)]
pub struct RatingPlugin;

#[async_trait]
impl CellPlugin for RatingPlugin {
    fn type_key(&self) -> &'static str {
        "rating"
    }

    fn name(&self) -> &'static str {
        "Rating"
    }

    fn icon(&self) -> Option<&'static str> {
        Some("star")
    }

    fn editable(&self) -> bool {
        false
    }

    fn render(&self, ctx: &RenderContext<'_>) -> CellView {
        let max = max_stars(ctx.config());
        let filled = ctx.value.as_number().unwrap_or(0.0).clamp(0.0, f64::from(max)) as u8;
        CellView::Stars { filled, max }
    }

    fn before_save(&self, value: CellValue, config: Option<&ColumnConfig>) -> CellValue {
        coerce(value, config)
    }

    fn after_load(&self, value: CellValue, config: Option<&ColumnConfig>) -> CellValue {
        coerce(value, config)
    }

    fn compare(&self, a: &CellValue, b: &CellValue, _config: Option<&ColumnConfig>) -> Ordering {
        let a = a.as_number().unwrap_or(0.0);
        let b = b.as_number().unwrap_or(0.0);
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    }
}
