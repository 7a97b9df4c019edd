//! Date column plugin
//!
//! Every saved value converges on the unified [`DateRange`] format.
//! Legacy bare timestamps migrate to single-date ranges on load, and
//! single-date columns keep `end == start` on save.

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::model::types::DateRange;
use crate::model::CellValue;
use crate::model::ColumnConfig;
use crate::model::DateField;
use crate::plugin::CellPlugin;
use crate::plugin::CellView;
use crate::plugin::EditorContext;
use crate::plugin::RenderContext;

fn format_timestamp(ts: i64, show_time: bool) -> String {
    match chrono::DateTime::from_timestamp_millis(ts) {
        Some(dt) if show_time => dt.format("%Y-%m-%d %H:%M").to_string(),
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// Date and date-range cells.
#[derive(Debug, Default)]
pub struct DatePlugin;

#[async_trait]
impl CellPlugin for DatePlugin {
    fn type_key(&self) -> &'static str {
        "date"
    }

    fn name(&self) -> &'static str {
        "Date"
    }

    fn icon(&self) -> Option<&'static str> {
        Some("calendar")
    }

    fn render(&self, ctx: &RenderContext<'_>) -> CellView {
        let CellValue::Date(range) = ctx.value else {
            return CellView::Empty;
        };
        if range.is_empty() {
            return CellView::Empty;
        }
        let config = ctx.config().and_then(ColumnConfig::as_date);
        let show_time = config.is_some_and(|c| c.show_time);
        let content = match (range.start, range.end) {
            (Some(start), Some(end)) if end != start => format!(
                "{} → {}",
                format_timestamp(start, show_time),
                format_timestamp(end, show_time)
            ),
            (Some(start), _) => format_timestamp(start, show_time),
            (None, Some(end)) => format_timestamp(end, show_time),
            (None, None) => String::new(),
        };
        CellView::Text { content }
    }

    fn edit(&self, ctx: &EditorContext<'_>) -> Option<CellView> {
        let config = ctx.config().and_then(ColumnConfig::as_date);
        let value = match ctx.value {
            CellValue::Date(range) => *range,
            _ => DateRange::empty(),
        };
        Some(CellView::DatePicker {
            value,
            show_time: config.is_some_and(|c| c.show_time),
            is_range: config.is_some_and(|c| c.is_range),
        })
    }

    fn before_save(&self, value: CellValue, config: Option<&ColumnConfig>) -> CellValue {
        let is_range = config
            .and_then(ColumnConfig::as_date)
            .is_some_and(|c| c.is_range);
        match value {
            CellValue::Date(range) => {
                // Single-date columns pin the end to the start.
                if !is_range && range.start.is_some() {
                    CellValue::Date(DateRange::range(range.start, range.start))
                } else {
                    CellValue::Date(range)
                }
            }
            CellValue::Number(n) => CellValue::Date(DateRange::single(n as i64)),
            _ => CellValue::Date(DateRange::empty()),
        }
    }

    fn after_load(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        match value {
            CellValue::Date(range) => CellValue::Date(range),
            // Legacy bare timestamps.
            CellValue::Number(n) => CellValue::Date(DateRange::single(n as i64)),
            _ => CellValue::Date(DateRange::empty()),
        }
    }

    fn compare(&self, a: &CellValue, b: &CellValue, config: Option<&ColumnConfig>) -> Ordering {
        let field = config
            .and_then(ColumnConfig::as_date)
            .map(|c| c.sort_field)
            .unwrap_or_default();
        let pick = |v: &CellValue| match v {
            CellValue::Date(range) => match field {
                DateField::Start => range.start,
                DateField::End => range.end,
            },
            _ => None,
        };
        // Unset timestamps sort last.
        match (pick(a), pick(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
