//! Progress column plugin

use std::cmp::Ordering;

use async_trait::async_trait;

use super::text::format_number;
use crate::model::types::ProgressValue;
use crate::model::CellValue;
use crate::model::ColumnConfig;
use crate::model::ProgressConfig;
use crate::plugin::CellPlugin;
use crate::plugin::CellView;
use crate::plugin::EditorContext;
use crate::plugin::RenderContext;

fn default_target(config: Option<&ColumnConfig>) -> f64 {
    config
        .and_then(ColumnConfig::as_progress)
        .map(|c| c.target)
        .unwrap_or(ProgressConfig::default().target)
}

fn coerce(value: CellValue, config: Option<&ColumnConfig>) -> CellValue {
    match value {
        CellValue::Progress(p) => {
            let target = if p.target > 0.0 {
                p.target
            } else {
                default_target(config)
            };
            CellValue::Progress(ProgressValue::new(p.current, target))
        }
        CellValue::Number(n) if n.is_finite() => {
            CellValue::Progress(ProgressValue::new(n, default_target(config)))
        }
        _ => CellValue::Null,
    }
}

/// Current/target pairs rendered as a progress bar.
#[derive(Debug, Default)]
pub struct ProgressPlugin;

#[async_trait]
impl CellPlugin for ProgressPlugin {
    fn type_key(&self) -> &'static str {
        "progress"
    }

    fn name(&self) -> &'static str {
        "Progress"
    }

    fn icon(&self) -> Option<&'static str> {
        Some("activity")
    }

    fn render(&self, ctx: &RenderContext<'_>) -> CellView {
        let CellValue::Progress(p) = ctx.value else {
            return CellView::Empty;
        };
        CellView::ProgressBar {
            percent: p.percent(),
            label: format!("{} / {}", format_number(p.current), format_number(p.target)),
        }
    }

    fn edit(&self, ctx: &EditorContext<'_>) -> Option<CellView> {
        let value = match ctx.value {
            CellValue::Progress(p) => Some(p.current),
            CellValue::Number(n) => Some(*n),
            _ => None,
        };
        Some(CellView::NumberInput { value, unit: None })
    }

    fn before_save(&self, value: CellValue, config: Option<&ColumnConfig>) -> CellValue {
        coerce(value, config)
    }

    fn after_load(&self, value: CellValue, config: Option<&ColumnConfig>) -> CellValue {
        coerce(value, config)
    }

    fn compare(&self, a: &CellValue, b: &CellValue, _config: Option<&ColumnConfig>) -> Ordering {
        let percent = |v: &CellValue| match v {
            CellValue::Progress(p) => p.percent(),
            _ => 0.0,
        };
        percent(a).partial_cmp(&percent(b)).unwrap_or(Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_number_gains_default_target() {
        assert_eq!(
            ProgressPlugin.before_save(CellValue::from(30.0), None),
            CellValue::Progress(ProgressValue::new(30.0, 100.0))
        );
    }

    #[test]
    fn test_round_trip_law() {
        let plugin = ProgressPlugin;
        for v in [
            CellValue::Progress(ProgressValue::new(3.0, 10.0)),
            CellValue::from(40.0),
            CellValue::Null,
        ] {
            let loaded_saved = plugin.after_load(plugin.before_save(v.clone(), None), None);
            let loaded = plugin.after_load(v, None);
            assert_eq!(loaded_saved, loaded);
        }
    }

    #[test]
    fn test_non_positive_target_normalized() {
        let saved = ProgressPlugin.before_save(
            CellValue::Progress(ProgressValue::new(5.0, 0.0)),
            None,
        );
        assert_eq!(saved, CellValue::Progress(ProgressValue::new(5.0, 100.0)));
    }
}
