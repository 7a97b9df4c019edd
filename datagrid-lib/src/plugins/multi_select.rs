//! Multi-select column plugin

use std::cmp::Ordering;

use async_trait::async_trait;

use super::select::option_label;
use crate::model::CellValue;
use crate::model::ColumnConfig;
use crate::plugin::BadgeView;
use crate::plugin::CellPlugin;
use crate::plugin::CellView;
use crate::plugin::EditorContext;
use crate::plugin::RenderContext;

fn coerce(value: CellValue) -> CellValue {
    match value {
        CellValue::Tags(ids) => CellValue::Tags(ids),
        CellValue::Text(id) if !id.is_empty() => CellValue::Tags(vec![id]),
        _ => CellValue::Null,
    }
}

/// Multi-choice cells rendered as a badge list.
#[derive(Debug, Default)]
pub struct MultiSelectPlugin;

#[async_trait]
impl CellPlugin for MultiSelectPlugin {
    fn type_key(&self) -> &'static str {
        "multiSelect"
    }

    fn name(&self) -> &'static str {
        "Multi-select"
    }

    fn icon(&self) -> Option<&'static str> {
        Some("tags")
    }

    fn render(&self, ctx: &RenderContext<'_>) -> CellView {
        let Some(ids) = ctx.value.as_tags() else {
            return CellView::Empty;
        };
        if ids.is_empty() {
            return CellView::Empty;
        }
        let badges = ids
            .iter()
            .map(|id| {
                let (label, color) = option_label(ctx.config(), id);
                BadgeView { label, color }
            })
            .collect();
        CellView::Badges { badges }
    }

    fn edit(&self, ctx: &EditorContext<'_>) -> Option<CellView> {
        let options = ctx
            .config()
            .and_then(ColumnConfig::as_select)
            .map(|c| c.options.clone())
            .unwrap_or_default();
        let selected = ctx.value.as_tags().map(<[String]>::to_vec).unwrap_or_default();
        Some(CellView::OptionPicker {
            options,
            selected,
            multiple: true,
        })
    }

    fn before_save(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn after_load(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn compare(&self, a: &CellValue, b: &CellValue, config: Option<&ColumnConfig>) -> Ordering {
        let joined = |v: &CellValue| {
            v.as_tags()
                .map(|ids| {
                    ids.iter()
                        .map(|id| option_label(config, id).0)
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .unwrap_or_default()
        };
        joined(a).cmp(&joined(b))
    }
}
