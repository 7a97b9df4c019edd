//! Select column plugin
//!
//! Cells store the chosen option's id as text; names and colors live in
//! the column config. An editor that introduces a new option routes the
//! config change through the host's column-change path.

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::model::types::SelectColor;
use crate::model::CellValue;
use crate::model::ColumnConfig;
use crate::plugin::BadgeView;
use crate::plugin::CellPlugin;
use crate::plugin::CellView;
use crate::plugin::EditorContext;
use crate::plugin::RenderContext;

fn coerce(value: CellValue) -> CellValue {
    match value {
        CellValue::Text(id) if !id.is_empty() => CellValue::Text(id),
        // Legacy multi-value payloads collapse to their first entry.
        CellValue::Tags(ids) => match ids.into_iter().next() {
            Some(id) if !id.is_empty() => CellValue::Text(id),
            _ => CellValue::Null,
        },
        _ => CellValue::Null,
    }
}

pub(crate) fn option_label(config: Option<&ColumnConfig>, id: &str) -> (String, SelectColor) {
    config
        .and_then(ColumnConfig::as_select)
        .and_then(|c| c.option(id))
        .map(|o| (o.name.clone(), o.color))
        .unwrap_or_else(|| (id.to_string(), SelectColor::Gray))
}

/// Single-choice cells rendered as a colored badge.
#[derive(Debug, Default)]
pub struct SelectPlugin;

#[async_trait]
impl CellPlugin for SelectPlugin {
    fn type_key(&self) -> &'static str {
        "select"
    }

    fn name(&self) -> &'static str {
        "Select"
    }

    fn icon(&self) -> Option<&'static str> {
        Some("chevron-down")
    }

    fn render(&self, ctx: &RenderContext<'_>) -> CellView {
        match ctx.value.as_text() {
            Some(id) if !id.is_empty() => {
                let (label, color) = option_label(ctx.config(), id);
                CellView::Badges {
                    badges: vec![BadgeView { label, color }],
                }
            }
            _ => CellView::Empty,
        }
    }

    fn edit(&self, ctx: &EditorContext<'_>) -> Option<CellView> {
        let options = ctx
            .config()
            .and_then(ColumnConfig::as_select)
            .map(|c| c.options.clone())
            .unwrap_or_default();
        let selected = ctx
            .value
            .as_text()
            .filter(|id| !id.is_empty())
            .map(|id| vec![id.to_string()])
            .unwrap_or_default();
        Some(CellView::OptionPicker {
            options,
            selected,
            multiple: false,
        })
    }

    fn before_save(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn after_load(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn compare(&self, a: &CellValue, b: &CellValue, config: Option<&ColumnConfig>) -> Ordering {
        let label = |v: &CellValue| {
            v.as_text()
                .map(|id| option_label(config, id).0)
                .unwrap_or_default()
        };
        label(a).cmp(&label(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::SelectOption;
    use crate::model::SelectConfig;

    #[test]
    fn test_round_trip_law() {
        let plugin = SelectPlugin;
        for v in [
            CellValue::from("opt-1"),
            CellValue::Tags(vec!["opt-2".into(), "opt-3".into()]),
            CellValue::Null,
        ] {
            let loaded_saved = plugin.after_load(plugin.before_save(v.clone(), None), None);
            let loaded = plugin.after_load(v, None);
            assert_eq!(loaded_saved, loaded);
        }
    }

    #[test]
    fn test_render_resolves_option_from_config() {
        let config = ColumnConfig::Select(SelectConfig {
            options: vec![SelectOption::new("opt-1", "Done", SelectColor::Green)],
        });
        let column = crate::model::ColumnDef::new("c1", "Status", "select").with_config(config);
        let value = CellValue::from("opt-1");
        let view = SelectPlugin.render(&RenderContext {
            value: &value,
            column: &column,
            theme: crate::plugin::Theme::Light,
            readonly: false,
        });
        assert_eq!(
            view,
            CellView::Badges {
                badges: vec![BadgeView {
                    label: "Done".into(),
                    color: SelectColor::Green
                }]
            }
        );
    }
}
