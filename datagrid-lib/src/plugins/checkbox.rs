//! Checkbox column plugin
//!
//! A direct-manipulation type: there is no edit mode. The host toggles
//! the rendered checkbox through
//! [`EditController::apply_direct`](crate::controller::EditController::apply_direct).

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::model::CellValue;
use crate::model::ColumnConfig;
use crate::plugin::CellPlugin;
use crate::plugin::CellView;
use crate::plugin::RenderContext;

fn coerce(value: CellValue) -> CellValue {
    match value {
        CellValue::Bool(b) => CellValue::Bool(b),
        _ => CellValue::Bool(false),
    }
}

/// Boolean cells toggled in place.
#[derive(Debug, Default)]
pub struct CheckboxPlugin;

#[async_trait]
impl CellPlugin for CheckboxPlugin {
    fn type_key(&self) -> &'static str {
        "checkbox"
    }

    fn name(&self) -> &'static str {
        "Checkbox"
    }

    fn icon(&self) -> Option<&'static str> {
        Some("check-square")
    }

    fn editable(&self) -> bool {
        false
    }

    fn render(&self, ctx: &RenderContext<'_>) -> CellView {
        CellView::Checkbox {
            checked: ctx.value.as_bool().unwrap_or(false),
        }
    }

    fn before_save(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn after_load(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn compare(&self, a: &CellValue, b: &CellValue, _config: Option<&ColumnConfig>) -> Ordering {
        a.as_bool().unwrap_or(false).cmp(&b.as_bool().unwrap_or(false))
    }
}
