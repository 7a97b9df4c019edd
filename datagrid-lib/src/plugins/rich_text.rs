//! Rich text column plugin
//!
//! Cells hold references to documents stored outside the grid. The
//! injected [`ContentRefStore`] tracks how many cells point at each
//! document; cleanup on column deletion decrements those counts instead
//! of deleting documents outright, since other columns may still
//! reference them.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PluginError;
use crate::external::ContentRefStore;
use crate::model::types::RichTextRef;
use crate::model::CellValue;
use crate::model::ColumnConfig;
use crate::plugin::CellPlugin;
use crate::plugin::CellView;
use crate::plugin::RenderContext;

fn coerce(value: CellValue) -> CellValue {
    match value {
        CellValue::RichTextRef(doc) => CellValue::RichTextRef(doc),
        CellValue::Number(n) if n.is_finite() && n >= 0.0 => {
            CellValue::RichTextRef(RichTextRef::new(n as i64))
        }
        _ => CellValue::Null,
    }
}

/// References to externally stored rich text documents.
#[derive(Default)]
pub struct RichTextPlugin {
    content_refs: Option<Arc<dyn ContentRefStore>>,
}

impl RichTextPlugin {
    /// Creates the plugin with an optional document backend. Without
    /// one, documents cannot be created and reference counts are left
    /// untouched on cleanup.
    pub fn new(content_refs: Option<Arc<dyn ContentRefStore>>) -> Self {
        Self { content_refs }
    }

    /// Creates a new document and returns the reference to store.
    pub async fn create_document(&self, title: &str) -> Result<RichTextRef, PluginError> {
        let Some(content_refs) = &self.content_refs else {
            return Err(PluginError::external("no document backend configured"));
        };
        let content_id = content_refs.create(title).await?;
        Ok(RichTextRef::new(content_id).with_title(title))
    }

    /// Records another cell pointing at an existing document, as when a
    /// row holding a reference is duplicated.
    pub async fn retain(&self, doc: &RichTextRef) -> Result<(), PluginError> {
        let Some(content_refs) = &self.content_refs else {
            return Err(PluginError::external("no document backend configured"));
        };
        content_refs.increment_ref(doc.content_id).await
    }
}

impl std::fmt::Debug for RichTextPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RichTextPlugin")
            .field("content_refs", &self.content_refs.is_some())
            .finish()
    }
}

#[async_trait]
impl CellPlugin for RichTextPlugin {
    fn type_key(&self) -> &'static str {
        "richText"
    }

    fn name(&self) -> &'static str {
        "Rich text"
    }

    fn icon(&self) -> Option<&'static str> {
        Some("file-text")
    }

    fn editable(&self) -> bool {
        false
    }

    fn render(&self, ctx: &RenderContext<'_>) -> CellView {
        match ctx.value {
            CellValue::RichTextRef(doc) => CellView::DocumentRef {
                content_id: doc.content_id,
                title: doc.title.clone(),
            },
            _ => CellView::Empty,
        }
    }

    fn before_save(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn after_load(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn compare(&self, a: &CellValue, b: &CellValue, _config: Option<&ColumnConfig>) -> Ordering {
        let title = |v: &CellValue| match v {
            CellValue::RichTextRef(doc) => doc.title.clone().unwrap_or_default(),
            _ => String::new(),
        };
        title(a).cmp(&title(b))
    }

    fn supports_cleanup(&self) -> bool {
        true
    }

    async fn cleanup_value(&self, value: &CellValue) -> Result<(), PluginError> {
        let CellValue::RichTextRef(doc) = value else {
            return Ok(());
        };
        let Some(content_refs) = &self.content_refs else {
            log::debug!(
                "no document backend configured, leaving document {} referenced",
                doc.content_id
            );
            return Ok(());
        };
        content_refs.decrement_ref(doc.content_id).await
    }
}
