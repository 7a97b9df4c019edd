//! Image column plugin
//!
//! Cells hold lists of uploaded images. Uploads go through the injected
//! [`ResourceUploader`]; deleting an image column releases every stored
//! resource through the cleanup pass.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::PluginError;
use crate::external::ResourceUploader;
use crate::model::types::ImageItem;
use crate::model::CellValue;
use crate::model::ColumnConfig;
use crate::plugin::CellPlugin;
use crate::plugin::CellView;
use crate::plugin::EditorContext;
use crate::plugin::RenderContext;

fn coerce(value: CellValue) -> CellValue {
    match value {
        CellValue::Images(items) if !items.is_empty() => CellValue::Images(items),
        _ => CellValue::Null,
    }
}

/// Lists of uploaded images rendered as thumbnails.
#[derive(Default)]
pub struct ImagePlugin {
    uploader: Option<Arc<dyn ResourceUploader>>,
}

impl ImagePlugin {
    /// Creates the plugin with an optional upload transport. Without one,
    /// uploads fail and stored resources are left in place on cleanup.
    pub fn new(uploader: Option<Arc<dyn ResourceUploader>>) -> Self {
        Self { uploader }
    }

    /// Uploads a file and returns the item to append to the cell, or
    /// `None` when the backend declined the file.
    pub async fn upload(&self, path: &Path) -> Result<Option<ImageItem>, PluginError> {
        let Some(uploader) = &self.uploader else {
            return Err(PluginError::external("no upload transport configured"));
        };
        let Some(url) = uploader.upload(path).await? else {
            return Ok(None);
        };
        let mut item = ImageItem::new(Uuid::new_v4().to_string(), url);
        if let Some(name) = path.file_name() {
            item = item.with_name(name.to_string_lossy());
        }
        Ok(Some(item))
    }
}

impl std::fmt::Debug for ImagePlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePlugin")
            .field("uploader", &self.uploader.is_some())
            .finish()
    }
}

#[async_trait]
impl CellPlugin for ImagePlugin {
    fn type_key(&self) -> &'static str {
        "image"
    }

    fn name(&self) -> &'static str {
        "Image"
    }

    fn icon(&self) -> Option<&'static str> {
        Some("image")
    }

    fn render(&self, ctx: &RenderContext<'_>) -> CellView {
        match ctx.value {
            CellValue::Images(items) if !items.is_empty() => CellView::Thumbnails {
                images: items.clone(),
            },
            _ => CellView::Empty,
        }
    }

    fn edit(&self, ctx: &EditorContext<'_>) -> Option<CellView> {
        let images = match ctx.value {
            CellValue::Images(items) => items.clone(),
            _ => Vec::new(),
        };
        Some(CellView::Thumbnails { images })
    }

    fn before_save(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn after_load(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn compare(&self, a: &CellValue, b: &CellValue, _config: Option<&ColumnConfig>) -> Ordering {
        let count = |v: &CellValue| match v {
            CellValue::Images(items) => items.len(),
            _ => 0,
        };
        count(a).cmp(&count(b))
    }

    fn supports_cleanup(&self) -> bool {
        true
    }

    async fn cleanup_value(&self, value: &CellValue) -> Result<(), PluginError> {
        let CellValue::Images(items) = value else {
            return Ok(());
        };
        let Some(uploader) = &self.uploader else {
            log::debug!(
                "no upload transport configured, leaving {} image(s) in place",
                items.len()
            );
            return Ok(());
        };
        let removals = items.iter().map(|item| uploader.remove(&item.url));
        let mut failed = Vec::new();
        for (item, result) in items.iter().zip(futures::future::join_all(removals).await) {
            if let Err(e) = result {
                log::warn!("failed to remove image `{}`: {e}", item.url);
                failed.push(item.url.clone());
            }
        }
        if failed.is_empty() {
            Ok(())
        } else {
            Err(PluginError::cleanup(
                failed.join(", "),
                "resource removal failed",
            ))
        }
    }
}
