//! Attachment column plugin
//!
//! Like the image plugin but for arbitrary files, with host filesystem
//! integration for picking files and revealing them in a file manager.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::PluginError;
use crate::external::FileSystemAccess;
use crate::external::ResourceUploader;
use crate::model::types::AttachmentItem;
use crate::model::CellValue;
use crate::model::ColumnConfig;
use crate::plugin::CellPlugin;
use crate::plugin::CellView;
use crate::plugin::EditorContext;
use crate::plugin::RenderContext;

fn coerce(value: CellValue) -> CellValue {
    match value {
        CellValue::Attachments(items) if !items.is_empty() => CellValue::Attachments(items),
        _ => CellValue::Null,
    }
}

/// Lists of uploaded files with size and MIME metadata.
#[derive(Default)]
pub struct AttachmentPlugin {
    uploader: Option<Arc<dyn ResourceUploader>>,
    filesystem: Option<Arc<dyn FileSystemAccess>>,
}

impl AttachmentPlugin {
    /// Creates the plugin with optional upload and filesystem backends.
    pub fn new(
        uploader: Option<Arc<dyn ResourceUploader>>,
        filesystem: Option<Arc<dyn FileSystemAccess>>,
    ) -> Self {
        Self {
            uploader,
            filesystem,
        }
    }

    /// Opens the host file picker and uploads the chosen file, returning
    /// the item to append, or `None` when the user cancelled or the
    /// backend declined the file.
    pub async fn pick_and_upload(&self) -> Result<Option<AttachmentItem>, PluginError> {
        let Some(filesystem) = &self.filesystem else {
            return Err(PluginError::external("no filesystem backend configured"));
        };
        let Some(path) = filesystem.select_file().await? else {
            return Ok(None);
        };
        self.upload(&path).await
    }

    /// Uploads a file and returns the item to append to the cell, or
    /// `None` when the backend declined the file.
    pub async fn upload(&self, path: &Path) -> Result<Option<AttachmentItem>, PluginError> {
        let Some(uploader) = &self.uploader else {
            return Err(PluginError::external("no upload transport configured"));
        };
        let Some(url) = uploader.upload(path).await? else {
            return Ok(None);
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Some(AttachmentItem::new(
            Uuid::new_v4().to_string(),
            name,
            url,
        )))
    }

    /// Reveals a local path in the host's file manager.
    pub async fn reveal(&self, path: &Path) -> Result<(), PluginError> {
        let Some(filesystem) = &self.filesystem else {
            return Err(PluginError::external("no filesystem backend configured"));
        };
        filesystem.reveal_in_folder(path).await
    }
}

impl std::fmt::Debug for AttachmentPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachmentPlugin")
            .field("uploader", &self.uploader.is_some())
            .field("filesystem", &self.filesystem.is_some())
            .finish()
    }
}

#[async_trait]
impl CellPlugin for AttachmentPlugin {
    fn type_key(&self) -> &'static str {
        "attachment"
    }

    fn name(&self) -> &'static str {
        "Attachment"
    }

    fn icon(&self) -> Option<&'static str> {
        Some("paperclip")
    }

    fn render(&self, ctx: &RenderContext<'_>) -> CellView {
        match ctx.value {
            CellValue::Attachments(items) if !items.is_empty() => CellView::Attachments {
                items: items.clone(),
            },
            _ => CellView::Empty,
        }
    }

    fn edit(&self, ctx: &EditorContext<'_>) -> Option<CellView> {
        let items = match ctx.value {
            CellValue::Attachments(items) => items.clone(),
            _ => Vec::new(),
        };
        Some(CellView::Attachments { items })
    }

    fn before_save(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn after_load(&self, value: CellValue, _config: Option<&ColumnConfig>) -> CellValue {
        coerce(value)
    }

    fn compare(&self, a: &CellValue, b: &CellValue, _config: Option<&ColumnConfig>) -> Ordering {
        let count = |v: &CellValue| match v {
            CellValue::Attachments(items) => items.len(),
            _ => 0,
        };
        count(a).cmp(&count(b))
    }

    fn supports_cleanup(&self) -> bool {
        true
    }

    async fn cleanup_value(&self, value: &CellValue) -> Result<(), PluginError> {
        let CellValue::Attachments(items) = value else {
            return Ok(());
        };
        let Some(uploader) = &self.uploader else {
            log::debug!(
                "no upload transport configured, leaving {} attachment(s) in place",
                items.len()
            );
            return Ok(());
        };
        let removals = items.iter().map(|item| uploader.remove(&item.url));
        let mut failed = Vec::new();
        for (item, result) in items.iter().zip(futures::future::join_all(removals).await) {
            if let Err(e) = result {
                log::warn!("failed to remove attachment `{}`: {e}", item.url);
                failed.push(item.name.clone());
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
