//! Column deletion cleanup: best-effort release of externally held
//! resources through the plugin registry, and the plugin mount/unmount
//! lifecycle around it.

use std::path::Path;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use datagrid_lib::error::PluginError;
use datagrid_lib::external::ExternalServices;
use datagrid_lib::external::ResourceUploader;
use datagrid_lib::model::types::ImageItem;
use datagrid_lib::model::types::RichTextRef;
use datagrid_lib::model::CellValue;
use datagrid_lib::model::ColumnDef;
use datagrid_lib::model::RowData;
use datagrid_lib::TableOptions;

/// Records removals and fails the URLs it is told to fail.
#[derive(Default)]
struct RecordingUploader {
    removed: Mutex<Vec<String>>,
    fail_urls: Vec<String>,
}

impl RecordingUploader {
    fn failing(urls: &[&str]) -> Self {
        Self {
            removed: Mutex::new(Vec::new()),
            fail_urls: urls.iter().map(ToString::to_string).collect(),
        }
    }

    fn removed(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceUploader for RecordingUploader {
    async fn upload(&self, _path: &Path) -> Result<Option<Url>, PluginError> {
        Ok(Some(Url::parse("https://cdn.test/uploaded").unwrap()))
    }

    async fn remove(&self, url: &str) -> Result<(), PluginError> {
        self.removed.lock().unwrap().push(url.to_string());
        if self.fail_urls.iter().any(|u| u == url) {
            return Err(PluginError::external(format!("backend refused {url}")));
        }
        Ok(())
    }
}

/// Counts reference-count decrements.
#[derive(Default)]
struct CountingRefStore {
    decrements: AtomicUsize,
}

#[async_trait]
impl datagrid_lib::external::ContentRefStore for CountingRefStore {
    async fn create(&self, _title: &str) -> Result<i64, PluginError> {
        Ok(1)
    }

    async fn delete(&self, _content_id: i64) -> Result<(), PluginError> {
        Ok(())
    }

    async fn increment_ref(&self, _content_id: i64) -> Result<(), PluginError> {
        Ok(())
    }

    async fn decrement_ref(&self, _content_id: i64) -> Result<(), PluginError> {
        self.decrements.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn image_cell(urls: &[&str]) -> CellValue {
    CellValue::Images(
        urls.iter()
            .enumerate()
            .map(|(i, url)| ImageItem::new(format!("img-{i}"), *url))
            .collect(),
    )
}

// =============================================================================
// Cleanup fan-out
// =============================================================================

#[tokio::test]
async fn test_deleting_image_column_releases_every_resource() {
    let uploader = Arc::new(RecordingUploader::default());
    let mut table = TableOptions::new()
        .columns(vec![ColumnDef::new("pics", "Pictures", "image")])
        .rows(vec![
            RowData::new("r1").set("pics", image_cell(&["https://cdn.test/a"])),
            RowData::new("r2").set(
                "pics",
                image_cell(&["https://cdn.test/b", "https://cdn.test/c"]),
            ),
            RowData::new("r3"),
        ])
        .services(ExternalServices::new().with_uploader(Arc::clone(&uploader) as _))
        .build();

    table.delete_column("pics").await;

    let mut removed = uploader.removed();
    removed.sort();
    assert_eq!(
        removed,
        vec!["https://cdn.test/a", "https://cdn.test/b", "https://cdn.test/c"]
    );
    assert!(table.store().state().column("pics").is_none());
}

#[tokio::test]
async fn test_cleanup_failures_never_block_the_delete() {
    let uploader = Arc::new(RecordingUploader::failing(&["https://cdn.test/b"]));
    let mut table = TableOptions::new()
        .columns(vec![ColumnDef::new("pics", "Pictures", "image")])
        .rows(vec![
            RowData::new("r1").set("pics", image_cell(&["https://cdn.test/a"])),
            RowData::new("r2").set("pics", image_cell(&["https://cdn.test/b"])),
            RowData::new("r3").set("pics", image_cell(&["https://cdn.test/c"])),
        ])
        .services(ExternalServices::new().with_uploader(Arc::clone(&uploader) as _))
        .build();

    table.delete_column("pics").await;

    // Every release was attempted despite the failure in the middle.
    assert_eq!(uploader.removed().len(), 3);
    assert!(table.store().state().column("pics").is_none());
    assert!(!table
        .store()
        .state()
        .rows
        .iter()
        .any(|r| r.cells.contains_key("pics")));
}

#[tokio::test]
async fn test_rich_text_cleanup_decrements_references() {
    let refs = Arc::new(CountingRefStore::default());
    let mut table = TableOptions::new()
        .columns(vec![ColumnDef::new("notes", "Notes", "richText")])
        .rows(vec![
            RowData::new("r1")
                .set("notes", CellValue::RichTextRef(RichTextRef::new(11))),
            RowData::new("r2")
                .set("notes", CellValue::RichTextRef(RichTextRef::new(12))),
            RowData::new("r3"),
        ])
        .services(ExternalServices::new().with_content_refs(Arc::clone(&refs) as _))
        .build();

    table.delete_column("notes").await;

    assert_eq!(refs.decrements.load(Ordering::SeqCst), 2);
    assert!(table.store().state().column("notes").is_none());
}

#[tokio::test]
async fn test_types_without_cleanup_delete_directly() {
    let uploader = Arc::new(RecordingUploader::default());
    let mut table = TableOptions::new()
        .columns(vec![ColumnDef::new("title", "Title", "text")])
        .rows(vec![RowData::new("r1").set("title", "hi")])
        .services(ExternalServices::new().with_uploader(Arc::clone(&uploader) as _))
        .build();

    table.delete_column("title").await;

    assert!(uploader.removed().is_empty());
    assert!(table.store().state().column("title").is_none());
}

#[tokio::test]
async fn test_stale_column_cleanup_is_a_no_op() {
    let mut table = TableOptions::new()
        .columns(vec![ColumnDef::new("title", "Title", "text")])
        .rows(vec![RowData::new("r1")])
        .build();
    table.delete_column("gone").await;
    assert_eq!(table.store().state().columns.len(), 1);
}

// =============================================================================
// Deletion is undoable, cleanup is not replayed
// =============================================================================

#[tokio::test]
async fn test_undo_restores_column_data_after_cleanup_delete() {
    let uploader = Arc::new(RecordingUploader::default());
    let mut table = TableOptions::new()
        .columns(vec![ColumnDef::new("pics", "Pictures", "image")])
        .rows(vec![
            RowData::new("r1").set("pics", image_cell(&["https://cdn.test/a"]))
        ])
        .services(ExternalServices::new().with_uploader(Arc::clone(&uploader) as _))
        .build();

    table.delete_column("pics").await;
    assert!(table.undo());

    // The grid data is back even though the external resource is gone;
    // re-releasing it is the host's concern, not the history's.
    assert!(table.store().state().column("pics").is_some());
    assert_eq!(
        table.store().state().row("r1").unwrap().cell("pics"),
        &image_cell(&["https://cdn.test/a"])
    );
    assert_eq!(uploader.removed().len(), 1);
}
