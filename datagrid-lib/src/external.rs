//! Injected external collaborators
//!
//! The engine never implements uploads, document storage or filesystem
//! access itself. Hosts inject these capabilities; built-in plugins are
//! their only consumers, and the store and registry core never touch them.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::error::PluginError;

/// Uploads files to external storage and removes stored resources.
#[async_trait]
pub trait ResourceUploader: Send + Sync {
    /// Uploads a file, returning its resource URL, or `None` when the
    /// backend declined the file (e.g. unsupported type).
    async fn upload(&self, path: &Path) -> Result<Option<Url>, PluginError>;

    /// Removes a previously uploaded resource.
    async fn remove(&self, url: &str) -> Result<(), PluginError>;
}

/// Manages externally stored rich text documents by reference count.
#[async_trait]
pub trait ContentRefStore: Send + Sync {
    /// Creates a new document, returning its content id.
    async fn create(&self, title: &str) -> Result<i64, PluginError>;

    /// Deletes a document outright.
    async fn delete(&self, content_id: i64) -> Result<(), PluginError>;

    /// Increments a shared document's reference count.
    async fn increment_ref(&self, content_id: i64) -> Result<(), PluginError>;

    /// Decrements a shared document's reference count, releasing it when
    /// the count reaches zero.
    async fn decrement_ref(&self, content_id: i64) -> Result<(), PluginError>;
}

/// Host filesystem commands consumed by attachment-style plugins.
#[async_trait]
pub trait FileSystemAccess: Send + Sync {
    /// Opens the host's file picker, returning the chosen path if any.
    async fn select_file(&self) -> Result<Option<PathBuf>, PluginError>;

    /// Reads a file's contents.
    async fn read_binary(&self, path: &Path) -> Result<Vec<u8>, PluginError>;

    /// Reveals a path in the host's file manager.
    async fn reveal_in_folder(&self, path: &Path) -> Result<(), PluginError>;
}

/// Bundle of optional external collaborators handed to the built-in
/// plugin set. Absent services degrade the affected plugins to
/// log-and-skip behavior; nothing in the engine requires them.
#[derive(Clone, Default)]
pub struct ExternalServices {
    /// File/image upload transport.
    pub uploader: Option<Arc<dyn ResourceUploader>>,
    /// Rich text document commands.
    pub content_refs: Option<Arc<dyn ContentRefStore>>,
    /// Filesystem commands.
    pub filesystem: Option<Arc<dyn FileSystemAccess>>,
}

impl ExternalServices {
    /// Creates an empty bundle with no collaborators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the upload transport.
    pub fn with_uploader(mut self, uploader: Arc<dyn ResourceUploader>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// Sets the document command backend.
    pub fn with_content_refs(mut self, content_refs: Arc<dyn ContentRefStore>) -> Self {
        self.content_refs = Some(content_refs);
        self
    }

    /// Sets the filesystem backend.
    pub fn with_filesystem(mut self, filesystem: Arc<dyn FileSystemAccess>) -> Self {
        self.filesystem = Some(filesystem);
        self
    }
}

impl std::fmt::Debug for ExternalServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalServices")
            .field("uploader", &self.uploader.is_some())
            .field("content_refs", &self.content_refs.is_some())
            .field("filesystem", &self.filesystem.is_some())
            .finish()
    }
}
