//! Plugin error types

/// Error type for plugin lifecycle hooks and cleanup work.
///
/// Hook failures are isolated by the registry: a failing plugin is logged
/// and the remaining plugins still run. Cleanup failures never block the
/// structural change that triggered them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PluginError {
    /// A lifecycle hook (`on_mount`/`on_unmount`) failed.
    #[error("plugin `{plugin}` lifecycle hook failed: {reason}")]
    Lifecycle { plugin: String, reason: String },

    /// Releasing an externally held resource failed.
    #[error("cleanup of `{resource}` failed: {reason}")]
    Cleanup { resource: String, reason: String },

    /// An injected external collaborator reported a failure.
    #[error("external service error: {0}")]
    External(String),
}

impl PluginError {
    /// Creates a lifecycle hook error.
    pub fn lifecycle(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Lifecycle {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }

    /// Creates a cleanup error for a named resource.
    pub fn cleanup(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Cleanup {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Creates an external service error.
    pub fn external(reason: impl Into<String>) -> Self {
        Self::External(reason.into())
    }
}
