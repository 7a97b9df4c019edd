//! Plugin registry

use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use log::warn;

use super::CellPlugin;
use crate::model::CellValue;
use crate::model::ColumnConfig;

/// Maps column type keys to their [`CellPlugin`] implementations.
///
/// Explicitly constructed and owned by the host (or the
/// [`Table`](crate::table::Table) facade); there is no ambient global
/// registry. Registering a type that already exists warns and overwrites;
/// the last registration wins.
///
/// # Example
///
/// ```
/// use datagrid_lib::plugin::PluginRegistry;
/// use datagrid_lib::external::ExternalServices;
///
/// let registry = PluginRegistry::with_builtins(&ExternalServices::default());
/// assert!(registry.has_plugin("text"));
/// assert!(!registry.has_plugin("unknown"));
/// ```
#[derive(Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn CellPlugin>>,
    loaded: HashSet<String>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with the built-in plugin set.
    pub fn with_builtins(services: &crate::external::ExternalServices) -> Self {
        let mut registry = Self::new();
        registry.register_plugins(crate::plugins::built_in_plugins(services));
        registry
    }

    /// Registers a plugin under its type key.
    ///
    /// A collision warns and overwrites (non-fatal). An overwritten
    /// plugin that was loaded is unloaded first.
    pub fn register_plugin(&mut self, plugin: Arc<dyn CellPlugin>) {
        let key = plugin.type_key().to_string();
        if self.plugins.contains_key(&key) {
            warn!("plugin type `{key}` registered twice; last registration wins");
            self.unload_plugin(&key);
        }
        self.plugins.insert(key, plugin);
    }

    /// Registers several plugins.
    pub fn register_plugins(&mut self, plugins: impl IntoIterator<Item = Arc<dyn CellPlugin>>) {
        for plugin in plugins {
            self.register_plugin(plugin);
        }
    }

    /// Looks up a plugin by type key.
    pub fn get_plugin(&self, type_key: &str) -> Option<&Arc<dyn CellPlugin>> {
        self.plugins.get(type_key)
    }

    /// Returns `true` if a plugin is registered for the type key.
    pub fn has_plugin(&self, type_key: &str) -> bool {
        self.plugins.contains_key(type_key)
    }

    /// Registered type keys, in no particular order.
    pub fn type_keys(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    /// Mounts a plugin. Repeat calls are no-ops; a failing hook is
    /// logged and the plugin is still considered loaded.
    pub fn load_plugin(&mut self, type_key: &str) {
        if self.loaded.contains(type_key) {
            return;
        }
        let Some(plugin) = self.plugins.get(type_key) else {
            return;
        };
        if let Err(err) = plugin.on_mount() {
            warn!("plugin `{type_key}` on_mount failed: {err}");
        }
        self.loaded.insert(type_key.to_string());
    }

    /// Unmounts a plugin. Repeat calls are no-ops.
    pub fn unload_plugin(&mut self, type_key: &str) {
        if !self.loaded.remove(type_key) {
            return;
        }
        if let Some(plugin) = self.plugins.get(type_key) {
            if let Err(err) = plugin.on_unmount() {
                warn!("plugin `{type_key}` on_unmount failed: {err}");
            }
        }
    }

    /// Mounts every registered plugin. Each hook call is isolated: one
    /// failing plugin does not stop the rest.
    pub fn load_all_plugins(&mut self) {
        let keys: Vec<String> = self.plugins.keys().cloned().collect();
        for key in keys {
            self.load_plugin(&key);
        }
    }

    /// Unmounts every loaded plugin.
    pub fn unload_all_plugins(&mut self) {
        let keys: Vec<String> = self.loaded.iter().cloned().collect();
        for key in keys {
            self.unload_plugin(&key);
        }
    }

    /// Runs the plugin's `before_save` transform, or identity when the
    /// type is unregistered.
    pub fn transform_before_save(
        &self,
        type_key: &str,
        value: CellValue,
        config: Option<&ColumnConfig>,
    ) -> CellValue {
        match self.plugins.get(type_key) {
            Some(plugin) => plugin.before_save(value, config),
            None => value,
        }
    }

    /// Runs the plugin's `after_load` transform, or identity when the
    /// type is unregistered.
    pub fn transform_after_load(
        &self,
        type_key: &str,
        value: CellValue,
        config: Option<&ColumnConfig>,
    ) -> CellValue {
        match self.plugins.get(type_key) {
            Some(plugin) => plugin.after_load(value, config),
            None => value,
        }
    }

    /// Orders two values with the plugin's comparator, or leaves them
    /// equal when the type is unregistered.
    pub fn compare_values(
        &self,
        type_key: &str,
        a: &CellValue,
        b: &CellValue,
        config: Option<&ColumnConfig>,
    ) -> Ordering {
        match self.plugins.get(type_key) {
            Some(plugin) => plugin.compare(a, b, config),
            None => Ordering::Equal,
        }
    }

    /// Releases the external resources referenced by a doomed column's
    /// values.
    ///
    /// Each value is released independently with fan-out concurrency and
    /// the releases are joined with all-settled semantics: one failure
    /// neither prevents the others nor surfaces to the caller. Failures
    /// are logged per item (best-effort cleanup).
    pub async fn cleanup_column(&self, type_key: &str, values: &[CellValue]) {
        let Some(plugin) = self.plugins.get(type_key) else {
            return;
        };
        if !plugin.supports_cleanup() || values.is_empty() {
            return;
        }
        let results = join_all(values.iter().map(|value| plugin.cleanup_value(value))).await;
        for err in results.into_iter().filter_map(Result::err) {
            warn!("column cleanup failure for type `{type_key}`: {err}");
        }
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .field("loaded", &self.loaded)
            .finish()
    }
}
