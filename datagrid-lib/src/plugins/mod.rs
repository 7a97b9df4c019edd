//! Built-in column type plugins
//!
//! Twelve column types ship with the engine. Hosts may register further
//! [`CellPlugin`](crate::plugin::CellPlugin) implementations alongside
//! them, or shadow a built-in by registering under the same type key.

mod attachment;
mod checkbox;
mod date;
mod image;
mod link;
mod multi_select;
mod number;
mod progress;
mod rating;
mod rich_text;
mod select;
mod text;

pub use attachment::AttachmentPlugin;
pub use checkbox::CheckboxPlugin;
pub use date::DatePlugin;
pub use image::ImagePlugin;
pub use link::LinkPlugin;
pub use multi_select::MultiSelectPlugin;
pub use number::NumberPlugin;
pub use progress::ProgressPlugin;
pub use rating::RatingPlugin;
pub use rich_text::RichTextPlugin;
pub use select::SelectPlugin;
pub use text::TextPlugin;

use std::sync::Arc;

use crate::external::ExternalServices;
use crate::plugin::CellPlugin;

/// The full built-in plugin set, wired to the given external services.
pub fn built_in_plugins(services: &ExternalServices) -> Vec<Arc<dyn CellPlugin>> {
    vec![
        Arc::new(TextPlugin),
        Arc::new(NumberPlugin),
        Arc::new(DatePlugin),
        Arc::new(SelectPlugin),
        Arc::new(MultiSelectPlugin),
        Arc::new(CheckboxPlugin),
        Arc::new(LinkPlugin),
        Arc::new(RatingPlugin),
        Arc::new(ProgressPlugin),
        Arc::new(ImagePlugin::new(services.uploader.clone())),
        Arc::new(AttachmentPlugin::new(
            services.uploader.clone(),
            services.filesystem.clone(),
        )),
        Arc::new(RichTextPlugin::new(services.content_refs.clone())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_set_has_unique_keys() {
        let plugins = built_in_plugins(&ExternalServices::default());
        assert_eq!(plugins.len(), 12);
        let mut keys: Vec<_> = plugins.iter().map(|p| p.type_key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 12);
    }
}
