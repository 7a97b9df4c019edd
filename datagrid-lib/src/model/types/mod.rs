//! Typed cell payloads

mod attachment;
mod date;
mod image;
mod link;
mod progress;
mod rich_text;
mod select_option;

pub use attachment::*;
pub use date::*;
pub use image::*;
pub use link::*;
pub use progress::*;
pub use rich_text::*;
pub use select_option::*;
