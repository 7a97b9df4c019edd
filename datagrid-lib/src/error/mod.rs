//! Error types

mod plugin;
mod validation;

pub use plugin::*;
pub use validation::*;
