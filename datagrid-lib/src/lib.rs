//! Embeddable data grid engine
//!
//! A typed table engine for embedding in document editors: pluggable
//! column types, a cell edit lifecycle with validation, bounded
//! undo/redo, drag reorder and best-effort external resource cleanup.

pub mod controller;
pub mod error;
pub mod external;
pub mod model;
pub mod plugin;
pub mod plugins;
pub mod store;
pub mod validation;

mod table;

pub use table::*;
