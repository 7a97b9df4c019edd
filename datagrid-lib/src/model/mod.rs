//! Data model: values, columns, rows, addressing, snapshots

pub mod types;

mod column;
mod config;
mod coord;
mod row;
mod snapshot;
mod value;

pub use column::*;
pub use config::*;
pub use coord::*;
pub use row::*;
pub use snapshot::*;
pub use value::*;
