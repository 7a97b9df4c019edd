//! Interaction controllers
//!
//! The store holds state; these controllers hold interaction state (an
//! edit draft, a drag in flight) and translate host events into store
//! operations.

mod edit;
mod keyboard;
mod reorder;

pub use edit::*;
pub use keyboard::*;
pub use reorder::*;
