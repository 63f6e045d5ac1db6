//! Session domain module.
//!
//! - `model`: the per-conversation `Session` state machine
//! - `turn`: transcript entry types (`Speaker`, `Turn`)

mod model;
mod turn;

pub use model::Session;
pub use turn::{Speaker, Turn};
