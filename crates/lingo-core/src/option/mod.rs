//! Option domain module.
//!
//! - `model`: the closed option catalog (`OptionId`, `TransformKind`)
//!   and the fixed evaluation order
//! - `registry`: per-deployment option subset and menu labels

mod model;
mod registry;

pub use model::{OptionId, TransformKind, EVALUATION_ORDER};
pub use registry::{OptionRegistry, RegistryEntry};
