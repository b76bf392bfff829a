//! Adapters between the outside world and the optimizer.

pub mod json;
pub mod text;
