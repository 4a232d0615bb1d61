//! Domain model.

pub mod follow_edge;

pub use follow_edge::*;
