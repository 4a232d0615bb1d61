//! # Follow Graph Core
//!
//! Core types and error definitions for the follow graph crates: the
//! [`FollowEdge`] entity, the unified [`FollowGraphError`], validation
//! helpers, and tracing setup.

pub mod domain;
pub mod error;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use result::*;
pub use telemetry::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, Component, HasComponent, Interface};
