//! DAO implementations.
//!
//! Trait definitions live in the parent `dao/` module. The DAO is store-agnostic;
//! store-specific code lives in the table clients (`mysql/`, `memory/`).

mod follow_edge_dao_impl;

pub use follow_edge_dao_impl::{FollowEdgeDaoImpl, FollowEdgeDaoImplParameters};
