//! DAO (Data Access Object) layer.
//!
//! Hierarchy:
//! ```text
//! Caller → FollowEdgeDao (interface + impl) → FollowEdgeTableClient (interface + impl) → store
//! ```
//!
//! The DAO owns argument validation and query construction. Table clients own
//! the store: paging, key conditions, and upserts.

pub mod follow_edge_dao;
pub mod r#impl;
pub mod table_client;

pub use follow_edge_dao::FollowEdgeDao;
pub use r#impl::{FollowEdgeDaoImpl, FollowEdgeDaoImplParameters};
pub use table_client::{FollowEdgeTableClient, TableSettings};
