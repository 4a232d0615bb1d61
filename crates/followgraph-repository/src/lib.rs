//! # Follow Graph Repository
//!
//! Data access for directed follow edges:
//!
//! ```text
//! Caller
//!   ↓  Arc<dyn FollowEdgeDao>            (DAO interface)
//! FollowEdgeDaoImpl                      (validation + query construction)
//!   ↓  Arc<dyn FollowEdgeTableClient>    (store client interface)
//! MySqlFollowEdgeTableClient / InMemoryFollowEdgeTableClient
//!   ↓
//! follow_edges table  (PK: from_username, to_username; index: to_username)
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   query.rs                         ← QueryExpression, KeyCondition, QueryPage
//!   pagination.rs                    ← PaginatedQueryList (lazy Stream)
//!   dao/
//!     follow_edge_dao.rs             ← FollowEdgeDao trait
//!     table_client.rs                ← FollowEdgeTableClient trait, TableSettings
//!     impl/follow_edge_dao_impl.rs   ← FollowEdgeDaoImpl
//!   mysql/                           ← MySqlFollowEdgeTableClient
//!   memory/                          ← InMemoryFollowEdgeTableClient
//!   pool.rs                          ← DatabasePool
//!   di.rs                            ← Shaku modules
//! ```

pub mod dao;
pub mod di;
pub mod memory;
pub mod mysql;
pub mod pagination;
pub mod pool;
pub mod query;

pub use dao::{FollowEdgeDao, FollowEdgeDaoImpl, FollowEdgeTableClient, TableSettings};
pub use di::*;
pub use memory::InMemoryFollowEdgeTableClient;
pub use mysql::MySqlFollowEdgeTableClient;
pub use pagination::PaginatedQueryList;
pub use pool::*;
pub use query::*;
