//! FollowEdgeDao trait — follow graph data access.

use crate::pagination::PaginatedQueryList;
use async_trait::async_trait;
use followgraph_core::{FollowEdge, FollowGraphResult, Interface};

/// Data access object for follow edges.
///
/// List operations validate their argument and return a lazy
/// [`PaginatedQueryList`]; the store is not contacted until the list is polled.
#[async_trait]
pub trait FollowEdgeDao: Interface + Send + Sync {
    /// Lists every edge whose `fromUsername` is `username`: the accounts `username` follows.
    ///
    /// Fails with `InvalidArgument` when `username` is empty.
    fn get_all_follows(&self, username: &str) -> FollowGraphResult<PaginatedQueryList>;

    /// Lists every edge whose `toUsername` is `username`: the accounts following `username`.
    ///
    /// Fails with `InvalidArgument` when `username` is empty.
    fn get_all_followers(&self, username: &str) -> FollowGraphResult<PaginatedQueryList>;

    /// Creates (or overwrites) the edge `from_username -> to_username` and returns it.
    ///
    /// Fails with `InvalidArgument` naming both values when either one is empty.
    async fn create_follow_edge(
        &self,
        from_username: &str,
        to_username: &str,
    ) -> FollowGraphResult<FollowEdge>;
}
