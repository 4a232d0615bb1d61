//! FollowEdgeTableClient trait — the store capabilities the DAO depends on.

use crate::query::{QueryExpression, QueryPage};
use async_trait::async_trait;
use followgraph_config::TableConfig;
use followgraph_core::{FollowEdge, FollowGraphResult, Interface};

/// Client for the follow edge table.
///
/// Implementations talk to exactly one store. Errors are reported as
/// [`followgraph_core::FollowGraphError::StoreFailure`] and never retried here.
#[async_trait]
pub trait FollowEdgeTableClient: Interface + Send + Sync {
    /// Runs one page of a partition or index query.
    async fn query_page(&self, expression: &QueryExpression) -> FollowGraphResult<QueryPage>;

    /// Inserts the edge, overwriting any edge with the same key.
    async fn save(&self, edge: &FollowEdge) -> FollowGraphResult<()>;
}

/// Table layout and paging shared by the DAO and the table clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSettings {
    /// Table holding the edges.
    pub table_name: String,
    /// Name of the reverse index keyed on `toUsername`.
    pub to_username_index: String,
    /// Items per page.
    pub page_size: usize,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self::from(&TableConfig::default())
    }
}

impl From<&TableConfig> for TableSettings {
    fn from(config: &TableConfig) -> Self {
        Self {
            table_name: config.table_name.clone(),
            to_username_index: config.to_username_index.clone(),
            page_size: config.page_size,
        }
    }
}
