//! MySQL follow edge table client.
//!
//! The table's primary key is `(from_username, to_username)` and the reverse
//! index is `(to_username, from_username)`, so both query shapes are keyset
//! scans: a page is `LIMIT n + 1` rows strictly after the cursor, the extra row
//! only telling us whether to hand back a cursor.

use crate::dao::{FollowEdgeTableClient, TableSettings};
use crate::pool::DatabasePoolInterface;
use crate::query::{KeyCondition, QueryExpression, QueryPage};
use async_trait::async_trait;
use followgraph_core::{FollowEdge, FollowGraphResult};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL-backed follow edge table.
#[derive(Component)]
#[shaku(interface = FollowEdgeTableClient)]
pub struct MySqlFollowEdgeTableClient {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
    settings: TableSettings,
}

impl MySqlFollowEdgeTableClient {
    /// Creates a new MySQL table client.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, settings: TableSettings) -> Self {
        Self { pool, settings }
    }

    fn select_sql(&self, condition: &KeyCondition, has_cursor: bool) -> String {
        let (key_column, order_column) = match condition {
            KeyCondition::FromUsername(_) => ("from_username", "to_username"),
            KeyCondition::ToUsername(_) => ("to_username", "from_username"),
        };
        let cursor_clause = if has_cursor {
            format!(" AND {} > ?", order_column)
        } else {
            String::new()
        };

        format!(
            "SELECT from_username, to_username FROM `{}` WHERE {} = ?{} ORDER BY {} LIMIT ?",
            self.settings.table_name, key_column, cursor_clause, order_column
        )
    }
}

/// Database row representation of an edge.
#[derive(Debug, FromRow)]
struct FollowEdgeRow {
    from_username: String,
    to_username: String,
}

impl From<FollowEdgeRow> for FollowEdge {
    fn from(row: FollowEdgeRow) -> Self {
        Self::new(row.from_username, row.to_username)
    }
}

#[async_trait]
impl FollowEdgeTableClient for MySqlFollowEdgeTableClient {
    async fn query_page(&self, expression: &QueryExpression) -> FollowGraphResult<QueryPage> {
        let condition = expression.resolve(&self.settings.to_username_index)?;
        let limit = expression.limit().unwrap_or(self.settings.page_size).max(1);
        let cursor = expression.exclusive_start_key();
        debug!("Querying follow edges: {:?} after {:?}", condition, cursor);

        let sql = self.select_sql(&condition, cursor.is_some());
        let mut query = sqlx::query_as::<_, FollowEdgeRow>(&sql).bind(condition.value());
        if let Some(cursor) = cursor {
            query = match &condition {
                KeyCondition::FromUsername(_) => query.bind(cursor.to_username.as_str()),
                KeyCondition::ToUsername(_) => query.bind(cursor.from_username.as_str()),
            };
        }

        let rows = query
            .bind((limit as u64).saturating_add(1))
            .fetch_all(self.pool.inner())
            .await?;

        let items = rows.into_iter().map(FollowEdge::from).collect();
        Ok(QueryPage::from_overfetch(items, limit))
    }

    async fn save(&self, edge: &FollowEdge) -> FollowGraphResult<()> {
        debug!("Saving follow edge: {}", edge);

        let sql = format!(
            "INSERT INTO `{}` (from_username, to_username) VALUES (?, ?) \
             ON DUPLICATE KEY UPDATE from_username = from_username",
            self.settings.table_name
        );
        sqlx::query(&sql)
            .bind(&edge.from_username)
            .bind(&edge.to_username)
            .execute(self.pool.inner())
            .await?;

        Ok(())
    }
}

impl std::fmt::Debug for MySqlFollowEdgeTableClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlFollowEdgeTableClient")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
