//! In-memory follow edge table.
//!
//! Mirrors the MySQL client's paging and key semantics over a `BTreeSet`, for
//! local runs and tests. Counts queries and saves so callers can assert when
//! the store was (or was not) contacted.

use crate::dao::{FollowEdgeTableClient, TableSettings};
use crate::query::{QueryExpression, QueryPage};
use async_trait::async_trait;
use followgraph_core::{EdgeKey, FollowEdge, FollowGraphResult};
use parking_lot::RwLock;
use shaku::Component;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Backing storage and call counters of an [`InMemoryFollowEdgeTableClient`].
#[derive(Debug, Default)]
pub struct MemoryTable {
    edges: RwLock<BTreeSet<EdgeKey>>,
    queries: AtomicUsize,
    saves: AtomicUsize,
}

/// Follow edge table held in process memory.
#[derive(Component, Debug, Default)]
#[shaku(interface = FollowEdgeTableClient)]
pub struct InMemoryFollowEdgeTableClient {
    settings: TableSettings,
    table: MemoryTable,
}

impl InMemoryFollowEdgeTableClient {
    /// Creates an empty table.
    #[must_use]
    pub fn new(settings: TableSettings) -> Self {
        Self {
            settings,
            table: MemoryTable::default(),
        }
    }

    /// Inserts an edge directly, without counting it as a save.
    pub fn insert(&self, edge: FollowEdge) {
        self.table.edges.write().insert(edge.key());
    }

    /// Number of stored edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.edges.read().len()
    }

    /// Returns true if no edge is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.edges.read().is_empty()
    }

    /// Number of `query_page` calls served so far.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.table.queries.load(Ordering::SeqCst)
    }

    /// Number of `save` calls served so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.table.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FollowEdgeTableClient for InMemoryFollowEdgeTableClient {
    async fn query_page(&self, expression: &QueryExpression) -> FollowGraphResult<QueryPage> {
        self.table.queries.fetch_add(1, Ordering::SeqCst);
        let condition = expression.resolve(&self.settings.to_username_index)?;
        let limit = expression.limit().unwrap_or(self.settings.page_size).max(1);

        let edges = self.table.edges.read();
        // Set order is (from, to), which is already query order for either key condition.
        let items = edges
            .iter()
            .filter(|key| condition.matches(key))
            .filter(|key| {
                expression
                    .exclusive_start_key()
                    .map_or(true, |cursor| condition.is_after(key, cursor))
            })
            .take(limit.saturating_add(1))
            .cloned()
            .map(FollowEdge::from)
            .collect();

        let page = QueryPage::from_overfetch(items, limit);
        debug!(
            condition = ?condition,
            items = page.items.len(),
            "In-memory follow edge query"
        );
        Ok(page)
    }

    async fn save(&self, edge: &FollowEdge) -> FollowGraphResult<()> {
        self.table.saves.fetch_add(1, Ordering::SeqCst);
        self.table.edges.write().insert(edge.key());
        debug!(edge = %edge, "Saved follow edge in memory");
        Ok(())
    }
}
