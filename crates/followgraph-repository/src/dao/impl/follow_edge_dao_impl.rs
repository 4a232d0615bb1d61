//! `FollowEdgeDaoImpl` — the follow edge DAO over a [`FollowEdgeTableClient`].

use crate::dao::{FollowEdgeDao, FollowEdgeTableClient, TableSettings};
use crate::pagination::PaginatedQueryList;
use crate::query::{AttributeValue, QueryExpression};
use async_trait::async_trait;
use followgraph_core::{FollowEdge, FollowGraphError, FollowGraphResult, ValidateExt, TO_USERNAME};
use shaku::Component;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Placeholder bound to the followed account in the reverse-index query.
const TO_USERNAME_PLACEHOLDER: &str = ":toUsername";

/// Follow edge DAO.
///
/// Stateless apart from the injected client and table settings; safe to share
/// across tasks.
#[derive(Component)]
#[shaku(interface = FollowEdgeDao)]
pub struct FollowEdgeDaoImpl {
    #[shaku(inject)]
    table_client: Arc<dyn FollowEdgeTableClient>,
    settings: TableSettings,
}

impl FollowEdgeDaoImpl {
    /// Creates a new DAO over the given table client.
    #[must_use]
    pub fn new(table_client: Arc<dyn FollowEdgeTableClient>, settings: TableSettings) -> Self {
        Self {
            table_client,
            settings,
        }
    }

    fn require_username(username: &str) -> FollowGraphResult<()> {
        if username.is_empty() {
            return Err(FollowGraphError::invalid_argument("Username not provided."));
        }
        Ok(())
    }
}

#[async_trait]
impl FollowEdgeDao for FollowEdgeDaoImpl {
    fn get_all_follows(&self, username: &str) -> FollowGraphResult<PaginatedQueryList> {
        Self::require_username(username)?;
        debug!("DAO: get_all_follows {}", username);

        let expression = QueryExpression::new()
            .with_hash_key_values(username)
            .with_limit(self.settings.page_size);

        Ok(PaginatedQueryList::new(Arc::clone(&self.table_client), expression))
    }

    fn get_all_followers(&self, username: &str) -> FollowGraphResult<PaginatedQueryList> {
        Self::require_username(username)?;
        debug!("DAO: get_all_followers {}", username);

        // `toUsername` is not the partition key, so the reverse lookup must go
        // through the index with an explicit key condition.
        let mut values = HashMap::new();
        values.insert(TO_USERNAME_PLACEHOLDER.to_string(), AttributeValue::s(username));

        let expression = QueryExpression::new()
            .with_index_name(self.settings.to_username_index.clone())
            .with_key_condition_expression(format!("{} = {}", TO_USERNAME, TO_USERNAME_PLACEHOLDER))
            .with_expression_attribute_values(values)
            .with_limit(self.settings.page_size);

        Ok(PaginatedQueryList::new(Arc::clone(&self.table_client), expression))
    }

    async fn create_follow_edge(
        &self,
        from_username: &str,
        to_username: &str,
    ) -> FollowGraphResult<FollowEdge> {
        let edge = FollowEdge::new(from_username, to_username);
        edge.validate_argument().map_err(|_| {
            FollowGraphError::invalid_argument(format!(
                "One of the passed in usernames was missing: '{}' was trying to follow '{}'",
                from_username, to_username
            ))
        })?;

        debug!("DAO: create_follow_edge {}", edge);
        self.table_client.save(&edge).await?;
        Ok(edge)
    }
}

impl std::fmt::Debug for FollowEdgeDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FollowEdgeDaoImpl")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
