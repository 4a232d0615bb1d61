//! Query expressions against the follow edge table.
//!
//! A [`QueryExpression`] describes one of two query shapes:
//!
//! - a partition query, built with [`QueryExpression::with_hash_key_values`];
//! - an index query, built with [`QueryExpression::with_index_name`],
//!   [`QueryExpression::with_key_condition_expression`] and
//!   [`QueryExpression::with_expression_attribute_values`].
//!
//! Table clients call [`QueryExpression::resolve`] to turn either shape into a
//! [`KeyCondition`]. Resolution failures are store-side rejections and surface
//! as [`FollowGraphError::StoreFailure`].

use followgraph_core::{
    EdgeKey, FollowEdge, FollowGraphError, FollowGraphResult, FROM_USERNAME, TO_USERNAME,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A typed value bound to an expression placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// String value.
    S(String),
    /// Number value, kept in its string form.
    N(String),
}

impl AttributeValue {
    /// Creates a string value.
    #[must_use]
    pub fn s(value: impl Into<String>) -> Self {
        Self::S(value.into())
    }

    /// Returns the string payload, if this is a string value.
    #[must_use]
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(value) => Some(value),
            Self::N(_) => None,
        }
    }
}

/// The resolved key condition of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCondition {
    /// Every edge whose partition key equals the value.
    FromUsername(String),
    /// Every edge whose `toUsername` equals the value, read through the index.
    ToUsername(String),
}

impl KeyCondition {
    /// Returns the bound key value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::FromUsername(value) | Self::ToUsername(value) => value,
        }
    }

    /// Checks whether an edge satisfies this condition.
    #[must_use]
    pub fn matches(&self, edge: &EdgeKey) -> bool {
        match self {
            Self::FromUsername(value) => edge.from_username == *value,
            Self::ToUsername(value) => edge.to_username == *value,
        }
    }

    /// Checks whether `key` sorts strictly after the cursor in this query's order.
    ///
    /// Partition queries are ordered by `toUsername`, index queries by `fromUsername`.
    #[must_use]
    pub fn is_after(&self, key: &EdgeKey, cursor: &EdgeKey) -> bool {
        match self {
            Self::FromUsername(_) => key.to_username > cursor.to_username,
            Self::ToUsername(_) => key.from_username > cursor.from_username,
        }
    }
}

/// Query against the follow edge table or its reverse index.
#[derive(Debug, Clone, Default)]
pub struct QueryExpression {
    hash_key_values: Option<String>,
    index_name: Option<String>,
    key_condition_expression: Option<String>,
    expression_attribute_values: HashMap<String, AttributeValue>,
    limit: Option<usize>,
    exclusive_start_key: Option<EdgeKey>,
}

impl QueryExpression {
    /// Creates an empty expression.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queries by partition key: every edge whose `fromUsername` equals the value.
    #[must_use]
    pub fn with_hash_key_values(mut self, from_username: impl Into<String>) -> Self {
        self.hash_key_values = Some(from_username.into());
        self
    }

    /// Targets a secondary index.
    #[must_use]
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    /// Sets a key condition of the form `<attribute> = :<placeholder>`.
    #[must_use]
    pub fn with_key_condition_expression(mut self, expression: impl Into<String>) -> Self {
        self.key_condition_expression = Some(expression.into());
        self
    }

    /// Binds placeholder values used by the key condition.
    #[must_use]
    pub fn with_expression_attribute_values(
        mut self,
        values: HashMap<String, AttributeValue>,
    ) -> Self {
        self.expression_attribute_values = values;
        self
    }

    /// Caps the number of items a single page returns.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Starts the page strictly after the given key.
    #[must_use]
    pub fn with_exclusive_start_key(mut self, key: EdgeKey) -> Self {
        self.exclusive_start_key = Some(key);
        self
    }

    /// Returns the targeted index, if any.
    #[must_use]
    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    /// Returns the page limit, if any.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the cursor this page starts after, if any.
    #[must_use]
    pub const fn exclusive_start_key(&self) -> Option<&EdgeKey> {
        self.exclusive_start_key.as_ref()
    }

    /// Resolves the expression against a table whose reverse index is `known_index`.
    pub fn resolve(&self, known_index: &str) -> FollowGraphResult<KeyCondition> {
        let condition = match (&self.hash_key_values, &self.key_condition_expression) {
            (Some(_), Some(_)) => {
                return Err(FollowGraphError::store(
                    "Hash key values and a key condition expression cannot be combined",
                ))
            }
            (None, None) => {
                return Err(FollowGraphError::store(
                    "Query requires hash key values or a key condition expression",
                ))
            }
            (Some(from_username), None) => KeyCondition::FromUsername(from_username.clone()),
            (None, Some(expression)) => self.parse_key_condition(expression)?,
        };

        match (&condition, self.index_name()) {
            (KeyCondition::FromUsername(_), None) => {}
            (KeyCondition::FromUsername(_), Some(index)) => {
                return Err(FollowGraphError::store(format!(
                    "Query key condition not supported on index {}: {}",
                    index, FROM_USERNAME
                )))
            }
            (KeyCondition::ToUsername(_), None) => {
                return Err(FollowGraphError::store(format!(
                    "Query condition missed key schema element: {}",
                    FROM_USERNAME
                )))
            }
            (KeyCondition::ToUsername(_), Some(index)) if index != known_index => {
                return Err(FollowGraphError::store(format!(
                    "The table does not have the specified index: {}",
                    index
                )))
            }
            (KeyCondition::ToUsername(_), Some(_)) => {}
        }

        Ok(condition)
    }

    fn parse_key_condition(&self, expression: &str) -> FollowGraphResult<KeyCondition> {
        let (attribute, placeholder) = expression
            .split_once('=')
            .map(|(attribute, placeholder)| (attribute.trim(), placeholder.trim()))
            .ok_or_else(|| {
                FollowGraphError::store(format!("Invalid KeyConditionExpression: {}", expression))
            })?;

        if placeholder.len() < 2 || !placeholder.starts_with(':') {
            return Err(FollowGraphError::store(format!(
                "Invalid KeyConditionExpression: expected a placeholder, found '{}'",
                placeholder
            )));
        }

        let value = self
            .expression_attribute_values
            .get(placeholder)
            .ok_or_else(|| {
                FollowGraphError::store(format!(
                    "An expression attribute value used in expression is not defined: {}",
                    placeholder
                ))
            })?
            .as_s()
            .ok_or_else(|| {
                FollowGraphError::store(format!(
                    "Condition parameter type does not match schema type for {}",
                    attribute
                ))
            })?
            .to_string();

        match attribute {
            TO_USERNAME => Ok(KeyCondition::ToUsername(value)),
            FROM_USERNAME => Ok(KeyCondition::FromUsername(value)),
            other => Err(FollowGraphError::store(format!(
                "Query key condition not supported: {}",
                other
            ))),
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPage {
    /// Edges on this page, in query order.
    pub items: Vec<FollowEdge>,
    /// Key of the last item when more items may follow; `None` ends the query.
    pub last_evaluated_key: Option<EdgeKey>,
}

impl QueryPage {
    /// Builds a page from up to `limit + 1` fetched items.
    ///
    /// The extra item, if present, only signals that another page exists.
    #[must_use]
    pub fn from_overfetch(mut items: Vec<FollowEdge>, limit: usize) -> Self {
        if items.len() > limit {
            items.truncate(limit);
            let last_evaluated_key = items.last().map(FollowEdge::key);
            Self {
                items,
                last_evaluated_key,
            }
        } else {
            Self {
                items,
                last_evaluated_key: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = "to_username_index";

    fn followers_of(username: &str) -> QueryExpression {
        let mut values = HashMap::new();
        values.insert(":toUsername".to_string(), AttributeValue::s(username));
        QueryExpression::new()
            .with_index_name(INDEX)
            .with_key_condition_expression("toUsername = :toUsername")
            .with_expression_attribute_values(values)
    }

    #[test]
    fn test_hash_key_query_resolves_to_partition() {
        let expression = QueryExpression::new().with_hash_key_values("alice");
        assert_eq!(
            expression.resolve(INDEX).unwrap(),
            KeyCondition::FromUsername("alice".to_string())
        );
    }

    #[test]
    fn test_index_query_resolves_to_reverse_lookup() {
        assert_eq!(
            followers_of("bob").resolve(INDEX).unwrap(),
            KeyCondition::ToUsername("bob".to_string())
        );
    }

    #[test]
    fn test_index_query_without_index_is_rejected() {
        let mut values = HashMap::new();
        values.insert(":toUsername".to_string(), AttributeValue::s("bob"));
        let expression = QueryExpression::new()
            .with_key_condition_expression("toUsername = :toUsername")
            .with_expression_attribute_values(values);

        let err = expression.resolve(INDEX).unwrap_err();
        assert!(matches!(err, FollowGraphError::StoreFailure(_)));
        assert!(err.to_string().contains("missed key schema element"));
    }

    #[test]
    fn test_unknown_index_is_rejected() {
        let err = followers_of("bob").resolve("other_index").unwrap_err();
        assert!(err.to_string().contains("does not have the specified index"));
    }

    #[test]
    fn test_unbound_placeholder_is_rejected() {
        let expression = QueryExpression::new()
            .with_index_name(INDEX)
            .with_key_condition_expression("toUsername = :toUsername");
        let err = expression.resolve(INDEX).unwrap_err();
        assert!(err.to_string().contains(":toUsername"));
    }

    #[test]
    fn test_number_value_is_rejected() {
        let mut values = HashMap::new();
        values.insert(":toUsername".to_string(), AttributeValue::N("42".to_string()));
        let expression = QueryExpression::new()
            .with_index_name(INDEX)
            .with_key_condition_expression("toUsername = :toUsername")
            .with_expression_attribute_values(values);
        let err = expression.resolve(INDEX).unwrap_err();
        assert!(err.to_string().contains("does not match schema type"));
    }

    #[test]
    fn test_malformed_expressions_are_rejected() {
        for expression in ["toUsername", "toUsername = toUsername", "toUsername = :", "nickname = :v"] {
            let mut values = HashMap::new();
            values.insert(":v".to_string(), AttributeValue::s("bob"));
            let query = QueryExpression::new()
                .with_index_name(INDEX)
                .with_key_condition_expression(expression)
                .with_expression_attribute_values(values);
            assert!(query.resolve(INDEX).is_err(), "accepted {expression}");
        }
    }

    #[test]
    fn test_both_shapes_at_once_is_rejected() {
        let expression = followers_of("bob").with_hash_key_values("alice");
        assert!(expression.resolve(INDEX).is_err());
    }

    #[test]
    fn test_empty_expression_is_rejected() {
        assert!(QueryExpression::new().resolve(INDEX).is_err());
    }

    #[test]
    fn test_partition_query_on_index_is_rejected() {
        let expression = QueryExpression::new()
            .with_hash_key_values("alice")
            .with_index_name(INDEX);
        assert!(expression.resolve(INDEX).is_err());
    }

    #[test]
    fn test_cursor_order_follows_query_shape() {
        let cursor = EdgeKey::new("carol", "bob");
        let partition = KeyCondition::FromUsername("carol".to_string());
        assert!(partition.is_after(&EdgeKey::new("carol", "dave"), &cursor));
        assert!(!partition.is_after(&EdgeKey::new("carol", "bob"), &cursor));

        let index = KeyCondition::ToUsername("bob".to_string());
        assert!(index.is_after(&EdgeKey::new("dave", "bob"), &cursor));
        assert!(!index.is_after(&EdgeKey::new("alice", "bob"), &cursor));
    }

    #[test]
    fn test_page_from_overfetch() {
        let items = vec![
            FollowEdge::new("a", "x"),
            FollowEdge::new("b", "x"),
            FollowEdge::new("c", "x"),
        ];
        let page = QueryPage::from_overfetch(items.clone(), 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.last_evaluated_key, Some(EdgeKey::new("b", "x")));

        let page = QueryPage::from_overfetch(items, 3);
        assert_eq!(page.items.len(), 3);
        assert!(page.last_evaluated_key.is_none());
    }
}
