//! Follow edge entity.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use validator::Validate;

/// Attribute name of the partition key.
pub const FROM_USERNAME: &str = "fromUsername";

/// Attribute name of the sort key, also the hash key of the reverse index.
pub const TO_USERNAME: &str = "toUsername";

/// A directed "follows" relationship from one account to another.
///
/// Identified by the `(from_username, to_username)` pair. Saving an edge with a pair
/// that already exists overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FollowEdge {
    /// The account doing the following. Partition key.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub from_username: String,

    /// The account being followed. Sort key.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub to_username: String,
}

impl FollowEdge {
    /// Creates a new edge.
    #[must_use]
    pub fn new(from_username: impl Into<String>, to_username: impl Into<String>) -> Self {
        Self {
            from_username: from_username.into(),
            to_username: to_username.into(),
        }
    }

    /// Returns the primary key of this edge.
    #[must_use]
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.from_username.clone(), self.to_username.clone())
    }
}

impl Display for FollowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from_username, self.to_username)
    }
}

/// Full primary key of an edge item.
///
/// Also serves as the pagination cursor: a page ends at its last evaluated key and
/// the next page starts strictly after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeKey {
    /// Partition key value.
    pub from_username: String,
    /// Sort key value.
    pub to_username: String,
}

impl EdgeKey {
    /// Creates a new key.
    #[must_use]
    pub fn new(from_username: impl Into<String>, to_username: impl Into<String>) -> Self {
        Self {
            from_username: from_username.into(),
            to_username: to_username.into(),
        }
    }
}

impl From<EdgeKey> for FollowEdge {
    fn from(key: EdgeKey) -> Self {
        Self {
            from_username: key.from_username,
            to_username: key.to_username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidateExt;

    #[test]
    fn test_serializes_with_attribute_names() {
        let edge = FollowEdge::new("alice", "bob");
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json[FROM_USERNAME], "alice");
        assert_eq!(json[TO_USERNAME], "bob");
    }

    #[test]
    fn test_deserializes_from_attribute_names() {
        let edge: FollowEdge =
            serde_json::from_str(r#"{"fromUsername":"carol","toUsername":"bob"}"#).unwrap();
        assert_eq!(edge, FollowEdge::new("carol", "bob"));
    }

    #[test]
    fn test_validation_rejects_empty_usernames() {
        assert!(FollowEdge::new("alice", "bob").validate_argument().is_ok());
        assert!(FollowEdge::new("", "bob").validate_argument().is_err());
        assert!(FollowEdge::new("alice", "").validate_argument().is_err());
    }

    #[test]
    fn test_self_follow_is_not_rejected() {
        assert!(FollowEdge::new("alice", "alice").validate_argument().is_ok());
    }

    #[test]
    fn test_key_round_trip() {
        let edge = FollowEdge::new("alice", "bob");
        assert_eq!(FollowEdge::from(edge.key()), edge);
    }

    #[test]
    fn test_key_ordering_is_partition_then_sort() {
        let a = EdgeKey::new("alice", "zed");
        let b = EdgeKey::new("bob", "amy");
        let c = EdgeKey::new("bob", "carl");
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_display() {
        assert_eq!(FollowEdge::new("alice", "bob").to_string(), "alice -> bob");
    }
}
