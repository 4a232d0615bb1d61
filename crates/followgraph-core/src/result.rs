//! Result type aliases for Follow Graph.

use crate::FollowGraphError;

/// A specialized `Result` type for follow graph operations.
pub type FollowGraphResult<T> = Result<T, FollowGraphError>;
