//! Unified error type for the follow graph crates.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Error type shared by the DAO, the store clients, and configuration.
///
/// Only two variants reach callers of the DAO in practice:
/// [`InvalidArgument`](Self::InvalidArgument), raised before the store is touched,
/// and [`StoreFailure`](Self::StoreFailure), carrying whatever the store client reported.
#[derive(Error, Debug)]
pub enum FollowGraphError {
    /// A required identifier was missing or empty.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backing store rejected or failed the request.
    #[error("Store failure: {0}")]
    StoreFailure(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FollowGraphError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::StoreFailure(_) => "STORE_FAILURE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument<T: Into<String>>(message: T) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a store failure.
    #[must_use]
    pub fn store<T: Into<String>>(message: T) -> Self {
        Self::StoreFailure(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is worth retrying.
    ///
    /// Nothing in this workspace retries; callers that wrap the DAO may.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::StoreFailure(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for FollowGraphError {
    fn from(err: sqlx::Error) -> Self {
        Self::StoreFailure(err.to_string())
    }
}

/// Field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}
