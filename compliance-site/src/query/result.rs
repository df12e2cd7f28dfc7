/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Progress of one remote read.

use compliance_content_client::ApiError;
use thiserror::Error;

/// Why a read did not produce rows. Cloneable so it can sit in a watch channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Network failure, timeout at the transport, or no store configured.
    #[error("content store unavailable: {0}")]
    Unavailable(String),

    /// The collection does not exist or is not exposed.
    #[error("collection missing: {0}")]
    MissingCollection(String),

    /// Authentication or row-level security rejected the read.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The store answered with an error status or a body that was not rows.
    #[error("store error: {0}")]
    Store(String),
}

impl From<ApiError> for QueryError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match err {
            ApiError::Network(_) | ApiError::Config(_) => QueryError::Unavailable(message),
            ApiError::MissingCollection { .. } | ApiError::InvalidCollection(_) => {
                QueryError::MissingCollection(message)
            }
            ApiError::NotAuthenticated | ApiError::Forbidden(_) => {
                QueryError::PermissionDenied(message)
            }
            ApiError::ServerError { .. } | ApiError::Decode(_) => QueryError::Store(message),
        }
    }
}

/// The state of a [`RemoteQuery`](super::RemoteQuery).
///
/// Starts as `Loading` and moves exactly once to `Ready` or `Failed`.
/// An error and rows can never coexist.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult<T> {
    Loading,
    Ready(Vec<T>),
    Failed(QueryError),
}

impl<T> QueryResult<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryResult::Loading)
    }

    /// Rows once resolved; `None` while loading or after a failure.
    pub fn data(&self) -> Option<&[T]> {
        match self {
            QueryResult::Ready(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&QueryError> {
        match self {
            QueryResult::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// True once a terminal outcome has been reached.
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }
}

impl<T> Default for QueryResult<T> {
    fn default() -> Self {
        QueryResult::Loading
    }
}
