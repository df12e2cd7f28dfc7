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

//! Error types for the content store client.

use thiserror::Error;

/// Errors returned by [`ContentStoreClient`](crate::ContentStoreClient) methods
/// and by every [`ContentStore`](crate::ContentStore) implementation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The key or access token was rejected (HTTP 401).
    #[error("Not authenticated with the content store.")]
    NotAuthenticated,

    /// Row-level security denied the operation (HTTP 403).
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// The collection does not exist or is not exposed (HTTP 404 / PGRST205).
    #[error("Collection '{collection}' not found: {detail}")]
    MissingCollection { collection: String, detail: String },

    /// The collection name is not a valid identifier; nothing was sent.
    #[error("Invalid collection name: {0:?}")]
    InvalidCollection(String),

    /// Any other non-success status with its body.
    #[error("Server error ({status}): {body}")]
    ServerError { status: u16, body: String },

    /// A network or transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The store is not configured (offline mode).
    #[error("Configuration error: {0}")]
    Config(String),
}
