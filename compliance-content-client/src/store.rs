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

//! The store seam used by the site.
//!
//! Everything above this crate talks to `dyn ContentStore`, so the HTTP
//! client, the offline stand-in and test fakes are interchangeable.

use async_trait::async_trait;
use compliance_content_types::QueryRequest;
use serde_json::Value;

use crate::error::ApiError;
use crate::ContentStoreClient;

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Rows matching `request`, already filtered, ordered and limited by the store.
    async fn query(&self, request: &QueryRequest) -> Result<Vec<Value>, ApiError>;

    /// Write one row into `collection`.
    async fn insert(&self, collection: &str, row: Value) -> Result<(), ApiError>;
}

#[async_trait]
impl ContentStore for ContentStoreClient {
    async fn query(&self, request: &QueryRequest) -> Result<Vec<Value>, ApiError> {
        self.select_rows(request).await
    }

    async fn insert(&self, collection: &str, row: Value) -> Result<(), ApiError> {
        self.insert_row(collection, &row).await
    }
}

/// Store used when no remote endpoint is configured. Every call fails,
/// so reads fall back to static content and writes report the problem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineStore;

const OFFLINE: &str = "content store is not configured";

#[async_trait]
impl ContentStore for OfflineStore {
    async fn query(&self, _request: &QueryRequest) -> Result<Vec<Value>, ApiError> {
        Err(ApiError::Config(OFFLINE.to_string()))
    }

    async fn insert(&self, _collection: &str, _row: Value) -> Result<(), ApiError> {
        Err(ApiError::Config(OFFLINE.to_string()))
    }
}
