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

//! Row endpoints: select and insert.

use compliance_content_types::QueryRequest;
use serde_json::Value;

use crate::error::ApiError;
use crate::{error_from_response, ContentStoreClient};

impl ContentStoreClient {
    /// Read the rows matching `request`, in the order the store returns them.
    ///
    /// Calls `GET /rest/v1/{collection}?select=*&...`.
    pub async fn select_rows(&self, request: &QueryRequest) -> Result<Vec<Value>, ApiError> {
        log::debug!("Selecting rows: {request}");
        let response = self
            .get(&request.collection)?
            .query(&request.query_pairs())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(&request.collection, response).await);
        }

        let text = response.text().await?;
        let rows: Vec<Value> = serde_json::from_str(&text)?;
        log::debug!("{} rows from {}", rows.len(), request.collection);
        Ok(rows)
    }

    /// Insert one row. The store is asked not to echo it back.
    ///
    /// Calls `POST /rest/v1/{collection}` with `Prefer: return=minimal`.
    pub async fn insert_row(&self, collection: &str, row: &Value) -> Result<(), ApiError> {
        log::debug!("Inserting row into {collection}");
        let response = self
            .post(collection)?
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let err = error_from_response(collection, response).await;
            log::warn!("Insert into {collection} failed: {err}");
            Err(err)
        }
    }
}
