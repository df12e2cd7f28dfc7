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

//! REST client for the compliance site's remote content store.
//!
//! The store speaks the PostgREST dialect: collections live under
//! `/rest/v1/{collection}`, reads take filter/order/limit query parameters
//! and return JSON rows, writes are JSON `POST`s.
//!
//! # Example
//!
//! ```no_run
//! use compliance_content_client::ContentStoreClient;
//! use compliance_content_client::compliance_content_types::{Filter, QueryRequest};
//!
//! # async fn example() -> Result<(), compliance_content_client::ApiError> {
//! let client = ContentStoreClient::new("https://project.example.co", "anon-key");
//!
//! let request = QueryRequest::new("pricing_plans").filter(Filter::eq("active", true));
//! let rows = client.select_rows(&request).await?;
//! println!("{} plans", rows.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod rows;
pub mod store;

pub use compliance_content_types;
pub use error::ApiError;
pub use store::{ContentStore, OfflineStore};

use compliance_content_types::StoreErrorBody;
use reqwest::Client;

/// Path prefix of the PostgREST API on the store host.
pub const REST_PREFIX: &str = "/rest/v1";

/// A typed REST client for the content store.
///
/// Construct it once at startup and share it; it is cheap to clone
/// (the underlying connection pool is reference counted).
#[derive(Debug, Clone)]
pub struct ContentStoreClient {
    base_url: String,
    api_key: String,
    access_token: Option<String>,
    http: Client,
}

impl ContentStoreClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - store origin, e.g. `"https://project.example.co"`
    /// * `api_key` - the public (anon) key; sent as `apikey` and, unless an
    ///   access token is set, as the bearer credential
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            access_token: None,
            http: Client::new(),
        }
    }

    /// Use a user access token as the bearer credential instead of the key.
    pub fn set_access_token(&mut self, token: String) {
        self.access_token = Some(token);
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a GET request for a collection with auth applied.
    pub(crate) fn get(&self, collection: &str) -> Result<reqwest::RequestBuilder, ApiError> {
        Ok(self.apply_auth(self.http.get(self.collection_url(collection)?)))
    }

    /// Build a POST request for a collection with auth applied.
    pub(crate) fn post(&self, collection: &str) -> Result<reqwest::RequestBuilder, ApiError> {
        Ok(self.apply_auth(self.http.post(self.collection_url(collection)?)))
    }

    fn collection_url(&self, collection: &str) -> Result<String, ApiError> {
        if !is_valid_collection(collection) {
            return Err(ApiError::InvalidCollection(collection.to_string()));
        }
        Ok(format!("{}{REST_PREFIX}/{collection}", self.base_url))
    }

    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        builder
            .header("apikey", &self.api_key)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {bearer}"))
    }
}

/// Collection names are table identifiers: ASCII letters, digits, `_`.
pub fn is_valid_collection(collection: &str) -> bool {
    !collection.is_empty()
        && collection
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Map a non-success response to [`ApiError`].
pub(crate) async fn error_from_response(collection: &str, response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let body = StoreErrorBody::parse(&text);
    match status {
        401 => ApiError::NotAuthenticated,
        403 => ApiError::Forbidden(body.to_string()),
        404 => ApiError::MissingCollection {
            collection: collection.to_string(),
            detail: body.to_string(),
        },
        _ if body.is_missing_relation() => ApiError::MissingCollection {
            collection: collection.to_string(),
            detail: body.to_string(),
        },
        _ => ApiError::ServerError { status, body: text },
    }
}
