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

//! Site configuration loaded from environment variables.

use std::env;
use std::sync::Arc;

use compliance_content_client::{ContentStore, ContentStoreClient, OfflineStore};
use tracing::{info, warn};

/// Configuration for the content layer.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Remote content store. `None` runs the site on bundled content only.
    pub store: Option<StoreConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    /// Public (anonymous) API key sent with every request.
    pub api_key: String,
    /// Signed-in user's token, used as the bearer instead of the key.
    pub access_token: Option<String>,
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Optional
    /// - `CONTENT_STORE_URL` and `CONTENT_STORE_KEY`, set together
    /// - `CONTENT_STORE_ACCESS_TOKEN`
    pub fn from_env() -> Result<Self, String> {
        let store = match (non_empty("CONTENT_STORE_URL"), non_empty("CONTENT_STORE_KEY")) {
            (Some(url), Some(api_key)) => Some(StoreConfig {
                url,
                api_key,
                access_token: non_empty("CONTENT_STORE_ACCESS_TOKEN"),
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err("CONTENT_STORE_KEY required when CONTENT_STORE_URL is set".to_string())
            }
            (None, Some(_)) => {
                return Err("CONTENT_STORE_URL required when CONTENT_STORE_KEY is set".to_string())
            }
        };
        Ok(Self { store })
    }

    pub fn is_offline(&self) -> bool {
        self.store.is_none()
    }

    /// Build the store every component shares. Call once per process.
    pub fn build_store(&self) -> Arc<dyn ContentStore> {
        match &self.store {
            Some(store) => {
                let mut client = ContentStoreClient::new(&store.url, &store.api_key);
                if let Some(token) = &store.access_token {
                    client.set_access_token(token.clone());
                }
                info!("Content store configured at {}", client.base_url());
                Arc::new(client)
            }
            None => {
                warn!("CONTENT_STORE_URL not set, serving bundled content only");
                Arc::new(OfflineStore)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 3] = [
        "CONTENT_STORE_URL",
        "CONTENT_STORE_KEY",
        "CONTENT_STORE_ACCESS_TOKEN",
    ];

    fn clear() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn no_variables_means_offline() {
        clear();
        let config = Config::from_env().unwrap();
        assert!(config.is_offline());
    }

    #[test]
    #[serial]
    fn url_and_key_configure_the_store() {
        clear();
        env::set_var("CONTENT_STORE_URL", "https://content.example.com/");
        env::set_var("CONTENT_STORE_KEY", "anon-key");
        let config = Config::from_env().unwrap();
        clear();

        assert_eq!(
            config.store,
            Some(StoreConfig {
                url: "https://content.example.com/".to_string(),
                api_key: "anon-key".to_string(),
                access_token: None,
            })
        );
    }

    #[test]
    #[serial]
    fn url_without_key_is_an_error() {
        clear();
        env::set_var("CONTENT_STORE_URL", "https://content.example.com");
        let err = Config::from_env().unwrap_err();
        clear();
        assert!(err.contains("CONTENT_STORE_KEY"));
    }

    #[test]
    #[serial]
    fn key_without_url_is_an_error() {
        clear();
        env::set_var("CONTENT_STORE_KEY", "anon-key");
        env::set_var("CONTENT_STORE_URL", "   ");
        let err = Config::from_env().unwrap_err();
        clear();
        assert!(err.contains("CONTENT_STORE_URL"));
    }

    #[tokio::test]
    async fn offline_store_fails_reads() {
        let store = Config::default().build_store();
        let request = compliance_content_types::QueryRequest::new("faq_items");
        assert!(store.query(&request).await.is_err());
    }
}
