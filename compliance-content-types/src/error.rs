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

//! Error body returned by the content store.
//!
//! PostgREST answers failed requests with `{ code, message, details, hint }`.
//! Every field is optional on the wire; a body that is not JSON at all is
//! kept verbatim in `message` by [`StoreErrorBody::parse`].

use serde::{Deserialize, Serialize};

/// PostgREST code for a relation that does not exist in the schema cache.
pub const MISSING_RELATION_CODES: [&str; 2] = ["PGRST205", "42P01"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreErrorBody {
    /// Machine-readable code (e.g. `"PGRST205"`, `"42501"`).
    pub code: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl StoreErrorBody {
    /// Parse a raw response body, falling back to the raw text as the message.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| Self {
            message: raw.trim().to_string(),
            ..Self::default()
        })
    }

    pub fn is_missing_relation(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|code| MISSING_RELATION_CODES.contains(&code))
    }
}

impl std::fmt::Display for StoreErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{code}] {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_postgrest_error() {
        let body = StoreErrorBody::parse(
            r#"{"code":"PGRST205","details":null,"hint":"Perhaps you meant 'pricing'","message":"Could not find the table 'public.pricing_plans' in the schema cache"}"#,
        );
        assert!(body.is_missing_relation());
        assert_eq!(body.hint.as_deref(), Some("Perhaps you meant 'pricing'"));
        assert!(body.to_string().starts_with("[PGRST205] Could not find"));
    }

    #[test]
    fn non_json_body_is_kept_as_message() {
        let body = StoreErrorBody::parse("  upstream connect error  ");
        assert_eq!(body.code, None);
        assert_eq!(body.message, "upstream connect error");
        assert!(!body.is_missing_relation());
    }
}
