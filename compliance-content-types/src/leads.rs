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

//! Lead-capture rows written by the contact and demo forms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which form produced a lead. Each kind writes to its own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadKind {
    Contact,
    Demo,
}

impl LeadKind {
    pub fn collection(self) -> &'static str {
        match self {
            LeadKind::Contact => "contact_submissions",
            LeadKind::Demo => "demo_requests",
        }
    }
}

/// Columns the row sets itself or the store assigns; no form field may use them.
pub const RESERVED_COLUMNS: [&str; 2] = ["id", "submitted_at"];

/// Row inserted for one form submission. The collection identifies the form.
///
/// Form fields are flattened into the row so each one lands in its own column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    /// RFC 3339 timestamp of the submission.
    pub submitted_at: String,
}
