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

//! Contact and demo-request forms.
//!
//! The only client-side validation is required-field presence. A submission
//! is a single insert; on success the form is cleared, on failure the
//! entered values are kept so the visitor can resubmit.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use compliance_content_client::ContentStore;
use compliance_content_types::leads::{LeadKind, LeadSubmission, RESERVED_COLUMNS};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown form field: {0}")]
    UnknownField(String),

    #[error("form field name is reserved: {0}")]
    ReservedField(&'static str),

    #[error("form field appears twice: {0}")]
    DuplicateField(&'static str),

    #[error("please fill in: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),

    #[error("could not encode submission: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Toast shown after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: &str, message: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(title: &str, message: String) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.to_string(),
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    value: String,
}

impl FormField {
    pub fn required(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            required: true,
            value: String::new(),
        }
    }

    pub fn optional(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            required: false,
            value: String::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whitespace-only input counts as empty.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

#[derive(Debug)]
pub struct LeadForm {
    kind: LeadKind,
    fields: Vec<FormField>,
    submitting: watch::Sender<bool>,
}

impl LeadForm {
    /// Build a form from custom fields. Names must be unique and must not
    /// shadow a column the submission row sets itself.
    pub fn new(kind: LeadKind, fields: Vec<FormField>) -> Result<Self, FormError> {
        let mut seen = BTreeSet::new();
        for field in &fields {
            if RESERVED_COLUMNS.contains(&field.name) {
                return Err(FormError::ReservedField(field.name));
            }
            if !seen.insert(field.name) {
                return Err(FormError::DuplicateField(field.name));
            }
        }
        Ok(Self::from_fields(kind, fields))
    }

    fn from_fields(kind: LeadKind, fields: Vec<FormField>) -> Self {
        let (submitting, _) = watch::channel(false);
        Self {
            kind,
            fields,
            submitting,
        }
    }

    pub fn contact() -> Self {
        Self::from_fields(
            LeadKind::Contact,
            vec![
                FormField::required("name", "Full name"),
                FormField::required("email", "Work email"),
                FormField::optional("company", "Company"),
                FormField::optional("phone", "Phone"),
                FormField::optional("subject", "Subject"),
                FormField::required("message", "How can we help?"),
            ],
        )
    }

    pub fn demo() -> Self {
        Self::from_fields(
            LeadKind::Demo,
            vec![
                FormField::required("first_name", "First name"),
                FormField::required("last_name", "Last name"),
                FormField::required("email", "Work email"),
                FormField::required("company", "Company"),
                FormField::optional("job_title", "Job title"),
                FormField::optional("company_size", "Company size"),
                FormField::optional("frameworks", "Frameworks of interest"),
                FormField::optional("message", "Anything else?"),
            ],
        )
    }

    pub fn kind(&self) -> LeadKind {
        self.kind
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn is_submitting(&self) -> bool {
        *self.submitting.borrow()
    }

    /// Receiver that flips to `true` while a write is in flight.
    pub fn subscribe_submitting(&self) -> watch::Receiver<bool> {
        self.submitting.subscribe()
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).map(FormField::value)
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field = self
            .fields
            .iter_mut()
            .find(|field| field.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        field.value = value.into();
        Ok(())
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|field| field.required && field.is_blank())
            .map(|field| field.name)
            .collect()
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingRequired(missing))
        }
    }

    /// The row that [`submit`](Self::submit) writes, with trimmed values.
    pub fn to_submission(&self) -> LeadSubmission {
        let fields: BTreeMap<String, String> = self
            .fields
            .iter()
            .map(|field| (field.name.to_string(), field.value.trim().to_string()))
            .collect();
        LeadSubmission {
            fields,
            submitted_at: Utc::now().to_rfc3339(),
        }
    }

    /// Validate, then issue exactly one insert.
    ///
    /// Returns `Err` only when validation blocks the submission, in which
    /// case nothing is written and `submitting` never changes. Otherwise the
    /// outcome of the write is reported as a [`Notification`], and
    /// `submitting` reads `true` for the duration of the write.
    pub async fn submit(&mut self, store: &dyn ContentStore) -> Result<Notification, FormError> {
        self.validate()?;
        let row = serde_json::to_value(self.to_submission())?;

        let Self {
            kind,
            fields,
            submitting,
        } = self;
        let collection = kind.collection();

        let outcome = {
            let _guard = SubmittingGuard::engage(submitting);
            store.insert(collection, row).await
        };

        match outcome {
            Ok(()) => {
                info!(collection, "Lead submitted");
                for field in fields.iter_mut() {
                    field.value.clear();
                }
                Ok(Notification::success(
                    "Message sent",
                    "Thanks! Our team will get back to you within one business day.",
                ))
            }
            Err(err) => {
                warn!(collection, error = %err, "Lead submission failed");
                Ok(Notification::error(
                    "Submission failed",
                    format!("We couldn't send your request: {err}"),
                ))
            }
        }
    }

    fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Holds `submitting` true for its lifetime, including when the submit
/// future is dropped mid-flight.
struct SubmittingGuard<'a>(&'a watch::Sender<bool>);

impl<'a> SubmittingGuard<'a> {
    fn engage(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}
