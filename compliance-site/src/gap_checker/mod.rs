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

//! Compliance Gap Checker: a five-step self assessment.
//!
//! The visitor describes their organization, picks target frameworks, rates
//! control maturity and answers risk questions. Reaching
//! [`GapStep::Results`] computes a [`GapReport`]; [`GapChecker::persist`]
//! then records it in the content store.

mod scoring;

pub use scoring::{
    control_area, risk_factor, ControlArea, Framework, GapReport, RiskFactor, CONTROL_AREAS,
    GAP_THRESHOLD, MAX_RATING, RISK_FACTORS,
};

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::Utc;
use compliance_content_client::ContentStore;
use compliance_content_types::assessment::{GapAssessmentRecord, GAP_ASSESSMENTS_COLLECTION};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum GapCheckError {
    #[error("{step} step is incomplete: {reason}")]
    Incomplete { step: GapStep, reason: String },

    #[error("unknown control area: {0}")]
    UnknownControl(String),

    #[error("unknown risk factor: {0}")]
    UnknownRisk(String),

    #[error("rating {0} is out of range (0-4)")]
    InvalidRating(u8),

    #[error("answers are locked on the results step, go back to change them")]
    ResultsLocked,

    #[error("assessment has no results yet")]
    NotFinished,

    #[error("could not encode assessment: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not save assessment: {0}")]
    Save(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GapStep {
    Organization,
    Frameworks,
    Controls,
    Risks,
    Results,
}

impl GapStep {
    pub const ALL: [GapStep; 5] = [
        GapStep::Organization,
        GapStep::Frameworks,
        GapStep::Controls,
        GapStep::Risks,
        GapStep::Results,
    ];

    /// Zero-based position, for progress indicators.
    pub fn index(self) -> usize {
        self as usize
    }

    fn following(self) -> Option<GapStep> {
        GapStep::ALL.get(self.index() + 1).copied()
    }

    fn preceding(self) -> Option<GapStep> {
        self.index().checked_sub(1).map(|i| GapStep::ALL[i])
    }
}

impl fmt::Display for GapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GapStep::Organization => "organization",
            GapStep::Frameworks => "frameworks",
            GapStep::Controls => "controls",
            GapStep::Risks => "risks",
            GapStep::Results => "results",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationProfile {
    pub company_name: String,
    pub industry: String,
    pub company_size: String,
    pub contact_email: Option<String>,
}

impl OrganizationProfile {
    fn missing(&self) -> Vec<&'static str> {
        [
            ("company_name", &self.company_name),
            ("industry", &self.industry),
            ("company_size", &self.company_size),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone)]
pub struct GapChecker {
    step: GapStep,
    profile: OrganizationProfile,
    frameworks: BTreeSet<Framework>,
    ratings: BTreeMap<&'static str, u8>,
    risks: BTreeMap<&'static str, bool>,
    report: Option<GapReport>,
    saved: bool,
}

impl Default for GapChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl GapChecker {
    pub fn new() -> Self {
        Self {
            step: GapStep::Organization,
            profile: OrganizationProfile::default(),
            frameworks: BTreeSet::new(),
            ratings: BTreeMap::new(),
            risks: BTreeMap::new(),
            report: None,
            saved: false,
        }
    }

    pub fn step(&self) -> GapStep {
        self.step
    }

    pub fn profile(&self) -> &OrganizationProfile {
        &self.profile
    }

    pub fn set_profile(&mut self, profile: OrganizationProfile) -> Result<(), GapCheckError> {
        self.ensure_editable()?;
        self.profile = profile;
        Ok(())
    }

    pub fn frameworks(&self) -> &BTreeSet<Framework> {
        &self.frameworks
    }

    /// Select or deselect a target framework.
    pub fn toggle_framework(&mut self, framework: Framework) -> Result<(), GapCheckError> {
        self.ensure_editable()?;
        if !self.frameworks.remove(&framework) {
            self.frameworks.insert(framework);
        }
        Ok(())
    }

    pub fn rate(&mut self, area: &str, rating: u8) -> Result<(), GapCheckError> {
        self.ensure_editable()?;
        let area = control_area(area).ok_or_else(|| GapCheckError::UnknownControl(area.into()))?;
        if rating > MAX_RATING {
            return Err(GapCheckError::InvalidRating(rating));
        }
        self.ratings.insert(area.key, rating);
        Ok(())
    }

    pub fn rating(&self, area: &str) -> Option<u8> {
        self.ratings.get(area).copied()
    }

    pub fn answer_risk(&mut self, factor: &str, present: bool) -> Result<(), GapCheckError> {
        self.ensure_editable()?;
        let factor = risk_factor(factor).ok_or_else(|| GapCheckError::UnknownRisk(factor.into()))?;
        self.risks.insert(factor.key, present);
        Ok(())
    }

    /// The report is computed from the answers on entering results, so they
    /// stay frozen until [`back`](Self::back) discards it.
    fn ensure_editable(&self) -> Result<(), GapCheckError> {
        if self.step == GapStep::Results {
            Err(GapCheckError::ResultsLocked)
        } else {
            Ok(())
        }
    }

    /// Why the current step cannot be left yet, if it cannot.
    pub fn incomplete_reason(&self) -> Option<String> {
        match self.step {
            GapStep::Organization => {
                let missing = self.profile.missing();
                (!missing.is_empty()).then(|| format!("missing {}", missing.join(", ")))
            }
            GapStep::Frameworks => self
                .frameworks
                .is_empty()
                .then(|| "select at least one framework".to_string()),
            GapStep::Controls => {
                let unrated = CONTROL_AREAS
                    .iter()
                    .filter(|area| !self.ratings.contains_key(area.key))
                    .count();
                (unrated > 0).then(|| format!("{unrated} control areas are unrated"))
            }
            GapStep::Risks => {
                let unanswered = RISK_FACTORS
                    .iter()
                    .filter(|factor| !self.risks.contains_key(factor.key))
                    .count();
                (unanswered > 0).then(|| format!("{unanswered} risk questions are unanswered"))
            }
            GapStep::Results => Some("already at the last step".to_string()),
        }
    }

    /// Advance one step. Entering [`GapStep::Results`] computes the report.
    pub fn next(&mut self) -> Result<GapStep, GapCheckError> {
        if let Some(reason) = self.incomplete_reason() {
            return Err(GapCheckError::Incomplete {
                step: self.step,
                reason,
            });
        }
        let Some(next) = self.step.following() else {
            return Err(GapCheckError::Incomplete {
                step: self.step,
                reason: "already at the last step".to_string(),
            });
        };
        if next == GapStep::Results {
            let report = scoring::score(&self.ratings, &self.risks, &self.frameworks);
            debug!(overall = report.overall_score, "Gap assessment scored");
            self.report = Some(report);
            self.saved = false;
        }
        self.step = next;
        Ok(next)
    }

    /// Step back; leaving results discards them so edits are rescored.
    pub fn back(&mut self) -> GapStep {
        if let Some(previous) = self.step.preceding() {
            if self.step == GapStep::Results {
                self.report = None;
                self.saved = false;
            }
            self.step = previous;
        }
        self.step
    }

    pub fn report(&self) -> Option<&GapReport> {
        self.report.as_ref()
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// The row written by [`persist`](Self::persist).
    pub fn record(&self) -> Result<GapAssessmentRecord, GapCheckError> {
        let report = self.report.as_ref().ok_or(GapCheckError::NotFinished)?;
        let contact_email = self
            .profile
            .contact_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string);

        Ok(GapAssessmentRecord {
            company_name: self.profile.company_name.trim().to_string(),
            industry: self.profile.industry.trim().to_string(),
            company_size: self.profile.company_size.trim().to_string(),
            contact_email,
            frameworks: self.frameworks.iter().map(|fw| fw.key().to_string()).collect(),
            control_ratings: self
                .ratings
                .iter()
                .map(|(key, rating)| (key.to_string(), *rating))
                .collect(),
            risk_factors: self
                .risks
                .iter()
                .map(|(key, present)| (key.to_string(), *present))
                .collect(),
            readiness_score: report.readiness_score,
            risk_exposure: report.risk_exposure,
            overall_score: report.overall_score,
            gap_level: report.gap_level,
            framework_scores: report
                .framework_scores
                .iter()
                .map(|(fw, score)| (fw.key().to_string(), *score))
                .collect(),
            gaps: report.gaps.clone(),
            created_at: Utc::now().to_rfc3339(),
        })
    }

    /// Save the finished assessment. Writes at most once per report; after a
    /// failed write the next call tries again.
    pub async fn persist(&mut self, store: &dyn ContentStore) -> Result<(), GapCheckError> {
        if self.saved {
            return Ok(());
        }
        let row = serde_json::to_value(self.record()?)?;
        match store.insert(GAP_ASSESSMENTS_COLLECTION, row).await {
            Ok(()) => {
                info!("Gap assessment saved");
                self.saved = true;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Failed to save gap assessment");
                Err(GapCheckError::Save(err.to_string()))
            }
        }
    }

    /// Start over.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use compliance_content_client::ApiError;
    use compliance_content_types::QueryRequest;
    use serde_json::Value;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        fail_next: Mutex<bool>,
        inserts: Mutex<Vec<(String, Value)>>,
    }

    #[async_trait]
    impl ContentStore for RecordingStore {
        async fn query(&self, _request: &QueryRequest) -> Result<Vec<Value>, ApiError> {
            Ok(Vec::new())
        }

        async fn insert(&self, collection: &str, row: Value) -> Result<(), ApiError> {
            if std::mem::take(&mut *self.fail_next.lock().unwrap()) {
                return Err(ApiError::ServerError {
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }
            self.inserts
                .lock()
                .unwrap()
                .push((collection.to_string(), row));
            Ok(())
        }
    }

    fn completed_checker() -> GapChecker {
        let mut checker = GapChecker::new();
        checker
            .set_profile(OrganizationProfile {
                company_name: "Acme Health".to_string(),
                industry: "Healthcare".to_string(),
                company_size: "51-200".to_string(),
                contact_email: Some(" ciso@acme.test ".to_string()),
            })
            .unwrap();
        checker.next().unwrap();
        checker.toggle_framework(Framework::Hipaa).unwrap();
        checker.next().unwrap();
        for area in CONTROL_AREAS {
            checker.rate(area.key, 3).unwrap();
        }
        checker.rate("access_control", 1).unwrap();
        checker.next().unwrap();
        for factor in RISK_FACTORS {
            checker.answer_risk(factor.key, false).unwrap();
        }
        checker.answer_risk("handles_sensitive_data", true).unwrap();
        assert_eq!(checker.next().unwrap(), GapStep::Results);
        checker
    }

    #[test]
    fn cannot_advance_past_incomplete_organization() {
        let mut checker = GapChecker::new();
        checker
            .set_profile(OrganizationProfile {
                company_name: "Acme".to_string(),
                industry: "  ".to_string(),
                ..Default::default()
            })
            .unwrap();
        let err = checker.next().unwrap_err();
        assert!(matches!(
            err,
            GapCheckError::Incomplete { step: GapStep::Organization, ref reason }
                if reason.contains("industry") && reason.contains("company_size")
        ));
        assert_eq!(checker.step(), GapStep::Organization);
    }

    #[test]
    fn frameworks_step_needs_a_selection() {
        let mut checker = GapChecker::new();
        checker
            .set_profile(OrganizationProfile {
                company_name: "Acme".to_string(),
                industry: "Fintech".to_string(),
                company_size: "1-50".to_string(),
                contact_email: None,
            })
            .unwrap();
        checker.next().unwrap();
        assert!(checker.next().is_err());
        checker.toggle_framework(Framework::Soc2).unwrap();
        checker.toggle_framework(Framework::Soc2).unwrap();
        assert!(checker.next().is_err());
        checker.toggle_framework(Framework::PciDss).unwrap();
        assert_eq!(checker.next().unwrap(), GapStep::Controls);
    }

    #[test]
    fn ratings_are_validated() {
        let mut checker = GapChecker::new();
        assert!(matches!(
            checker.rate("access_control", 5),
            Err(GapCheckError::InvalidRating(5))
        ));
        assert!(matches!(
            checker.rate("quantum_readiness", 2),
            Err(GapCheckError::UnknownControl(_))
        ));
        assert!(matches!(
            checker.answer_risk("aliens", true),
            Err(GapCheckError::UnknownRisk(_))
        ));
        checker.rate("policies", 4).unwrap();
        assert_eq!(checker.rating("policies"), Some(4));
    }

    #[test]
    fn results_carry_a_report_and_gaps() {
        let checker = completed_checker();
        let report = checker.report().unwrap();
        assert_eq!(report.gaps.len(), 1);
        assert_eq!(report.gaps[0].area, "Access Control");
        assert!(report.framework_scores.contains_key(&Framework::Hipaa));

        let record = checker.record().unwrap();
        assert_eq!(record.contact_email.as_deref(), Some("ciso@acme.test"));
        assert_eq!(record.frameworks, vec!["hipaa"]);
        assert_eq!(record.control_ratings["access_control"], 1);
        assert!(record.risk_factors["handles_sensitive_data"]);
    }

    #[test]
    fn answers_are_locked_on_results() {
        let mut checker = completed_checker();
        let before = checker.record().unwrap();

        assert!(matches!(
            checker.rate("access_control", 4),
            Err(GapCheckError::ResultsLocked)
        ));
        assert!(matches!(
            checker.answer_risk("prior_incident", true),
            Err(GapCheckError::ResultsLocked)
        ));
        assert!(matches!(
            checker.toggle_framework(Framework::Gdpr),
            Err(GapCheckError::ResultsLocked)
        ));
        assert!(matches!(
            checker.set_profile(OrganizationProfile::default()),
            Err(GapCheckError::ResultsLocked)
        ));

        let after = checker.record().unwrap();
        assert_eq!(after.control_ratings, before.control_ratings);
        assert_eq!(after.risk_factors, before.risk_factors);
        assert_eq!(after.frameworks, vec!["hipaa"]);
        assert_eq!(after.company_name, "Acme Health");
        assert_eq!(after.overall_score, before.overall_score);
    }

    #[test]
    fn edits_after_going_back_are_rescored() {
        let mut checker = completed_checker();
        let first = checker.report().unwrap().readiness_score;

        checker.back();
        checker.back();
        assert_eq!(checker.step(), GapStep::Controls);
        for area in CONTROL_AREAS {
            checker.rate(area.key, 0).unwrap();
        }
        checker.next().unwrap();
        checker.next().unwrap();

        let record = checker.record().unwrap();
        assert!(record.readiness_score < first);
        assert_eq!(record.readiness_score, 0);
        assert_eq!(record.control_ratings["access_control"], 0);
    }

    #[test]
    fn leaving_results_discards_the_report() {
        let mut checker = completed_checker();
        assert_eq!(checker.back(), GapStep::Risks);
        assert!(checker.report().is_none());
        assert!(matches!(checker.record(), Err(GapCheckError::NotFinished)));
        checker.back();
        checker.back();
        checker.back();
        assert_eq!(checker.back(), GapStep::Organization);
    }

    #[tokio::test]
    async fn persist_writes_once() {
        let store = RecordingStore::default();
        let mut checker = completed_checker();
        checker.persist(&store).await.unwrap();
        checker.persist(&store).await.unwrap();
        assert!(checker.is_saved());

        let inserts = store.inserts.lock().unwrap();
        assert_eq!(inserts.len(), 1);
        assert_eq!(inserts[0].0, GAP_ASSESSMENTS_COLLECTION);
        assert_eq!(inserts[0].1["company_name"], "Acme Health");
    }

    #[tokio::test]
    async fn failed_save_is_retried() {
        let store = RecordingStore::default();
        *store.fail_next.lock().unwrap() = true;
        let mut checker = completed_checker();

        assert!(matches!(
            checker.persist(&store).await,
            Err(GapCheckError::Save(_))
        ));
        assert!(!checker.is_saved());

        checker.persist(&store).await.unwrap();
        assert!(checker.is_saved());
        assert_eq!(store.inserts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn persist_before_results_fails() {
        let store = RecordingStore::default();
        let mut checker = GapChecker::new();
        assert!(matches!(
            checker.persist(&store).await,
            Err(GapCheckError::NotFinished)
        ));
        assert!(store.inserts.lock().unwrap().is_empty());
    }
}
