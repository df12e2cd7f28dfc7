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

//! Compliance Gap Checker results, persisted to collection `gap_assessments`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const GAP_ASSESSMENTS_COLLECTION: &str = "gap_assessments";

/// Severity bucket derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapLevel {
    Low,
    Moderate,
    Elevated,
    Critical,
}

impl GapLevel {
    /// `>= 80` Low, `>= 60` Moderate, `>= 40` Elevated, otherwise Critical.
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => GapLevel::Low,
            60..=79 => GapLevel::Moderate,
            40..=59 => GapLevel::Elevated,
            _ => GapLevel::Critical,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GapLevel::Low => "Low",
            GapLevel::Moderate => "Moderate",
            GapLevel::Elevated => "Elevated",
            GapLevel::Critical => "Critical",
        }
    }
}

/// One control area that scored at or below "initial" maturity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifiedGap {
    pub area: String,
    pub rating: u8,
    pub recommendation: String,
}

/// The JSON blob written once an assessment reaches its results step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAssessmentRecord {
    pub company_name: String,
    pub industry: String,
    pub company_size: String,
    pub contact_email: Option<String>,
    pub frameworks: Vec<String>,
    /// Control area key -> maturity rating (0-4).
    pub control_ratings: BTreeMap<String, u8>,
    /// Risk factor key -> answered "yes".
    pub risk_factors: BTreeMap<String, bool>,
    pub readiness_score: u8,
    pub risk_exposure: u8,
    pub overall_score: u8,
    pub gap_level: GapLevel,
    /// Framework key -> readiness (0-100).
    pub framework_scores: BTreeMap<String, u8>,
    pub gaps: Vec<IdentifiedGap>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_level_boundaries() {
        assert_eq!(GapLevel::from_score(100), GapLevel::Low);
        assert_eq!(GapLevel::from_score(80), GapLevel::Low);
        assert_eq!(GapLevel::from_score(79), GapLevel::Moderate);
        assert_eq!(GapLevel::from_score(60), GapLevel::Moderate);
        assert_eq!(GapLevel::from_score(59), GapLevel::Elevated);
        assert_eq!(GapLevel::from_score(40), GapLevel::Elevated);
        assert_eq!(GapLevel::from_score(39), GapLevel::Critical);
        assert_eq!(GapLevel::from_score(0), GapLevel::Critical);
    }

    #[test]
    fn gap_level_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&GapLevel::Elevated).unwrap(),
            "\"elevated\""
        );
    }
}
