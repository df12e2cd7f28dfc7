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

//! Weighted scoring for the gap checker.

use std::collections::{BTreeMap, BTreeSet};

use compliance_content_types::assessment::{GapLevel, IdentifiedGap};
use serde::Serialize;

/// Highest maturity rating ("optimized").
pub const MAX_RATING: u8 = 4;

/// Areas rated at or below this are reported as gaps.
pub const GAP_THRESHOLD: u8 = 1;

const READINESS_SHARE: f64 = 0.7;
const RISK_SHARE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlArea {
    pub key: &'static str,
    pub label: &'static str,
    pub weight: f64,
    pub recommendation: &'static str,
}

pub static CONTROL_AREAS: [ControlArea; 10] = [
    ControlArea {
        key: "access_control",
        label: "Access Control",
        weight: 1.5,
        recommendation: "Enforce MFA everywhere and run quarterly access reviews.",
    },
    ControlArea {
        key: "data_protection",
        label: "Data Protection & Encryption",
        weight: 1.5,
        recommendation: "Encrypt data at rest and in transit and classify sensitive data stores.",
    },
    ControlArea {
        key: "incident_response",
        label: "Incident Response",
        weight: 1.25,
        recommendation: "Write an incident response plan with named owners and rehearse it.",
    },
    ControlArea {
        key: "risk_management",
        label: "Risk Management",
        weight: 1.0,
        recommendation: "Run an annual risk assessment and track treatment in a risk register.",
    },
    ControlArea {
        key: "vendor_management",
        label: "Vendor Management",
        weight: 0.75,
        recommendation: "Inventory vendors and collect security reviews for critical ones.",
    },
    ControlArea {
        key: "business_continuity",
        label: "Business Continuity & Backups",
        weight: 1.0,
        recommendation: "Test backup restores and document recovery time objectives.",
    },
    ControlArea {
        key: "security_awareness",
        label: "Security Awareness Training",
        weight: 0.75,
        recommendation: "Roll out onboarding and annual training with phishing simulations.",
    },
    ControlArea {
        key: "change_management",
        label: "Change Management",
        weight: 0.75,
        recommendation: "Require peer review and approval for every production change.",
    },
    ControlArea {
        key: "logging_monitoring",
        label: "Logging & Monitoring",
        weight: 1.0,
        recommendation: "Centralize logs and alert on suspicious activity.",
    },
    ControlArea {
        key: "policies",
        label: "Policies & Governance",
        weight: 1.0,
        recommendation: "Adopt a core policy set and review it every year.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskFactor {
    pub key: &'static str,
    pub label: &'static str,
    pub weight: f64,
}

pub static RISK_FACTORS: [RiskFactor; 6] = [
    RiskFactor {
        key: "handles_sensitive_data",
        label: "Stores health, payment or personal data",
        weight: 1.5,
    },
    RiskFactor {
        key: "prior_incident",
        label: "Had a security incident in the last 24 months",
        weight: 1.5,
    },
    RiskFactor {
        key: "no_security_team",
        label: "No dedicated security staff",
        weight: 1.25,
    },
    RiskFactor {
        key: "remote_workforce",
        label: "Mostly remote workforce",
        weight: 1.0,
    },
    RiskFactor {
        key: "legacy_systems",
        label: "Runs unsupported legacy systems",
        weight: 1.0,
    },
    RiskFactor {
        key: "many_vendors",
        label: "Relies on more than 20 SaaS vendors",
        weight: 0.75,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Framework {
    Soc2,
    Iso27001,
    Hipaa,
    PciDss,
    Gdpr,
    NistCsf,
}

impl Framework {
    pub const ALL: [Framework; 6] = [
        Framework::Soc2,
        Framework::Iso27001,
        Framework::Hipaa,
        Framework::PciDss,
        Framework::Gdpr,
        Framework::NistCsf,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Framework::Soc2 => "soc2",
            Framework::Iso27001 => "iso27001",
            Framework::Hipaa => "hipaa",
            Framework::PciDss => "pci_dss",
            Framework::Gdpr => "gdpr",
            Framework::NistCsf => "nist_csf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Framework::Soc2 => "SOC 2",
            Framework::Iso27001 => "ISO 27001",
            Framework::Hipaa => "HIPAA",
            Framework::PciDss => "PCI DSS",
            Framework::Gdpr => "GDPR",
            Framework::NistCsf => "NIST CSF",
        }
    }

    pub fn from_key(key: &str) -> Option<Framework> {
        Framework::ALL.into_iter().find(|fw| fw.key() == key)
    }

    /// How much more this framework leans on an area than the baseline.
    pub fn emphasis(self, area: &str) -> f64 {
        let emphasized: &[(&str, f64)] = match self {
            Framework::Soc2 => &[
                ("change_management", 1.5),
                ("logging_monitoring", 1.5),
                ("vendor_management", 1.25),
            ],
            Framework::Iso27001 => &[("risk_management", 2.0), ("policies", 1.5)],
            Framework::Hipaa => &[
                ("data_protection", 2.0),
                ("access_control", 1.5),
                ("security_awareness", 1.25),
            ],
            Framework::PciDss => &[
                ("data_protection", 2.0),
                ("access_control", 1.5),
                ("logging_monitoring", 1.5),
            ],
            Framework::Gdpr => &[
                ("data_protection", 2.0),
                ("vendor_management", 1.5),
                ("incident_response", 1.25),
            ],
            Framework::NistCsf => &[
                ("incident_response", 1.5),
                ("business_continuity", 1.5),
                ("logging_monitoring", 1.25),
            ],
        };
        emphasized
            .iter()
            .find(|(key, _)| *key == area)
            .map_or(1.0, |(_, factor)| *factor)
    }
}

/// Computed results of a completed assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapReport {
    pub readiness_score: u8,
    pub risk_exposure: u8,
    pub overall_score: u8,
    pub gap_level: GapLevel,
    pub framework_scores: BTreeMap<Framework, u8>,
    pub gaps: Vec<IdentifiedGap>,
}

pub fn control_area(key: &str) -> Option<&'static ControlArea> {
    CONTROL_AREAS.iter().find(|area| area.key == key)
}

pub fn risk_factor(key: &str) -> Option<&'static RiskFactor> {
    RISK_FACTORS.iter().find(|factor| factor.key == key)
}

/// Weighted average of `rating / MAX_RATING`, as a 0-100 score.
/// Unrated areas count as zero.
fn weighted_readiness(
    ratings: &BTreeMap<&str, u8>,
    weight_of: impl Fn(&ControlArea) -> f64,
) -> f64 {
    let (earned, total) = CONTROL_AREAS
        .iter()
        .fold((0.0, 0.0), |(earned, total), area| {
            let weight = weight_of(area);
            let rating = ratings.get(area.key).copied().unwrap_or(0).min(MAX_RATING);
            (
                earned + weight * f64::from(rating) / f64::from(MAX_RATING),
                total + weight,
            )
        });
    if total == 0.0 {
        0.0
    } else {
        earned / total * 100.0
    }
}

/// Share of weighted risk factors answered "yes", as a 0-100 score.
fn risk_exposure(answers: &BTreeMap<&str, bool>) -> f64 {
    let total: f64 = RISK_FACTORS.iter().map(|factor| factor.weight).sum();
    let present: f64 = RISK_FACTORS
        .iter()
        .filter(|factor| answers.get(factor.key).copied().unwrap_or(false))
        .map(|factor| factor.weight)
        .sum();
    present / total * 100.0
}

fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

pub fn score(
    ratings: &BTreeMap<&str, u8>,
    risks: &BTreeMap<&str, bool>,
    frameworks: &BTreeSet<Framework>,
) -> GapReport {
    let readiness = weighted_readiness(ratings, |area| area.weight);
    let exposure = risk_exposure(risks);
    let overall = to_score(READINESS_SHARE * readiness + RISK_SHARE * (100.0 - exposure));

    let framework_scores = frameworks
        .iter()
        .map(|&framework| {
            let readiness =
                weighted_readiness(ratings, |area| area.weight * framework.emphasis(area.key));
            (framework, to_score(readiness))
        })
        .collect();

    let mut weak: Vec<&ControlArea> = CONTROL_AREAS
        .iter()
        .filter(|area| ratings.get(area.key).copied().unwrap_or(0) <= GAP_THRESHOLD)
        .collect();
    // Heaviest first; stable sort keeps table order among equals.
    weak.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    let gaps = weak
        .into_iter()
        .map(|area| IdentifiedGap {
            area: area.label.to_string(),
            rating: ratings.get(area.key).copied().unwrap_or(0),
            recommendation: area.recommendation.to_string(),
        })
        .collect();

    GapReport {
        readiness_score: to_score(readiness),
        risk_exposure: to_score(exposure),
        overall_score: overall,
        gap_level: GapLevel::from_score(overall),
        framework_scores,
        gaps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(rating: u8) -> BTreeMap<&'static str, u8> {
        CONTROL_AREAS.iter().map(|area| (area.key, rating)).collect()
    }

    fn no_risks() -> BTreeMap<&'static str, bool> {
        RISK_FACTORS.iter().map(|factor| (factor.key, false)).collect()
    }

    fn all_risks() -> BTreeMap<&'static str, bool> {
        RISK_FACTORS.iter().map(|factor| (factor.key, true)).collect()
    }

    #[test]
    fn perfect_maturity_and_no_risk_scores_100() {
        let frameworks = BTreeSet::from([Framework::Soc2, Framework::Hipaa]);
        let report = score(&uniform(MAX_RATING), &no_risks(), &frameworks);
        assert_eq!(report.readiness_score, 100);
        assert_eq!(report.risk_exposure, 0);
        assert_eq!(report.overall_score, 100);
        assert_eq!(report.gap_level, GapLevel::Low);
        assert!(report.gaps.is_empty());
        assert_eq!(report.framework_scores[&Framework::Soc2], 100);
        assert_eq!(report.framework_scores[&Framework::Hipaa], 100);
    }

    #[test]
    fn nothing_in_place_and_every_risk_scores_0() {
        let report = score(&uniform(0), &all_risks(), &BTreeSet::new());
        assert_eq!(report.readiness_score, 0);
        assert_eq!(report.risk_exposure, 100);
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.gap_level, GapLevel::Critical);
        assert_eq!(report.gaps.len(), CONTROL_AREAS.len());
        assert!(report.framework_scores.is_empty());
    }

    #[test]
    fn uniform_half_maturity_blends_readiness_and_risk() {
        // readiness 50, exposure 0 -> 0.7 * 50 + 0.3 * 100 = 65
        let report = score(&uniform(2), &no_risks(), &BTreeSet::new());
        assert_eq!(report.readiness_score, 50);
        assert_eq!(report.overall_score, 65);
        assert_eq!(report.gap_level, GapLevel::Moderate);
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn readiness_is_weighted_by_area() {
        let mut ratings = uniform(0);
        ratings.insert("access_control", MAX_RATING);
        let strong_heavy = score(&ratings, &no_risks(), &BTreeSet::new());

        let mut ratings = uniform(0);
        ratings.insert("vendor_management", MAX_RATING);
        let strong_light = score(&ratings, &no_risks(), &BTreeSet::new());

        assert!(strong_heavy.readiness_score > strong_light.readiness_score);
    }

    #[test]
    fn frameworks_weigh_their_emphasized_areas() {
        let mut ratings = uniform(2);
        ratings.insert("data_protection", 0);
        let frameworks = BTreeSet::from([Framework::Hipaa, Framework::Iso27001]);
        let report = score(&ratings, &no_risks(), &frameworks);
        assert!(
            report.framework_scores[&Framework::Hipaa]
                < report.framework_scores[&Framework::Iso27001]
        );
    }

    #[test]
    fn gaps_are_heaviest_first_with_recommendations() {
        let mut ratings = uniform(3);
        ratings.insert("vendor_management", 1);
        ratings.insert("access_control", 0);
        ratings.insert("incident_response", 1);
        let report = score(&ratings, &no_risks(), &BTreeSet::new());

        let areas: Vec<_> = report.gaps.iter().map(|gap| gap.area.as_str()).collect();
        assert_eq!(
            areas,
            ["Access Control", "Incident Response", "Vendor Management"]
        );
        assert_eq!(report.gaps[0].rating, 0);
        assert!(!report.gaps[0].recommendation.is_empty());
    }

    #[test]
    fn framework_keys_round_trip() {
        for framework in Framework::ALL {
            assert_eq!(Framework::from_key(framework.key()), Some(framework));
        }
        assert_eq!(Framework::from_key("fedramp"), None);
    }
}
