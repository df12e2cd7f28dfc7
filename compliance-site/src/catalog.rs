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

//! Bundled fallback content for every remotely-driven section.

use compliance_content_types::{CarouselText, FaqItem, HeroStat, PricingPlan, ResourceItem};

use crate::fallback::FallbackCatalog;

fn features(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub fn pricing_plans() -> FallbackCatalog<PricingPlan> {
    FallbackCatalog::new(
        PricingPlan {
            name: "Starter".to_string(),
            price: "499".to_string(),
            period: Some("month".to_string()),
            description: "For startups preparing for their first audit".to_string(),
            features: features(&[
                "One compliance framework",
                "Automated evidence collection",
                "Policy templates",
                "Email support",
            ]),
            highlighted: false,
            cta_label: "Start Free Trial".to_string(),
            sort_order: 1,
        },
        [
            PricingPlan {
                name: "Professional".to_string(),
                price: "1,299".to_string(),
                period: Some("month".to_string()),
                description: "For growing teams running several frameworks".to_string(),
                features: features(&[
                    "Up to four frameworks",
                    "Continuous control monitoring",
                    "Vendor risk management",
                    "Auditor workspace",
                    "Priority support",
                ]),
                highlighted: true,
                cta_label: "Start Free Trial".to_string(),
                sort_order: 2,
            },
            PricingPlan {
                name: "Enterprise".to_string(),
                price: "Custom".to_string(),
                period: None,
                description: "For regulated organizations with complex requirements".to_string(),
                features: features(&[
                    "Unlimited frameworks",
                    "Custom control mapping",
                    "Dedicated compliance manager",
                    "SSO and audit logs",
                    "On-premise evidence connectors",
                ]),
                highlighted: false,
                cta_label: "Contact Sales".to_string(),
                sort_order: 3,
            },
        ],
    )
}

pub fn carousel_texts() -> FallbackCatalog<CarouselText> {
    FallbackCatalog::new(
        CarouselText {
            title: "Get audit-ready in weeks, not months".to_string(),
            subtitle: "Automate evidence collection across SOC 2, ISO 27001 and HIPAA."
                .to_string(),
            highlight: Some("weeks".to_string()),
            sort_order: 1,
        },
        [
            CarouselText {
                title: "Continuous compliance, not a yearly scramble".to_string(),
                subtitle: "Monitor every control around the clock and fix drift before auditors find it."
                    .to_string(),
                highlight: Some("Continuous".to_string()),
                sort_order: 2,
            },
            CarouselText {
                title: "Stop ransomware before it stops you".to_string(),
                subtitle: "Assess your exposure and close the gaps attackers look for first."
                    .to_string(),
                highlight: Some("ransomware".to_string()),
                sort_order: 3,
            },
        ],
    )
}

pub fn hero_stats() -> FallbackCatalog<HeroStat> {
    let stat = |label: &str, value: u64, suffix: &str, sort_order: i32| HeroStat {
        label: label.to_string(),
        value,
        suffix: suffix.to_string(),
        sort_order,
    };
    FallbackCatalog::new(
        stat("Audits passed", 500, "+", 1),
        [
            stat("Faster audit readiness", 80, "%", 2),
            stat("Automated controls", 1200, "+", 3),
            stat("Supported frameworks", 15, "", 4),
        ],
    )
}

pub fn resources() -> FallbackCatalog<ResourceItem> {
    let item = |title: &str, description: &str, category: &str, icon: &str, kind: &str, order| {
        ResourceItem {
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            icon: icon.to_string(),
            href: None,
            resource_type: kind.to_string(),
            sort_order: order,
        }
    };
    FallbackCatalog::new(
        item(
            "SOC 2 Readiness Checklist",
            "Every control an auditor will ask about, in the order they ask.",
            "SOC 2",
            "FileCheck",
            "guide",
            1,
        ),
        [
            item(
                "ISO 27001 Implementation Guide",
                "Scope, risk assessment and Statement of Applicability step by step.",
                "ISO 27001",
                "BookOpen",
                "whitepaper",
                2,
            ),
            item(
                "Ransomware Preparedness Playbook",
                "Backups, segmentation and response drills that actually hold up.",
                "Security",
                "Shield",
                "guide",
                3,
            ),
            item(
                "Continuous Compliance Webinar",
                "How high-growth teams keep controls green between audits.",
                "Webinar",
                "Video",
                "webinar",
                4,
            ),
        ],
    )
}

pub fn faq_items() -> FallbackCatalog<FaqItem> {
    let faq = |question: &str, answer: &str, category: &str, sort_order| FaqItem {
        question: question.to_string(),
        answer: answer.to_string(),
        category: category.to_string(),
        sort_order,
    };
    FallbackCatalog::new(
        faq(
            "How long does it take to get SOC 2 ready?",
            "Most teams reach audit readiness in four to eight weeks with automated evidence collection.",
            "General",
            1,
        ),
        [
            faq(
                "Which frameworks do you support?",
                "SOC 2, ISO 27001, HIPAA, PCI DSS, GDPR, NIST CSF and more, with shared controls mapped across them.",
                "Frameworks",
                2,
            ),
            faq(
                "Do you replace our auditor?",
                "No. We prepare evidence and workflows; an independent auditor still issues the report.",
                "Audits",
                3,
            ),
            faq(
                "Can I change plans later?",
                "Yes. Upgrades take effect immediately and downgrades at the next billing cycle.",
                "Billing",
                4,
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::{resolve_icon, Icon};

    #[test]
    fn pricing_catalog_is_the_three_standard_tiers() {
        let names: Vec<_> = pricing_plans()
            .items()
            .iter()
            .map(|plan| plan.name.clone())
            .collect();
        assert_eq!(names, ["Starter", "Professional", "Enterprise"]);
    }

    #[test]
    fn exactly_one_plan_is_highlighted() {
        let highlighted = pricing_plans()
            .items()
            .iter()
            .filter(|plan| plan.highlighted)
            .count();
        assert_eq!(highlighted, 1);
    }

    #[test]
    fn catalogs_are_sorted_by_sort_order() {
        fn is_sorted(orders: Vec<i32>) -> bool {
            orders.windows(2).all(|pair| pair[0] < pair[1])
        }
        assert!(is_sorted(pricing_plans().items().iter().map(|p| p.sort_order).collect()));
        assert!(is_sorted(carousel_texts().items().iter().map(|c| c.sort_order).collect()));
        assert!(is_sorted(hero_stats().items().iter().map(|s| s.sort_order).collect()));
        assert!(is_sorted(resources().items().iter().map(|r| r.sort_order).collect()));
        assert!(is_sorted(faq_items().items().iter().map(|f| f.sort_order).collect()));
    }

    #[test]
    fn bundled_resources_use_known_icons() {
        for item in resources().items() {
            let icon = resolve_icon(&item.icon);
            assert_eq!(icon.name(), item.icon, "unknown icon in catalog: {}", item.icon);
            assert!(Icon::ALL.contains(&icon));
        }
    }
}
