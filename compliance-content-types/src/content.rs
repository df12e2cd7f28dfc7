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

//! Display rows read from the content store.
//!
//! Every row type deserializes with per-field defaults: a row that is
//! missing some columns is still a usable row, with the missing fields
//! taking the value documented on the field.

use serde::{Deserialize, Serialize};

/// Icon key used when a row does not name one.
pub const DEFAULT_ICON_NAME: &str = "FileText";

/// Call-to-action label used when a plan does not name one.
pub const DEFAULT_CTA_LABEL: &str = "Get Started";

/// A pricing tier, collection `pricing_plans`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPlan {
    pub name: String,
    /// Display price, e.g. `"29"` or `"Custom"`. Defaults to empty.
    pub price: String,
    /// Billing period shown after the price (`"month"`). `None` for custom quotes.
    pub period: Option<String>,
    pub description: String,
    pub features: Vec<String>,
    /// Rendered with the "Most Popular" badge.
    pub highlighted: bool,
    /// Defaults to [`DEFAULT_CTA_LABEL`].
    pub cta_label: String,
    pub sort_order: i32,
}

impl Default for PricingPlan {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            period: None,
            description: String::new(),
            features: Vec::new(),
            highlighted: false,
            cta_label: DEFAULT_CTA_LABEL.to_string(),
            sort_order: 0,
        }
    }
}

/// A hero carousel slide, collection `carousel_texts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselText {
    pub title: String,
    pub subtitle: String,
    /// Word or phrase of the title rendered with the accent gradient.
    pub highlight: Option<String>,
    pub sort_order: i32,
}

/// An animated hero statistic, collection `hero_stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroStat {
    pub label: String,
    /// Target value of the counter animation.
    pub value: u64,
    /// Appended to the counter, e.g. `"%"` or `"+"`.
    pub suffix: String,
    pub sort_order: i32,
}

/// A downloadable or linked resource, collection `resources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceItem {
    pub title: String,
    pub description: String,
    pub category: String,
    /// Icon key, see `compliance_site::icons`. Defaults to [`DEFAULT_ICON_NAME`].
    pub icon: String,
    pub href: Option<String>,
    /// `"guide"`, `"whitepaper"`, `"webinar"`, ...
    pub resource_type: String,
    pub sort_order: i32,
}

impl Default for ResourceItem {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            icon: DEFAULT_ICON_NAME.to_string(),
            href: None,
            resource_type: String::new(),
            sort_order: 0,
        }
    }
}

/// A FAQ entry, collection `faq_items`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub sort_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_plan_row_keeps_provided_fields() {
        let plan: PricingPlan =
            serde_json::from_value(json!({"name": "Basic", "price": "29", "features": ["SOC 2"]}))
                .unwrap();
        assert_eq!(plan.name, "Basic");
        assert_eq!(plan.price, "29");
        assert_eq!(plan.features, vec!["SOC 2".to_string()]);
        assert_eq!(plan.cta_label, DEFAULT_CTA_LABEL);
        assert!(!plan.highlighted);
        assert_eq!(plan.period, None);
    }

    #[test]
    fn resource_without_icon_gets_default_key() {
        let item: ResourceItem =
            serde_json::from_value(json!({"title": "SOC 2 Checklist"})).unwrap();
        assert_eq!(item.icon, DEFAULT_ICON_NAME);
        assert_eq!(item.title, "SOC 2 Checklist");
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let stat: HeroStat = serde_json::from_value(json!({
            "id": "8c1f",
            "created_at": "2024-03-01T00:00:00Z",
            "label": "Controls mapped",
            "value": 1200,
            "suffix": "+"
        }))
        .unwrap();
        assert_eq!(stat.value, 1200);
        assert_eq!(stat.suffix, "+");
    }

    #[test]
    fn wrong_column_type_is_a_decode_error() {
        let result: Result<HeroStat, _> =
            serde_json::from_value(json!({"label": "Audits", "value": "many"}));
        assert!(result.is_err());
    }
}
