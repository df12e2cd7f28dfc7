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

//! Remotely-driven page sections.
//!
//! A [`ContentSection`] is what a presentation component holds while it is
//! mounted: the live read for its collection plus the bundled catalog it
//! falls back to. Dropping the section unmounts it.

use std::fmt;
use std::str::FromStr;

use compliance_content_types::query::{Filter, Order};
use compliance_content_types::{
    CarouselText, FaqItem, HeroStat, PricingPlan, QueryRequest, ResourceItem,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::catalog;
use crate::counter::{AnimatedCounter, CounterAnimation};
use crate::fallback::{resolve, ContentSource, DisplayContent, FallbackCatalog};
use crate::icons::{resolve_icon, Icon};
use crate::query::{QueryAdapter, QueryResult, RemoteQuery};

pub const HERO_STATS: &str = "hero_stats";
pub const CAROUSEL_TEXTS: &str = "carousel_texts";
pub const PRICING_PLANS: &str = "pricing_plans";
pub const RESOURCES: &str = "resources";
pub const FAQ_ITEMS: &str = "faq_items";

/// One mounted section.
pub struct ContentSection<T> {
    query: RemoteQuery<T>,
    fallback: FallbackCatalog<T>,
}

impl<T> ContentSection<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub fn mount(
        adapter: &QueryAdapter,
        request: QueryRequest,
        fallback: FallbackCatalog<T>,
    ) -> Self {
        Self {
            query: adapter.watch(request),
            fallback,
        }
    }

    pub fn query(&self) -> &RemoteQuery<T> {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut RemoteQuery<T> {
        &mut self.query
    }

    pub fn fallback(&self) -> &FallbackCatalog<T> {
        &self.fallback
    }

    /// Render the current state through the fallback rule.
    pub fn with_display<R>(&self, f: impl FnOnce(DisplayContent<'_, T>) -> R) -> R {
        self.query.with_state(|state| f(resolve(state, &self.fallback)))
    }

    pub fn source(&self) -> ContentSource {
        self.with_display(|display| display.source)
    }
}

impl<T> ContentSection<T>
where
    T: Clone + DeserializeOwned + Send + Sync + 'static,
{
    /// Owned copy of what the section currently shows.
    pub fn display(&self) -> OwnedDisplay<T> {
        self.with_display(|display| OwnedDisplay::from(display))
    }

    /// What the section shows once its read has settled.
    pub async fn settled_display(&self) -> OwnedDisplay<T> {
        let state: QueryResult<T> = self.query.settled().await;
        OwnedDisplay::from(resolve(&state, &self.fallback))
    }
}

/// [`DisplayContent`] detached from the section's state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedDisplay<T> {
    pub source: ContentSource,
    pub items: Vec<T>,
}

impl<T: Clone> From<DisplayContent<'_, T>> for OwnedDisplay<T> {
    fn from(display: DisplayContent<'_, T>) -> Self {
        Self {
            source: display.source,
            items: display.to_owned_items(),
        }
    }
}

pub fn hero_stats_request() -> QueryRequest {
    QueryRequest::new(HERO_STATS).order_by(Order::asc("sort_order"))
}

pub fn carousel_texts_request() -> QueryRequest {
    QueryRequest::new(CAROUSEL_TEXTS).order_by(Order::asc("sort_order"))
}

/// Active plans only, cheapest tier first.
pub fn pricing_plans_request() -> QueryRequest {
    QueryRequest::new(PRICING_PLANS)
        .filter(Filter::eq("active", true))
        .order_by(Order::asc("sort_order"))
}

pub fn resources_request() -> QueryRequest {
    QueryRequest::new(RESOURCES).order_by(Order::asc("sort_order"))
}

pub fn faq_items_request() -> QueryRequest {
    QueryRequest::new(FAQ_ITEMS).order_by(Order::asc("sort_order"))
}

pub fn hero_stats(adapter: &QueryAdapter) -> ContentSection<HeroStat> {
    ContentSection::mount(adapter, hero_stats_request(), catalog::hero_stats())
}

pub fn carousel_texts(adapter: &QueryAdapter) -> ContentSection<CarouselText> {
    ContentSection::mount(adapter, carousel_texts_request(), catalog::carousel_texts())
}

pub fn pricing_plans(adapter: &QueryAdapter) -> ContentSection<PricingPlan> {
    ContentSection::mount(adapter, pricing_plans_request(), catalog::pricing_plans())
}

pub fn resources(adapter: &QueryAdapter) -> ContentSection<ResourceItem> {
    ContentSection::mount(adapter, resources_request(), catalog::resources())
}

pub fn faq_items(adapter: &QueryAdapter) -> ContentSection<FaqItem> {
    ContentSection::mount(adapter, faq_items_request(), catalog::faq_items())
}

/// A resource row ready to render, with its icon resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceCard {
    pub title: String,
    pub description: String,
    pub category: String,
    pub icon: Icon,
    pub icon_class: &'static str,
    pub href: Option<String>,
}

impl From<&ResourceItem> for ResourceCard {
    fn from(item: &ResourceItem) -> Self {
        let icon = resolve_icon(&item.icon);
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            category: item.category.clone(),
            icon,
            icon_class: icon.css_class(),
            href: item.href.clone(),
        }
    }
}

pub fn resource_cards(display: DisplayContent<'_, ResourceItem>) -> Vec<ResourceCard> {
    display.iter().map(ResourceCard::from).collect()
}

/// Start one counter per stat, counting up to its value.
///
/// **Important:** must be called from within a tokio runtime.
pub fn hero_counters(
    display: DisplayContent<'_, HeroStat>,
    frame: std::time::Duration,
) -> Vec<(HeroStat, AnimatedCounter)> {
    display
        .iter()
        .map(|stat| (stat.clone(), CounterAnimation::to(stat.value).spawn(frame)))
        .collect()
}

/// Section names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    HeroStats,
    Carousel,
    Pricing,
    Resources,
    Faq,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::HeroStats,
        SectionKind::Carousel,
        SectionKind::Pricing,
        SectionKind::Resources,
        SectionKind::Faq,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionKind::HeroStats => "hero-stats",
            SectionKind::Carousel => "carousel",
            SectionKind::Pricing => "pricing",
            SectionKind::Resources => "resources",
            SectionKind::Faq => "faq",
        }
    }

    pub fn request(self) -> QueryRequest {
        match self {
            SectionKind::HeroStats => hero_stats_request(),
            SectionKind::Carousel => carousel_texts_request(),
            SectionKind::Pricing => pricing_plans_request(),
            SectionKind::Resources => resources_request(),
            SectionKind::Faq => faq_items_request(),
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = SectionKind::ALL.iter().map(|kind| kind.name()).collect();
                format!("unknown section '{s}', expected one of: {}", names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_request_filters_active_and_orders() {
        let pairs = pricing_plans_request().query_pairs();
        assert!(pairs.contains(&("active".to_string(), "eq.true".to_string())));
        assert!(pairs.contains(&("order".to_string(), "sort_order.asc".to_string())));
    }

    #[test]
    fn resource_card_resolves_unknown_icon_to_default() {
        let item = ResourceItem {
            title: "Mystery".to_string(),
            icon: "UnknownIcon".to_string(),
            ..Default::default()
        };
        let card = ResourceCard::from(&item);
        assert_eq!(card.icon, Icon::DEFAULT);
        assert_eq!(card.icon_class, Icon::DEFAULT.css_class());
    }

    #[test]
    fn section_names_parse() {
        for kind in SectionKind::ALL {
            assert_eq!(kind.name().parse::<SectionKind>(), Ok(kind));
        }
        assert!("pricing-page".parse::<SectionKind>().is_err());
    }

    #[test]
    fn every_section_reads_its_own_collection() {
        let collections: Vec<_> = SectionKind::ALL
            .iter()
            .map(|kind| kind.request().collection)
            .collect();
        assert_eq!(
            collections,
            [HERO_STATS, CAROUSEL_TEXTS, PRICING_PLANS, RESOURCES, FAQ_ITEMS]
        );
    }
}
