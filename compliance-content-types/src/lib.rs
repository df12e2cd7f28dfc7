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

//! Shared types for the compliance marketing site content layer.
//!
//! This crate defines the contract between the site and the remote content
//! store: how a read is described ([`QueryRequest`]), the shape of the rows
//! that come back, and the rows the site writes (leads, gap assessments).
//! It is intentionally framework-agnostic: no HTTP client, no runtime.

pub mod assessment;
pub mod content;
pub mod error;
pub mod leads;
pub mod query;

pub use content::{CarouselText, FaqItem, HeroStat, PricingPlan, ResourceItem};
pub use error::StoreErrorBody;
pub use query::{Direction, Filter, FilterOp, Order, QueryRequest};
