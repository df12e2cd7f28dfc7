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

//! Read descriptions for the content store.
//!
//! A [`QueryRequest`] names a collection and optionally narrows it with
//! server-side filters, an ordering and a row limit. Requests are plain
//! values: two requests are "the same read" exactly when they compare equal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison operators understood by the store (PostgREST operator names).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Is,
}

impl FilterOp {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::Is => "is",
        }
    }
}

/// A single `field <op> value` predicate, evaluated by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: String,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl fmt::Display) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.to_string(),
        }
    }

    /// Shorthand for `field = value`, e.g. `Filter::eq("active", true)`.
    pub fn eq(field: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    /// Query-string form: `("active", "eq.true")`.
    pub fn to_query_pair(&self) -> (String, String) {
        (
            self.field.clone(),
            format!("{}.{}", self.op.as_str(), self.value),
        )
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op.as_str(), self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Result ordering: `(field, direction)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub field: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// One remote read against a named collection.
///
/// Built with the consuming builder methods and then treated as immutable:
/// changing any field produces a different request.
///
/// ```
/// use compliance_content_types::{Filter, Order, QueryRequest};
///
/// let request = QueryRequest::new("pricing_plans")
///     .filter(Filter::eq("active", true))
///     .order_by(Order::asc("sort_order"))
///     .limit(3);
///
/// assert_eq!(
///     request.query_pairs(),
///     vec![
///         ("select".to_string(), "*".to_string()),
///         ("active".to_string(), "eq.true".to_string()),
///         ("order".to_string(), "sort_order.asc".to_string()),
///         ("limit".to_string(), "3".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryRequest {
    pub collection: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl QueryRequest {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, order: Order) -> Self {
        self.order_by = Some(order);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string parameters for a PostgREST `GET /rest/v1/{collection}`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];
        pairs.extend(self.filters.iter().map(Filter::to_query_pair));
        if let Some(order) = &self.order_by {
            pairs.push((
                "order".to_string(),
                format!("{}.{}", order.field, order.direction.as_str()),
            ));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

impl fmt::Display for QueryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection)?;
        for filter in &self.filters {
            write!(f, " [{filter}]")?;
        }
        if let Some(order) = &self.order_by {
            write!(f, " order {} {}", order.field, order.direction.as_str())?;
        }
        if let Some(limit) = self.limit {
            write!(f, " limit {limit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn bare_request_selects_everything() {
        let request = QueryRequest::new("faq_items");
        assert_eq!(
            request.query_pairs(),
            vec![("select".to_string(), "*".to_string())]
        );
    }

    #[test]
    fn descending_order_and_multiple_filters() {
        let request = QueryRequest::new("resources")
            .filter(Filter::eq("published", true))
            .filter(Filter::new("sort_order", FilterOp::Lt, 10))
            .order_by(Order::desc("sort_order"));

        let pairs = request.query_pairs();
        assert!(pairs.contains(&("published".to_string(), "eq.true".to_string())));
        assert!(pairs.contains(&("sort_order".to_string(), "lt.10".to_string())));
        assert!(pairs.contains(&("order".to_string(), "sort_order.desc".to_string())));
    }

    #[test]
    fn changing_any_field_is_a_different_request() {
        let base = QueryRequest::new("pricing_plans").filter(Filter::eq("active", true));
        let limited = base.clone().limit(1);
        let other_filter = QueryRequest::new("pricing_plans").filter(Filter::eq("active", false));

        let distinct: HashSet<_> = [base.clone(), limited, other_filter, base]
            .into_iter()
            .collect();
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn display_is_readable_for_logs() {
        let request = QueryRequest::new("pricing_plans")
            .filter(Filter::eq("active", true))
            .order_by(Order::asc("sort_order"))
            .limit(3);
        assert_eq!(
            request.to_string(),
            "pricing_plans [active eq true] order sort_order asc limit 3"
        );
    }
}
