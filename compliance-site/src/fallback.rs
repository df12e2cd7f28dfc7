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

//! Remote-or-static content selection.
//!
//! Every section renders [`resolve`]'s output. While a read is loading, after
//! it failed, or when it came back empty, the section's bundled catalog is
//! shown; otherwise the remote rows are shown exactly as returned.

use serde::Serialize;
use thiserror::Error;

use crate::query::QueryResult;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("a fallback catalog must contain at least one item")]
    Empty,
}

/// Static display content bundled with a section. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackCatalog<T> {
    items: Vec<T>,
}

impl<T> FallbackCatalog<T> {
    /// Non-empty by construction: the first item is mandatory.
    pub fn new(first: T, rest: impl IntoIterator<Item = T>) -> Self {
        let mut items = vec![first];
        items.extend(rest);
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<T> TryFrom<Vec<T>> for FallbackCatalog<T> {
    type Error = CatalogError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        if items.is_empty() {
            Err(CatalogError::Empty)
        } else {
            Ok(Self { items })
        }
    }
}

/// Where rendered content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    Remote,
    Fallback,
}

/// What a section renders.
#[derive(Debug, PartialEq, Eq)]
pub struct DisplayContent<'a, T> {
    pub source: ContentSource,
    pub items: &'a [T],
}

impl<T> Clone for DisplayContent<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DisplayContent<'_, T> {}

impl<'a, T> DisplayContent<'a, T> {
    pub fn is_fallback(&self) -> bool {
        self.source == ContentSource::Fallback
    }

    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.items.iter()
    }

    pub fn to_owned_items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.to_vec()
    }
}

/// Choose between remote rows and the fallback catalog.
///
/// Pure and total; behaves identically for every collection.
pub fn resolve<'a, T>(
    result: &'a QueryResult<T>,
    fallback: &'a FallbackCatalog<T>,
) -> DisplayContent<'a, T> {
    match result {
        QueryResult::Ready(rows) if !rows.is_empty() => DisplayContent {
            source: ContentSource::Remote,
            items: rows,
        },
        QueryResult::Loading | QueryResult::Failed(_) | QueryResult::Ready(_) => DisplayContent {
            source: ContentSource::Fallback,
            items: fallback.items(),
        },
    }
}
