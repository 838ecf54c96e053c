#![forbid(unsafe_code)]

//! Item source contract.
//!
//! The filtering algorithm is a collaborator, not part of this engine: a
//! source takes a query string and returns an ordered item collection, or
//! fails. Sources run inside background task commands, hence the
//! `Send + Sync` bound. The only ordering contract is stability: the same
//! query against the same source yields the same sequence.

use std::fmt;

use crate::item::Item;

/// Failure produced by an [`ItemSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The source rejected the request.
    SourceFailed(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceFailed(reason) => write!(f, "item source failed: {reason}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Asynchronous producer of item collections.
///
/// Implementations are called once per issued query; a slow call that has
/// been superseded simply has its result dropped on arrival, so sources
/// need no cancellation support.
pub trait ItemSource: Send + Sync {
    /// Produce the ordered collection for `query`.
    ///
    /// # Errors
    ///
    /// [`FetchError`] when the source cannot produce a collection; the
    /// caller keeps its last-good data.
    fn fetch(&self, query: &str) -> Result<Vec<Item>, FetchError>;
}

/// In-memory source: case-insensitive substring filter over a fixed list.
///
/// The stand-in for a real matcher in demos and tests. Result order is the
/// order of the underlying list, restricted to matches.
#[derive(Debug, Clone)]
pub struct StaticSource {
    items: Vec<Item>,
}

impl StaticSource {
    /// Create a source over `items`.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Number of items behind the filter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the backing list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemSource for StaticSource {
    fn fetch(&self, query: &str) -> Result<Vec<Item>, FetchError> {
        if query.is_empty() {
            return Ok(self.items.clone());
        }
        let needle = query.to_lowercase();
        Ok(self
            .items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> StaticSource {
        StaticSource::new(vec![
            Item::new(1, "Springfield"),
            Item::new(2, "Shelbyville"),
            Item::new(3, "West Springfield"),
            Item::new(4, "Capital City"),
        ])
    }

    #[test]
    fn empty_query_returns_everything() {
        let items = source().fetch("").unwrap();
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let items = source().fetch("SPRING").unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Springfield", "West Springfield"]);
    }

    #[test]
    fn order_is_stable_for_a_given_query() {
        let s = source();
        assert_eq!(s.fetch("field").unwrap(), s.fetch("field").unwrap());
    }

    #[test]
    fn no_match_returns_empty() {
        assert!(source().fetch("zzz").unwrap().is_empty());
    }

    #[test]
    fn error_display() {
        let err = FetchError::SourceFailed("index offline".into());
        assert_eq!(err.to_string(), "item source failed: index offline");
    }
}
