//! Read-only access to the visits owned by the ingestion collaborator.
//!
//! The `VisitStore` trait is the only way the engine reads visits. Every
//! read is bounded by [`VisitQuery::limit`].

use std::error::Error as StdError;

use thiserror::Error;

use crate::{UserId, Visit};

/// Which visits to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitQuery {
    /// Owner whose visits are read; `None` reads across all users.
    pub owner: Option<UserId>,
    /// Maximum number of visits returned.
    pub limit: usize,
}

impl VisitQuery {
    /// Read one user's visits.
    #[must_use]
    pub const fn for_user(owner: UserId, limit: usize) -> Self {
        Self {
            owner: Some(owner),
            limit,
        }
    }

    /// Read visits across every user.
    #[must_use]
    pub const fn global(limit: usize) -> Self {
        Self { owner: None, limit }
    }
}

/// Errors raised by [`VisitStore::fetch_visits`].
#[derive(Debug, Error)]
pub enum VisitStoreError {
    /// The backing service could not be reached.
    #[error("visit store unavailable: {message}")]
    Unavailable {
        /// Description of the outage.
        message: String,
    },
    /// The backend failed while reading.
    #[error("visit store backend failed")]
    Backend {
        /// Underlying backend error.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

/// Read-only access to visits.
///
/// Implementations return the visits matching `query` in any order; the
/// engine orders them itself. Returning exactly `query.limit` visits signals
/// that the read may have been truncated.
///
/// # Examples
///
/// ```rust
/// use tripscore_core::{MemoryVisitStore, UserId, VisitQuery, VisitStore};
///
/// let store = MemoryVisitStore::default();
/// let owner = UserId::parse("alice").expect("valid id");
/// let visits = store
///     .fetch_visits(&VisitQuery::for_user(owner, 10))
///     .expect("memory reads cannot fail");
/// assert!(visits.is_empty());
/// ```
pub trait VisitStore: Send + Sync {
    /// Return up to `query.limit` visits matching `query`.
    ///
    /// # Errors
    /// Returns [`VisitStoreError`] when the backing store cannot be read.
    fn fetch_visits(&self, query: &VisitQuery) -> Result<Vec<Visit>, VisitStoreError>;
}

impl<S: VisitStore + ?Sized> VisitStore for &S {
    fn fetch_visits(&self, query: &VisitQuery) -> Result<Vec<Visit>, VisitStoreError> {
        (**self).fetch_visits(query)
    }
}

/// In-process `VisitStore` over a vector of visits.
///
/// Visits are returned in insertion order; the store performs a linear scan.
#[derive(Debug, Default, Clone)]
pub struct MemoryVisitStore {
    visits: Vec<Visit>,
}

impl MemoryVisitStore {
    /// Create a store from a collection of visits.
    pub fn with_visits<I>(visits: I) -> Self
    where
        I: IntoIterator<Item = Visit>,
    {
        Self {
            visits: visits.into_iter().collect(),
        }
    }

    /// Number of stored visits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Report whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

impl VisitStore for MemoryVisitStore {
    fn fetch_visits(&self, query: &VisitQuery) -> Result<Vec<Visit>, VisitStoreError> {
        Ok(self
            .visits
            .iter()
            .filter(|visit| {
                query
                    .owner
                    .as_ref()
                    .is_none_or(|owner| &visit.user_id == owner)
            })
            .take(query.limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::VisitBuilder;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> MemoryVisitStore {
        MemoryVisitStore::with_visits([
            VisitBuilder::new("a1", "alice").build(),
            VisitBuilder::new("b1", "bob").build(),
            VisitBuilder::new("a2", "alice").build(),
        ])
    }

    fn ids(visits: &[Visit]) -> Vec<&str> {
        visits.iter().map(|v| v.id.as_str()).collect()
    }

    #[rstest]
    fn owner_filter_selects_one_user(store: MemoryVisitStore) {
        let owner = UserId::parse("alice").expect("valid id");
        let visits = store
            .fetch_visits(&VisitQuery::for_user(owner, 10))
            .expect("memory read");
        assert_eq!(ids(&visits), ["a1", "a2"]);
    }

    #[rstest]
    fn global_query_honours_limit(store: MemoryVisitStore) {
        let visits = store
            .fetch_visits(&VisitQuery::global(2))
            .expect("memory read");
        assert_eq!(ids(&visits), ["a1", "b1"]);
    }
}
