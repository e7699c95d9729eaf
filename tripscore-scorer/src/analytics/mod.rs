//! Cross-user analytics for administrators.
//!
//! These views read the global visit set (bounded by the same fetch cap as
//! per-user requests) and reuse the clustering, normalisation, and
//! aggregation primitives at global scope. Trust views look at every active
//! visit; score and place views only count scoring-eligible ones.

mod trust;
mod usage;

use serde::Serialize;
use tripscore_core::{EngineConfig, VisitQuery, VisitStore};

pub use trust::{
    SuspiciousVisit, TimeBucket, TimelineBucket, TrustBreakdown, suspicious_visits,
    trust_breakdown, trust_timeline,
};
pub use usage::{
    ContinentUsage, CountryUsage, LocationUsage, UserScore, continent_breakdown,
    country_breakdown, location_breakdown, top_users,
};

use crate::ScoreError;
use crate::engine::fetch_capped;

/// A count for one value of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tally<K> {
    /// Classification value.
    pub value: K,
    /// Number of visits carrying it.
    pub count: usize,
}

/// Analytics over every user's visits.
#[derive(Debug, Clone)]
pub struct AdminAnalytics<S>
where
    S: VisitStore,
{
    store: S,
    config: EngineConfig,
}

impl<S> AdminAnalytics<S>
where
    S: VisitStore,
{
    /// Construct analytics with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Construct analytics with explicit configuration.
    pub const fn with_config(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Visit counts per trust level, verification status, and source.
    ///
    /// # Errors
    /// Returns [`ScoreError::Storage`] when visits cannot be read.
    pub fn trust_breakdown(&self) -> Result<TrustBreakdown, ScoreError> {
        Ok(trust_breakdown(&self.fetch_all()?))
    }

    /// Highest-scoring users, best first.
    ///
    /// # Errors
    /// Returns [`ScoreError::Storage`] when visits cannot be read.
    pub fn top_users(&self, limit: usize) -> Result<Vec<UserScore>, ScoreError> {
        Ok(top_users(
            &self.fetch_all()?,
            limit,
            self.config.cluster_precision,
        ))
    }

    /// Active visits flagged suspicious, newest upload first.
    ///
    /// # Errors
    /// Returns [`ScoreError::Storage`] when visits cannot be read.
    pub fn suspicious_visits(&self, limit: usize) -> Result<Vec<SuspiciousVisit>, ScoreError> {
        Ok(suspicious_visits(&self.fetch_all()?, limit))
    }

    /// Trust levels of active visits bucketed by upload date.
    ///
    /// # Errors
    /// Returns [`ScoreError::Storage`] when visits cannot be read.
    pub fn trust_timeline(&self, bucket: TimeBucket) -> Result<Vec<TimelineBucket>, ScoreError> {
        Ok(trust_timeline(&self.fetch_all()?, bucket))
    }

    /// Unique places per continent across all users.
    ///
    /// # Errors
    /// Returns [`ScoreError::Storage`] when visits cannot be read.
    pub fn continent_breakdown(&self) -> Result<Vec<ContinentUsage>, ScoreError> {
        Ok(continent_breakdown(
            &self.fetch_all()?,
            self.config.cluster_precision,
        ))
    }

    /// Unique places per country across all users, busiest first.
    ///
    /// # Errors
    /// Returns [`ScoreError::Storage`] when visits cannot be read.
    pub fn country_breakdown(&self) -> Result<Vec<CountryUsage>, ScoreError> {
        Ok(country_breakdown(
            &self.fetch_all()?,
            self.config.cluster_precision,
        ))
    }

    /// Most visited cluster cells across all users.
    ///
    /// # Errors
    /// Returns [`ScoreError::Storage`] when visits cannot be read.
    pub fn location_breakdown(&self, limit: usize) -> Result<Vec<LocationUsage>, ScoreError> {
        Ok(location_breakdown(
            &self.fetch_all()?,
            limit,
            self.config.cluster_precision,
        ))
    }

    fn fetch_all(&self) -> Result<Vec<tripscore_core::Visit>, ScoreError> {
        fetch_capped(&self.store, &VisitQuery::global(self.config.fetch_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tripscore_core::test_support::{FailingVisitStore, VisitBuilder};
    use tripscore_core::{MemoryVisitStore, NoMediaLookup, TrustLevel};

    use crate::TripScoreEngine;

    #[rstest]
    fn engine_exposes_analytics_over_its_store() {
        let store = MemoryVisitStore::with_visits([
            VisitBuilder::new("a1", "alice")
                .at(35.0, 139.0)
                .country("Japan")
                .build(),
            VisitBuilder::new("b1", "bob")
                .at(35.001, 139.001)
                .country("Japan")
                .trust(TrustLevel::Suspicious)
                .build(),
        ]);
        let engine = TripScoreEngine::new(store, NoMediaLookup);
        let analytics = engine.analytics();

        let breakdown = analytics.trust_breakdown().expect("breakdown");
        assert_eq!(breakdown.total_visits, 2);
        let locations = analytics.location_breakdown(10).expect("locations");
        assert_eq!(locations.len(), 1);
        assert_eq!(locations.first().map(|l| l.visitors), Some(2));
    }

    #[rstest]
    fn storage_failures_propagate() {
        let analytics = AdminAnalytics::new(FailingVisitStore);
        assert!(matches!(
            analytics.top_users(5),
            Err(ScoreError::Storage(_))
        ));
    }
}
