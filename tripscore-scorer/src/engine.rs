//! Request façade over the aggregator.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use tripscore_core::{
    Continent, EngineConfig, MediaLookup, UserId, Visit, VisitQuery, VisitStore,
    normalize_continent, normalize_country,
};

use crate::analytics::AdminAnalytics;
use crate::reports::{
    ContinentsReport, CountriesReport, CountryDetails, TravelMap, continents_report,
    countries_report, country_details, travel_map,
};
use crate::{Scope, ScoreError, ScoreSnapshot, aggregate};

/// Answers per-user TripScore queries.
///
/// Every call validates the user, reads that user's visits once with the
/// configured cap, and recomputes from scratch. Nothing is cached between
/// calls, so concurrent requests never interact.
///
/// # Examples
/// ```
/// use tripscore_core::{MemoryVisitStore, NoMediaLookup};
/// use tripscore_scorer::TripScoreEngine;
///
/// let engine = TripScoreEngine::new(MemoryVisitStore::default(), NoMediaLookup);
/// let report = engine.continents("alice").expect("empty store scores zero");
/// assert_eq!(report.total_score, 0);
/// assert!(engine.continents("not a user").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TripScoreEngine<S, M>
where
    S: VisitStore,
    M: MediaLookup,
{
    store: S,
    media: M,
    config: EngineConfig,
}

impl<S, M> TripScoreEngine<S, M>
where
    S: VisitStore,
    M: MediaLookup,
{
    /// Construct an engine using the default configuration.
    pub fn new(store: S, media: M) -> Self {
        Self {
            store,
            media,
            config: EngineConfig::default(),
        }
    }

    /// Construct an engine with explicit configuration.
    ///
    /// # Errors
    /// Returns [`ScoreError::InvalidConfig`] when the fetch limit is zero.
    pub fn with_config(store: S, media: M, config: EngineConfig) -> Result<Self, ScoreError> {
        if config.fetch_limit == 0 {
            return Err(ScoreError::InvalidConfig {
                reason: "fetch limit must be at least 1",
            });
        }
        Ok(Self {
            store,
            media,
            config,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Aggregate the visits of `user` within `scope`.
    ///
    /// # Errors
    /// Returns [`ScoreError::InvalidUser`] for a malformed identifier and
    /// [`ScoreError::Storage`] when visits cannot be read.
    pub fn snapshot(&self, user: &str, scope: &Scope) -> Result<ScoreSnapshot, ScoreError> {
        let owner = UserId::parse(user)?;
        let visits = self.fetch(VisitQuery::for_user(owner, self.config.fetch_limit))?;
        Ok(aggregate(&visits, scope, self.config.cluster_precision))
    }

    /// Score per continent for `user`.
    ///
    /// # Errors
    /// See [`TripScoreEngine::snapshot`].
    pub fn continents(&self, user: &str) -> Result<ContinentsReport, ScoreError> {
        let snapshot = self.snapshot(user, &Scope::All)?;
        Ok(continents_report(&snapshot))
    }

    /// Score per country of `continent` for `user`.
    ///
    /// # Errors
    /// Returns [`ScoreError::UnknownContinent`] when `continent` does not
    /// name one of the seven continents, checked after the user id and
    /// before any read. Otherwise see [`TripScoreEngine::snapshot`].
    pub fn countries_of_continent(
        &self,
        user: &str,
        continent: &str,
    ) -> Result<CountriesReport, ScoreError> {
        UserId::parse(user)?;
        let bucket = parse_continent(continent)?;
        let snapshot = self.snapshot(user, &Scope::Continent(bucket))?;
        Ok(countries_report(&snapshot, bucket))
    }

    /// Places in `country` for `user`, newest first.
    ///
    /// `country` may be any spelling the normaliser understands; a region
    /// such as `"Scotland"` answers for its parent country.
    ///
    /// # Errors
    /// See [`TripScoreEngine::snapshot`].
    pub fn country_details(&self, user: &str, country: &str) -> Result<CountryDetails, ScoreError> {
        let canonical = normalize_country(country);
        let snapshot = self.snapshot(user, &Scope::Country(canonical.clone()))?;
        Ok(country_details(&snapshot, &canonical, &self.media))
    }

    /// Chronological travel map for `user` as of `now`.
    ///
    /// # Errors
    /// See [`TripScoreEngine::snapshot`].
    pub fn travel_map(&self, user: &str, now: DateTime<Utc>) -> Result<TravelMap, ScoreError> {
        let snapshot = self.snapshot(user, &Scope::All)?;
        Ok(travel_map(&snapshot, now))
    }

    /// Cross-user analytics reading from the same store.
    #[must_use]
    pub const fn analytics(&self) -> AdminAnalytics<&S> {
        AdminAnalytics::with_config(&self.store, self.config)
    }

    fn fetch(&self, query: VisitQuery) -> Result<Vec<Visit>, ScoreError> {
        fetch_capped(&self.store, &query)
    }
}

/// Read visits for `query`, logging when the read hit its cap.
pub(crate) fn fetch_capped<S: VisitStore>(
    store: &S,
    query: &VisitQuery,
) -> Result<Vec<Visit>, ScoreError> {
    let visits = store.fetch_visits(query)?;
    if visits.len() >= query.limit {
        warn!(
            "visit read for {} reached the cap of {} visits; later visits are not scored",
            query
                .owner
                .as_ref()
                .map_or("all users", UserId::as_str),
            query.limit
        );
    }
    debug!("fetched {} visits", visits.len());
    Ok(visits)
}

fn parse_continent(raw: &str) -> Result<Continent, ScoreError> {
    let continent = normalize_continent(raw);
    if continent.is_named() {
        Ok(continent)
    } else {
        Err(ScoreError::UnknownContinent {
            name: raw.to_owned(),
        })
    }
}
