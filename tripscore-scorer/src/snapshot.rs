//! Score totals derived bottom-up from places.
//!
//! A [`ScoreSnapshot`] is the only source of totals. Country scores are
//! counted from places, continent scores are summed from countries, and the
//! total is summed from continents, `UNKNOWN` included. Counters maintained
//! elsewhere, such as the [`StepTally`] kept during the aggregation walk, are
//! checked against the snapshot and never trusted over it.

use std::collections::{BTreeMap, HashMap};

use geo::Coord;
use log::warn;
use tripscore_core::{Continent, cumulative_distance_km};

use crate::place::UniquePlace;

/// A country bucket within one continent.
///
/// The same country name reported under two continents yields two buckets so
/// every continent score is exactly the sum of its own countries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CountryKey {
    /// Continent the places were resolved to.
    pub continent: Continent,
    /// Canonical country name.
    pub country: String,
}

/// Transient per-request scores.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreSnapshot {
    total_score: usize,
    continents: BTreeMap<Continent, usize>,
    countries: BTreeMap<CountryKey, usize>,
    places: Vec<UniquePlace>,
}

impl ScoreSnapshot {
    /// Derive every total from `places`, which must already be in
    /// chronological-dedup order.
    #[must_use]
    pub fn from_places(places: Vec<UniquePlace>) -> Self {
        let mut countries: BTreeMap<CountryKey, usize> = BTreeMap::new();
        for place in &places {
            let key = CountryKey {
                continent: place.continent,
                country: place.country.clone(),
            };
            let count = countries.entry(key).or_default();
            *count = count.saturating_add(1);
        }

        let mut continents: BTreeMap<Continent, usize> = BTreeMap::new();
        for (key, score) in &countries {
            let sum = continents.entry(key.continent).or_default();
            *sum = sum.saturating_add(*score);
        }

        let total_score = continents.values().copied().fold(0, usize::saturating_add);

        Self {
            total_score,
            continents,
            countries,
            places,
        }
    }

    /// Number of unique places, `UNKNOWN` continent included.
    #[must_use]
    pub const fn total_score(&self) -> usize {
        self.total_score
    }

    /// Score of one continent bucket; zero when nothing was visited there.
    #[must_use]
    pub fn continent_score(&self, continent: Continent) -> usize {
        self.continents.get(&continent).copied().unwrap_or(0)
    }

    /// Places whose continent could not be determined.
    #[must_use]
    pub fn unknown_score(&self) -> usize {
        self.continent_score(Continent::Unknown)
    }

    /// Score of `country` within `continent`.
    #[must_use]
    pub fn country_score(&self, continent: Continent, country: &str) -> usize {
        self.countries
            .iter()
            .find(|(key, _)| key.continent == continent && key.country == country)
            .map_or(0, |(_, score)| *score)
    }

    /// Visited countries of `continent` with their scores, ordered by name.
    pub fn countries_in(&self, continent: Continent) -> impl Iterator<Item = (&str, usize)> {
        self.countries
            .iter()
            .filter(move |(key, _)| key.continent == continent)
            .map(|(key, score)| (key.country.as_str(), *score))
    }

    /// Every non-empty continent bucket.
    pub fn continents(&self) -> impl Iterator<Item = (Continent, usize)> + '_ {
        self.continents.iter().map(|(c, score)| (*c, *score))
    }

    /// Every non-empty country bucket.
    pub fn countries(&self) -> impl Iterator<Item = (&CountryKey, usize)> {
        self.countries.iter().map(|(key, score)| (key, *score))
    }

    /// Places in chronological-dedup order.
    #[must_use]
    pub fn places(&self) -> &[UniquePlace] {
        &self.places
    }

    /// Consume the snapshot, keeping its places.
    #[must_use]
    pub fn into_places(self) -> Vec<UniquePlace> {
        self.places
    }

    /// Unrounded cumulative distance across every place.
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_km_where(|_| true)
    }

    /// Unrounded cumulative distance across the places of `continent`.
    #[must_use]
    pub fn continent_distance_km(&self, continent: Continent) -> f64 {
        self.distance_km_where(|place| place.continent == continent)
    }

    fn distance_km_where<P>(&self, keep: P) -> f64
    where
        P: Fn(&UniquePlace) -> bool,
    {
        cumulative_distance_km(
            self.places
                .iter()
                .filter(|place| keep(place))
                .map(|place| place.coordinate),
        )
    }

    /// Coordinates of every place in order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.places.iter().map(|place| place.coordinate)
    }
}

/// A counter that disagreed with the bottom-up recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TallyMismatch {
    /// The running total differed.
    Total {
        /// Step-wise value.
        step: usize,
        /// Bottom-up value.
        derived: usize,
    },
    /// A continent counter differed.
    Continent {
        /// Affected continent.
        continent: Continent,
        /// Step-wise value.
        step: usize,
        /// Bottom-up value.
        derived: usize,
    },
    /// A country counter differed.
    Country {
        /// Affected bucket.
        key: CountryKey,
        /// Step-wise value.
        step: usize,
        /// Bottom-up value.
        derived: usize,
    },
}

/// Counters incremented once per level as each new place is registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepTally {
    total: usize,
    continents: HashMap<Continent, usize>,
    countries: HashMap<CountryKey, usize>,
}

impl StepTally {
    /// Count one new place at every level.
    pub fn record(&mut self, continent: Continent, country: &str) {
        self.total = self.total.saturating_add(1);
        let by_continent = self.continents.entry(continent).or_default();
        *by_continent = by_continent.saturating_add(1);
        let by_country = self
            .countries
            .entry(CountryKey {
                continent,
                country: country.to_owned(),
            })
            .or_default();
        *by_country = by_country.saturating_add(1);
    }

    /// Compare every counter with `snapshot`.
    #[must_use]
    pub fn mismatches(&self, snapshot: &ScoreSnapshot) -> Vec<TallyMismatch> {
        let mut found = Vec::new();
        if self.total != snapshot.total_score() {
            found.push(TallyMismatch::Total {
                step: self.total,
                derived: snapshot.total_score(),
            });
        }

        let mut continents: Vec<Continent> = self
            .continents
            .keys()
            .copied()
            .chain(snapshot.continents.keys().copied())
            .collect();
        continents.sort_unstable();
        continents.dedup();
        for continent in continents {
            let step = self.continents.get(&continent).copied().unwrap_or(0);
            let derived = snapshot.continent_score(continent);
            if step != derived {
                found.push(TallyMismatch::Continent {
                    continent,
                    step,
                    derived,
                });
            }
        }

        let mut keys: Vec<&CountryKey> = self
            .countries
            .keys()
            .chain(snapshot.countries.keys())
            .collect();
        keys.sort_unstable();
        keys.dedup();
        for key in keys {
            let step = self.countries.get(key).copied().unwrap_or(0);
            let derived = snapshot.countries.get(key).copied().unwrap_or(0);
            if step != derived {
                found.push(TallyMismatch::Country {
                    key: key.clone(),
                    step,
                    derived,
                });
            }
        }
        found
    }

    /// Log every disagreement with `snapshot`; the snapshot stands.
    ///
    /// Returns `true` when the tally agreed.
    pub fn reconcile(&self, snapshot: &ScoreSnapshot) -> bool {
        let mismatches = self.mismatches(snapshot);
        for mismatch in &mismatches {
            warn!("score recomputation disagreed with step-wise counter: {mismatch:?}");
        }
        mismatches.is_empty()
    }
}
