//! Score and place views across users.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tripscore_core::{ClusterKey, ClusterPrecision, Continent, UNKNOWN_COUNTRY, UserId, Visit};

use crate::{Scope, UniquePlace, aggregate};

/// One user's TripScore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScore {
    /// The user.
    pub user_id: UserId,
    /// Unique places, `UNKNOWN` continent included.
    pub total_score: usize,
    /// Named continents with at least one place.
    pub continents_visited: usize,
    /// Known countries with at least one place.
    pub countries_visited: usize,
}

/// Rank users by TripScore, best first; ties go to the smaller user id.
///
/// Each user is aggregated independently, exactly as a per-user request
/// would be.
#[must_use]
pub fn top_users(visits: &[Visit], limit: usize, precision: ClusterPrecision) -> Vec<UserScore> {
    let mut by_user: BTreeMap<&UserId, Vec<&Visit>> = BTreeMap::new();
    for visit in visits {
        by_user.entry(&visit.user_id).or_default().push(visit);
    }

    let mut scores: Vec<UserScore> = by_user
        .into_iter()
        .map(|(user_id, own)| {
            let snapshot = aggregate(own, &Scope::All, precision);
            let countries: BTreeSet<&str> = snapshot
                .countries()
                .map(|(key, _)| key.country.as_str())
                .filter(|country| *country != UNKNOWN_COUNTRY)
                .collect();
            UserScore {
                user_id: user_id.clone(),
                total_score: snapshot.total_score(),
                continents_visited: snapshot
                    .continents()
                    .filter(|(continent, _)| continent.is_named())
                    .count(),
                countries_visited: countries.len(),
            }
        })
        .filter(|score| score.total_score > 0)
        .collect();
    scores.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    scores.truncate(limit);
    scores
}

/// Unique places of one continent across all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinentUsage {
    /// Continent key; `UNKNOWN` is listed last.
    pub continent: Continent,
    /// Unique places.
    pub places: usize,
    /// Eligible visits absorbed into those places.
    pub visits: usize,
    /// Distinct users who visited them.
    pub visitors: usize,
}

/// Unique places of one country across all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryUsage {
    /// Canonical country.
    pub country: String,
    /// Continent the places resolved to.
    pub continent: Continent,
    /// Unique places.
    pub places: usize,
    /// Eligible visits absorbed into those places.
    pub visits: usize,
    /// Distinct users who visited them.
    pub visitors: usize,
}

/// One cluster cell across all users.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationUsage {
    /// Cell key, `"<lat>,<lng>"`.
    pub cluster_key: ClusterKey,
    /// Latitude of the cell.
    pub lat: f64,
    /// Longitude of the cell.
    pub lng: f64,
    /// Address of the first visit to the cell.
    pub address: String,
    /// Canonical country.
    pub country: String,
    /// Canonical continent.
    pub continent: Continent,
    /// Eligible visits in the cell.
    pub visits: usize,
    /// Distinct users who visited it.
    pub visitors: usize,
}

#[derive(Default)]
struct Usage<'a> {
    places: usize,
    visits: usize,
    visitors: BTreeSet<&'a UserId>,
}

impl<'a> Usage<'a> {
    fn add(&mut self, place: &'a UniquePlace) {
        self.places = self.places.saturating_add(1);
        self.visits = self.visits.saturating_add(place.visit_count);
        self.visitors.extend(place.visitors.iter());
    }
}

/// Places, visits, and visitors per continent, deduplicated across users.
///
/// All seven named continents are listed in report order, followed by
/// `UNKNOWN`.
#[must_use]
pub fn continent_breakdown(visits: &[Visit], precision: ClusterPrecision) -> Vec<ContinentUsage> {
    let snapshot = aggregate(visits, &Scope::All, precision);
    let mut usage: BTreeMap<Continent, Usage<'_>> = BTreeMap::new();
    for place in snapshot.places() {
        usage.entry(place.continent).or_default().add(place);
    }
    Continent::NAMED
        .into_iter()
        .chain([Continent::Unknown])
        .map(|continent| {
            let found = usage.remove(&continent).unwrap_or_default();
            ContinentUsage {
                continent,
                places: found.places,
                visits: found.visits,
                visitors: found.visitors.len(),
            }
        })
        .collect()
}

/// Places, visits, and visitors per country, most places first.
#[must_use]
pub fn country_breakdown(visits: &[Visit], precision: ClusterPrecision) -> Vec<CountryUsage> {
    let snapshot = aggregate(visits, &Scope::All, precision);
    let mut usage: BTreeMap<(&str, Continent), Usage<'_>> = BTreeMap::new();
    for place in snapshot.places() {
        usage
            .entry((place.country.as_str(), place.continent))
            .or_default()
            .add(place);
    }
    let mut rows: Vec<CountryUsage> = usage
        .into_iter()
        .map(|((country, continent), found)| CountryUsage {
            country: country.to_owned(),
            continent,
            places: found.places,
            visits: found.visits,
            visitors: found.visitors.len(),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.places
            .cmp(&a.places)
            .then_with(|| a.country.cmp(&b.country))
    });
    rows
}

/// The `limit` busiest cells by eligible visit count.
#[must_use]
pub fn location_breakdown(
    visits: &[Visit],
    limit: usize,
    precision: ClusterPrecision,
) -> Vec<LocationUsage> {
    let snapshot = aggregate(visits, &Scope::All, precision);
    let mut rows: Vec<LocationUsage> = snapshot
        .places()
        .iter()
        .map(|place| LocationUsage {
            cluster_key: place.key,
            lat: place.key.lat(),
            lng: place.key.lng(),
            address: place.address.clone(),
            country: place.country.clone(),
            continent: place.continent,
            visits: place.visit_count,
            visitors: place.visitors.len(),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.visits
            .cmp(&a.visits)
            .then_with(|| a.cluster_key.cmp(&b.cluster_key))
    });
    rows.truncate(limit);
    rows
}
