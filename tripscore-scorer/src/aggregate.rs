//! The score aggregation walk.

use std::cmp::Ordering;
use std::collections::HashMap;

use geo::Coord;
use log::{debug, warn};
use tripscore_core::{
    ClusterKey, ClusterPrecision, Continent, Visit, cluster_key, normalize_country,
    resolve_location,
};

use crate::place::UniquePlace;
use crate::snapshot::{ScoreSnapshot, StepTally};

/// Which places a snapshot keeps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    /// Every place.
    #[default]
    All,
    /// Places resolved to one continent.
    Continent(Continent),
    /// Places resolved to one canonical country.
    Country(String),
}

impl Scope {
    /// Scope to the canonical form of a raw country name.
    ///
    /// # Examples
    /// ```
    /// use tripscore_scorer::Scope;
    ///
    /// assert_eq!(Scope::country("scotland"), Scope::Country("United Kingdom".into()));
    /// ```
    #[must_use]
    pub fn country(raw: &str) -> Self {
        Self::Country(normalize_country(raw))
    }

    /// Report whether a place falls inside the scope.
    ///
    /// Country names are compared case-insensitively on their canonical
    /// form, never by substring.
    #[must_use]
    pub fn contains(&self, place: &UniquePlace) -> bool {
        match self {
            Self::All => true,
            Self::Continent(continent) => place.continent == *continent,
            Self::Country(country) => place.country.to_lowercase() == country.to_lowercase(),
        }
    }
}

/// Aggregate `visits` into a [`ScoreSnapshot`] restricted to `scope`.
///
/// Visits are gated on eligibility, stripped of unusable coordinates, and
/// ordered by visit time (ties broken by id). Deduplication runs over the
/// whole gated set so the first visit of a cell represents it at every
/// scope; the scope then selects which places are kept. Country names that
/// differ only in case share one bucket under the earliest spelling. The
/// result does not depend on the order of `visits`.
#[must_use]
pub fn aggregate<'a, I>(visits: I, scope: &Scope, precision: ClusterPrecision) -> ScoreSnapshot
where
    I: IntoIterator<Item = &'a Visit>,
{
    let mut read = 0_usize;
    let eligible: Vec<&Visit> = visits
        .into_iter()
        .inspect(|_| read = read.saturating_add(1))
        .filter(|v| v.is_scoring_eligible())
        .collect();
    let gated_out = read.saturating_sub(eligible.len());

    let mut located: Vec<(&Visit, Coord<f64>)> = eligible
        .iter()
        .filter_map(|visit| visit.coordinate().map(|coord| (*visit, coord)))
        .collect();
    let without_coordinates = eligible.len().saturating_sub(located.len());
    located.sort_by(|(a, _), (b, _)| chronological(a, b));

    let mut index: HashMap<ClusterKey, usize> = HashMap::new();
    let mut spellings: HashMap<String, String> = HashMap::new();
    let mut places: Vec<UniquePlace> = Vec::new();
    let mut tally = StepTally::default();
    for (visit, coord) in located {
        let key = cluster_key(coord, precision);
        if let Some(existing) = index.get(&key).and_then(|&i| places.get_mut(i)) {
            existing.absorb(visit);
            continue;
        }
        let mut location = resolve_location(visit, coord);
        location.country = first_spelling(&mut spellings, location.country);
        let place = UniquePlace::first(key, coord, visit, location);
        if scope.contains(&place) {
            tally.record(place.continent, &place.country);
        }
        index.insert(key, places.len());
        places.push(place);
    }
    let unique = places.len();

    places.retain(|place| scope.contains(place));
    let snapshot = ScoreSnapshot::from_places(places);
    tally.reconcile(&snapshot);

    for place in snapshot
        .places()
        .iter()
        .filter(|place| !place.continent.is_named())
    {
        warn!(
            "place {} (first visit {}) has no known continent; counted in the total only",
            place.key, place.first_visit_id
        );
    }
    debug!(
        "aggregated {read} visits: {gated_out} gated out, {without_coordinates} without \
         coordinates, {unique} unique places, {} in scope {scope:?}",
        snapshot.total_score(),
    );
    snapshot
}

/// Spelling first seen for `country`, compared case-insensitively.
fn first_spelling(spellings: &mut HashMap<String, String>, country: String) -> String {
    spellings
        .entry(country.to_lowercase())
        .or_insert(country)
        .clone()
}

/// Order visits by visit time, then id.
fn chronological(a: &Visit, b: &Visit) -> Ordering {
    a.visited_at()
        .cmp(&b.visited_at())
        .then_with(|| a.id.cmp(&b.id))
}
