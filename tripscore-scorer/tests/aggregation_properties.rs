//! Property-based tests for score aggregation.
//!
//! # Invariants tested
//!
//! - **Order independence:** shuffling the visits never changes the snapshot.
//! - **Bottom-up totals:** the total equals the sum of continent scores,
//!   `UNKNOWN` included, and each continent equals the sum of its countries.
//! - **Gating:** ineligible visits contribute nothing and never represent a
//!   place.
//! - **One place per cell:** the place count equals the number of distinct
//!   cluster keys among eligible visits with usable coordinates.

use std::collections::HashSet;

use proptest::prelude::*;
use tripscore_core::test_support::VisitBuilder;
use tripscore_core::{ClusterPrecision, Continent, VerificationStatus, Visit, cluster_key};
use tripscore_scorer::{Scope, aggregate};

/// Cell centres; jitter below half a cell keeps each visit in its anchor's cell.
const ANCHORS: [(f64, f64); 6] = [
    (35.0, 139.0),
    (48.8, 2.3),
    (51.5, -0.12),
    (-33.87, 151.21),
    (40.71, -74.0),
    (-40.0, -30.0),
];

const COUNTRIES: [&str; 7] = ["", "Japan", "England", "Scotland", "texas", "Freedonia", "France"];
const CONTINENTS: [&str; 5] = ["", "Asia", "europe", "Oceania", "Atlantis"];

fn visit_strategy() -> impl Strategy<Value = (usize, f64, f64, usize, usize, usize, bool, i64)> {
    (
        0..ANCHORS.len(),
        -0.004_f64..0.004_f64,
        -0.004_f64..0.004_f64,
        0..COUNTRIES.len(),
        0..CONTINENTS.len(),
        0..VerificationStatus::ALL.len(),
        proptest::bool::weighted(0.9),
        0_i64..60,
    )
}

#[expect(
    clippy::float_arithmetic,
    reason = "jitter is added to anchor coordinates"
)]
fn build(index: usize, raw: (usize, f64, f64, usize, usize, usize, bool, i64)) -> Visit {
    let (anchor, d_lat, d_lng, country, continent, status, active, day) = raw;
    let (lat, lng) = ANCHORS.get(anchor).copied().unwrap_or((35.0, 139.0));
    let mut builder = VisitBuilder::new(&format!("v{index:03}"), "alice")
        .at(lat + d_lat, lng + d_lng)
        .country(COUNTRIES.get(country).copied().unwrap_or_default())
        .continent(CONTINENTS.get(continent).copied().unwrap_or_default())
        .active(active)
        .day(day);
    if let Some(s) = VerificationStatus::ALL.get(status) {
        builder = builder.status(*s);
    }
    builder.build()
}

fn visits_strategy() -> impl Strategy<Value = Vec<Visit>> {
    prop::collection::vec(visit_strategy(), 0..40).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(index, fields)| build(index, fields))
            .collect()
    })
}

fn shuffled_pair() -> impl Strategy<Value = (Vec<Visit>, Vec<Visit>)> {
    visits_strategy().prop_flat_map(|visits| {
        let original = visits.clone();
        Just(visits)
            .prop_shuffle()
            .prop_map(move |shuffled| (original.clone(), shuffled))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn aggregation_is_order_independent((original, shuffled) in shuffled_pair()) {
        let precision = ClusterPrecision::default();
        prop_assert_eq!(
            aggregate(&original, &Scope::All, precision),
            aggregate(&shuffled, &Scope::All, precision)
        );
    }

    #[test]
    fn totals_are_sums_of_children(visits in visits_strategy()) {
        let snapshot = aggregate(&visits, &Scope::All, ClusterPrecision::default());
        let continent_sum: usize = snapshot.continents().map(|(_, score)| score).sum();
        prop_assert_eq!(snapshot.total_score(), continent_sum);
        prop_assert_eq!(snapshot.total_score(), snapshot.places().len());

        let named: usize = Continent::NAMED
            .iter()
            .map(|continent| snapshot.continent_score(*continent))
            .sum();
        prop_assert_eq!(named + snapshot.unknown_score(), snapshot.total_score());

        for continent in Continent::NAMED.into_iter().chain([Continent::Unknown]) {
            let countries: usize = snapshot.countries_in(continent).map(|(_, s)| s).sum();
            prop_assert_eq!(countries, snapshot.continent_score(continent));
        }
    }

    #[test]
    fn scoped_totals_match_the_unscoped_breakdown(visits in visits_strategy()) {
        let precision = ClusterPrecision::default();
        let all = aggregate(&visits, &Scope::All, precision);
        for continent in Continent::NAMED {
            let scoped = aggregate(&visits, &Scope::Continent(continent), precision);
            prop_assert_eq!(scoped.total_score(), all.continent_score(continent));
        }
    }

    #[test]
    fn ineligible_visits_never_count(visits in visits_strategy()) {
        let precision = ClusterPrecision::default();
        let eligible: Vec<Visit> = visits
            .iter()
            .filter(|v| v.is_scoring_eligible())
            .cloned()
            .collect();
        let ineligible: HashSet<&str> = visits
            .iter()
            .filter(|v| !v.is_scoring_eligible())
            .map(|v| v.id.as_str())
            .collect();

        let snapshot = aggregate(&visits, &Scope::All, precision);
        prop_assert_eq!(&snapshot, &aggregate(&eligible, &Scope::All, precision));
        for place in snapshot.places() {
            prop_assert!(!ineligible.contains(place.first_visit_id.as_str()));
        }
    }

    #[test]
    fn one_place_per_cell(visits in visits_strategy()) {
        let precision = ClusterPrecision::default();
        let cells: HashSet<_> = visits
            .iter()
            .filter(|v| v.is_scoring_eligible())
            .filter_map(Visit::coordinate)
            .map(|coord| cluster_key(coord, precision))
            .collect();
        let snapshot = aggregate(&visits, &Scope::All, precision);
        prop_assert_eq!(snapshot.total_score(), cells.len());
    }
}
