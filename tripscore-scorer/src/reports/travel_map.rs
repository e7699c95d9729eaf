//! Chronological travel map.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tripscore_core::round_km;

use super::report_date;
use crate::ScoreSnapshot;

/// One numbered stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelMapPlace {
    /// Position in chronological-dedup order, from 1.
    pub number: usize,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Address of the representative visit.
    pub address: String,
    /// First visit, RFC 3339.
    pub date: String,
}

/// Trip-wide figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelStatistics {
    /// Unique places.
    pub total_places: usize,
    /// Cumulative distance across every place, whole kilometres.
    pub total_distance_km: u64,
    /// Whole days from the first place to `now`; zero without places.
    pub total_days_since_first_visit: u64,
}

/// `{ places: [...], statistics: {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelMap {
    /// Stops in the order they were first visited.
    pub places: Vec<TravelMapPlace>,
    /// Trip-wide figures.
    pub statistics: TravelStatistics,
}

/// Shape an unscoped snapshot into the travel map as of `now`.
#[must_use]
pub fn travel_map(snapshot: &ScoreSnapshot, now: DateTime<Utc>) -> TravelMap {
    let places: Vec<TravelMapPlace> = snapshot
        .places()
        .iter()
        .zip(1..)
        .map(|(place, number)| TravelMapPlace {
            number,
            lat: place.coordinate.y,
            lng: place.coordinate.x,
            address: place.address.clone(),
            date: report_date(place.first_visited_at),
        })
        .collect();

    let days = snapshot.places().first().map_or(0, |first| {
        let elapsed = now.signed_duration_since(first.first_visited_at).num_days();
        u64::try_from(elapsed).unwrap_or(0)
    });

    TravelMap {
        statistics: TravelStatistics {
            total_places: places.len(),
            total_distance_km: round_km(snapshot.distance_km()),
            total_days_since_first_visit: days,
        },
        places,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scope, aggregate};
    use rstest::rstest;
    use tripscore_core::ClusterPrecision;
    use tripscore_core::test_support::{VisitBuilder, day};

    fn snapshot() -> ScoreSnapshot {
        let visits = [
            VisitBuilder::new("paris", "alice")
                .at(48.8566, 2.3522)
                .address("Paris")
                .day(10)
                .build(),
            VisitBuilder::new("london", "alice")
                .at(51.5074, -0.1278)
                .address("London")
                .day(3)
                .build(),
            VisitBuilder::new("london-again", "alice")
                .at(51.5071, -0.1281)
                .day(20)
                .build(),
        ];
        aggregate(&visits, &Scope::All, ClusterPrecision::default())
    }

    #[rstest]
    fn places_are_numbered_chronologically() {
        let map = travel_map(&snapshot(), day(30));
        let stops: Vec<(usize, &str)> = map
            .places
            .iter()
            .map(|p| (p.number, p.address.as_str()))
            .collect();
        assert_eq!(stops, [(1, "London"), (2, "Paris")]);
        assert_eq!(map.statistics.total_places, 2);
        assert_eq!(map.statistics.total_distance_km, 344);
        assert_eq!(map.statistics.total_days_since_first_visit, 27);
    }

    #[rstest]
    fn first_visit_in_the_future_floors_at_zero() {
        let map = travel_map(&snapshot(), day(0));
        assert_eq!(map.statistics.total_days_since_first_visit, 0);
    }

    #[rstest]
    fn empty_map_has_zero_statistics() {
        let map = travel_map(&ScoreSnapshot::default(), day(30));
        assert!(map.places.is_empty());
        assert_eq!(
            map.statistics,
            TravelStatistics {
                total_places: 0,
                total_distance_km: 0,
                total_days_since_first_visit: 0,
            }
        );
    }
}
