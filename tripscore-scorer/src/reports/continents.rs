//! Per-continent breakdown.

use serde::Serialize;
use tripscore_core::{Continent, round_km};

use crate::ScoreSnapshot;

/// One continent row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinentEntry {
    /// Continent key, for example `ASIA`.
    pub name: Continent,
    /// Unique places on the continent.
    pub score: usize,
    /// Cumulative distance between the continent's places, whole kilometres.
    pub distance_km: u64,
}

/// `{ totalScore, unknownScore, continents: [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinentsReport {
    /// Every unique place, including those with no known continent.
    pub total_score: usize,
    /// Places whose continent could not be determined.
    pub unknown_score: usize,
    /// All seven named continents in fixed order, visited or not.
    pub continents: Vec<ContinentEntry>,
}

/// Shape an unscoped snapshot into the continents breakdown.
#[must_use]
pub fn continents_report(snapshot: &ScoreSnapshot) -> ContinentsReport {
    let continents = Continent::NAMED
        .into_iter()
        .map(|continent| ContinentEntry {
            name: continent,
            score: snapshot.continent_score(continent),
            distance_km: round_km(snapshot.continent_distance_km(continent)),
        })
        .collect();
    ContinentsReport {
        total_score: snapshot.total_score(),
        unknown_score: snapshot.unknown_score(),
        continents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scope, aggregate};
    use rstest::rstest;
    use tripscore_core::ClusterPrecision;
    use tripscore_core::test_support::VisitBuilder;

    #[rstest]
    fn unvisited_continents_report_zero() {
        let visits = [
            VisitBuilder::new("v1", "alice")
                .at(48.8566, 2.3522)
                .country("France")
                .day(1)
                .build(),
            VisitBuilder::new("v2", "alice")
                .at(51.5074, -0.1278)
                .country("England")
                .day(2)
                .build(),
        ];
        let report = continents_report(&aggregate(
            &visits,
            &Scope::All,
            ClusterPrecision::default(),
        ));

        assert_eq!(report.total_score, 2);
        assert_eq!(report.continents.len(), 7);
        let europe = report
            .continents
            .iter()
            .find(|entry| entry.name == Continent::Europe)
            .expect("europe row");
        assert_eq!(europe.score, 2);
        assert_eq!(europe.distance_km, 344);
        let africa = report
            .continents
            .iter()
            .find(|entry| entry.name == Continent::Africa)
            .expect("africa row");
        assert_eq!((africa.score, africa.distance_km), (0, 0));
    }

    #[rstest]
    fn serialises_with_continent_keys() {
        let report = continents_report(&ScoreSnapshot::default());
        let json = serde_json::to_value(&report).expect("serialise report");
        assert_eq!(json["totalScore"], 0);
        assert_eq!(json["unknownScore"], 0);
        assert_eq!(json["continents"][2]["name"], "NORTH_AMERICA");
        assert_eq!(json["continents"][2]["distanceKm"], 0);
    }
}
