//! Countries of one continent.

use serde::Serialize;
use tripscore_core::Continent;
use tripscore_core::region::reference::countries_of;

use crate::ScoreSnapshot;

/// One country row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryEntry {
    /// Canonical country name.
    pub name: String,
    /// Unique places in the country.
    pub score: usize,
    /// `score > 0`.
    pub visited: bool,
}

/// `{ continent, continentScore, countries: [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountriesReport {
    /// Continent key.
    pub continent: Continent,
    /// Sum of the country scores.
    pub continent_score: usize,
    /// Reference countries plus any other visited country, alphabetically.
    pub countries: Vec<CountryEntry>,
}

/// Shape a snapshot into the countries of `continent`.
///
/// Every reference country of the continent is listed, so unvisited ones
/// appear with score zero. Visited countries missing from the reference
/// table are listed too.
#[must_use]
pub fn countries_report(snapshot: &ScoreSnapshot, continent: Continent) -> CountriesReport {
    let mut countries: Vec<CountryEntry> = countries_of(continent)
        .iter()
        .map(|&name| entry(name.to_owned(), snapshot.country_score(continent, name)))
        .collect();
    for (name, score) in snapshot.countries_in(continent) {
        if !countries.iter().any(|existing| existing.name == name) {
            countries.push(entry(name.to_owned(), score));
        }
    }
    countries.sort_by(|a, b| a.name.cmp(&b.name));

    CountriesReport {
        continent,
        continent_score: snapshot.continent_score(continent),
        countries,
    }
}

const fn entry(name: String, score: usize) -> CountryEntry {
    CountryEntry {
        name,
        score,
        visited: score > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scope, aggregate};
    use rstest::rstest;
    use tripscore_core::ClusterPrecision;
    use tripscore_core::test_support::VisitBuilder;

    fn report(visits: &[tripscore_core::Visit], continent: Continent) -> CountriesReport {
        let snapshot = aggregate(
            visits,
            &Scope::Continent(continent),
            ClusterPrecision::default(),
        );
        countries_report(&snapshot, continent)
    }

    #[rstest]
    fn uk_nations_fold_into_one_row() {
        let visits = [
            VisitBuilder::new("v1", "alice")
                .at(51.5, -0.12)
                .country("England")
                .continent("Europe")
                .build(),
            VisitBuilder::new("v2", "alice")
                .at(55.95, -3.19)
                .country("Scotland")
                .continent("Europe")
                .day(1)
                .build(),
        ];
        let europe = report(&visits, Continent::Europe);
        let uk: Vec<&CountryEntry> = europe
            .countries
            .iter()
            .filter(|c| c.name == "United Kingdom")
            .collect();
        assert_eq!(uk.len(), 1);
        assert_eq!(uk.first().map(|c| c.score), Some(2));
        assert_eq!(europe.continent_score, 2);
    }

    #[rstest]
    fn unvisited_reference_countries_are_listed() {
        let asia = report(&[], Continent::Asia);
        assert_eq!(asia.continent_score, 0);
        assert_eq!(asia.countries.len(), countries_of(Continent::Asia).len());
        assert!(asia.countries.iter().all(|c| !c.visited && c.score == 0));
    }

    #[rstest]
    fn unlisted_visited_country_is_merged_alphabetically() {
        let visits = [VisitBuilder::new("v1", "alice")
            .at(46.0, 8.0)
            .country("Freedonia")
            .continent("Europe")
            .build()];
        let europe = report(&visits, Continent::Europe);
        let names: Vec<&str> = europe.countries.iter().map(|c| c.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        let freedonia = europe
            .countries
            .iter()
            .find(|c| c.name == "Freedonia")
            .expect("freedonia row");
        assert!(freedonia.visited);
        let sum: usize = europe.countries.iter().map(|c| c.score).sum();
        assert_eq!(sum, europe.continent_score);
    }
}
