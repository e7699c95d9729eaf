//! Read-only response shapes built from a [`ScoreSnapshot`].
//!
//! Each report is a thin transform: the snapshot already holds the totals,
//! and distances are rounded here and nowhere else.
//!
//! [`ScoreSnapshot`]: crate::ScoreSnapshot

mod continents;
mod countries;
mod country;
mod travel_map;

use chrono::{DateTime, Utc};
use geo::Coord;
use serde::Serialize;

pub use continents::{ContinentEntry, ContinentsReport, continents_report};
pub use countries::{CountriesReport, CountryEntry, countries_report};
pub use country::{CountryDetails, PlaceDetail, country_details};
pub use travel_map::{TravelMap, TravelMapPlace, TravelStatistics, travel_map};

/// A point as `{lat, lng}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl From<Coord<f64>> for Coordinates {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lng: coord.x,
        }
    }
}

/// Timestamps in reports are RFC 3339 UTC strings.
pub(crate) fn report_date(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
