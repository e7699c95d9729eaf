//! Canonical continent and country buckets.
//!
//! The primary path folds the continent and country strings attached to a
//! visit through fixed lookup tables ([`normalize_continent`],
//! [`normalize_country`]). When those come back empty the [`reference`]
//! table supplies the continent of a known country, and only then do the
//! legacy heuristics in [`fallback`] run.

mod continent;
mod country;
pub mod fallback;
pub mod reference;

use geo::Coord;
use serde::Serialize;

pub use continent::{Continent, normalize_continent};
pub use country::{UNKNOWN_COUNTRY, is_known_country, normalize_country};

use crate::Visit;

/// Continent and country a visit is scored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLocation {
    /// Canonical continent.
    pub continent: Continent,
    /// Canonical country name.
    pub country: String,
}

/// Resolve the canonical location of a visit at `coord`.
///
/// 1. The country is the normalised country field, or, when that is blank,
///    a country recovered from the address.
/// 2. The continent is the normalised continent field; when that is
///    unknown, the reference-table continent of the country; when that is
///    unknown too, the bounding-box guess for `coord`.
#[must_use]
pub fn resolve_location(visit: &Visit, coord: Coord<f64>) -> ResolvedLocation {
    let country = if visit.raw_country.trim().is_empty() {
        fallback::country_from_address(&visit.address)
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_owned())
    } else {
        normalize_country(&visit.raw_country)
    };

    let mut continent = normalize_continent(&visit.raw_continent);
    if !continent.is_named() {
        continent = reference::continent_of_country(&country);
    }
    if !continent.is_named() {
        continent = fallback::continent_from_coordinate(coord);
        log::debug!(
            "visit {} resolved to {continent} from coordinates alone",
            visit.id
        );
    }

    ResolvedLocation { continent, country }
}

/// Fold a raw name for table lookups: trim, upper-case, treat `_` as a
/// space, and collapse runs of whitespace.
pub(crate) fn fold(raw: &str) -> String {
    raw.to_uppercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
