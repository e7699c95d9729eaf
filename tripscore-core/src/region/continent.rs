//! Canonical continent buckets.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::fold;

/// One of the seven canonical continents, or `Unknown`.
///
/// Keys (`ASIA`, `NORTH_AMERICA`, ...) are used in every report; display
/// names are title case.
///
/// # Examples
/// ```
/// use tripscore_core::{Continent, normalize_continent};
///
/// assert_eq!(normalize_continent("Oceania"), Continent::Australia);
/// assert_eq!(normalize_continent("north_america"), Continent::NorthAmerica);
/// assert_eq!(Continent::NorthAmerica.key(), "NORTH_AMERICA");
/// assert_eq!(normalize_continent("Atlantis"), Continent::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Continent {
    /// Asia, including the Middle East.
    Asia,
    /// Africa.
    Africa,
    /// North and Central America and the Caribbean.
    NorthAmerica,
    /// South America.
    SouthAmerica,
    /// Australia and Oceania.
    Australia,
    /// Europe.
    Europe,
    /// Antarctica.
    Antarctica,
    /// Input that could not be mapped.
    Unknown,
}

impl Continent {
    /// The seven named continents in report order.
    pub const NAMED: [Self; 7] = [
        Self::Asia,
        Self::Africa,
        Self::NorthAmerica,
        Self::SouthAmerica,
        Self::Australia,
        Self::Europe,
        Self::Antarctica,
    ];

    /// Upper-case key used in reports.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Asia => "ASIA",
            Self::Africa => "AFRICA",
            Self::NorthAmerica => "NORTH_AMERICA",
            Self::SouthAmerica => "SOUTH_AMERICA",
            Self::Australia => "AUSTRALIA",
            Self::Europe => "EUROPE",
            Self::Antarctica => "ANTARCTICA",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Asia => "Asia",
            Self::Africa => "Africa",
            Self::NorthAmerica => "North America",
            Self::SouthAmerica => "South America",
            Self::Australia => "Australia",
            Self::Europe => "Europe",
            Self::Antarctica => "Antarctica",
            Self::Unknown => "Unknown",
        }
    }

    /// Report whether this is one of the seven named continents.
    #[must_use]
    pub const fn is_named(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Synonyms, already folded. "America" alone is treated as North America.
const CONTINENT_SYNONYMS: &[(&str, Continent)] = &[
    ("ASIA", Continent::Asia),
    ("ASIAN", Continent::Asia),
    ("ASIA PACIFIC", Continent::Asia),
    ("EAST ASIA", Continent::Asia),
    ("SOUTH ASIA", Continent::Asia),
    ("SOUTHEAST ASIA", Continent::Asia),
    ("SOUTH-EAST ASIA", Continent::Asia),
    ("CENTRAL ASIA", Continent::Asia),
    ("WESTERN ASIA", Continent::Asia),
    ("MIDDLE EAST", Continent::Asia),
    ("AFRICA", Continent::Africa),
    ("AFRICAN", Continent::Africa),
    ("NORTH AFRICA", Continent::Africa),
    ("WEST AFRICA", Continent::Africa),
    ("EAST AFRICA", Continent::Africa),
    ("CENTRAL AFRICA", Continent::Africa),
    ("SOUTHERN AFRICA", Continent::Africa),
    ("SUB-SAHARAN AFRICA", Continent::Africa),
    ("NORTH AMERICA", Continent::NorthAmerica),
    ("NORTHAMERICA", Continent::NorthAmerica),
    ("N. AMERICA", Continent::NorthAmerica),
    ("AMERICA", Continent::NorthAmerica),
    ("CENTRAL AMERICA", Continent::NorthAmerica),
    ("CARIBBEAN", Continent::NorthAmerica),
    ("SOUTH AMERICA", Continent::SouthAmerica),
    ("SOUTHAMERICA", Continent::SouthAmerica),
    ("S. AMERICA", Continent::SouthAmerica),
    ("AUSTRALIA", Continent::Australia),
    ("OCEANIA", Continent::Australia),
    ("AUSTRALASIA", Continent::Australia),
    ("AUSTRALIA/OCEANIA", Continent::Australia),
    ("AUSTRALIA AND OCEANIA", Continent::Australia),
    ("EUROPE", Continent::Europe),
    ("EUROPEAN", Continent::Europe),
    ("WESTERN EUROPE", Continent::Europe),
    ("EASTERN EUROPE", Continent::Europe),
    ("NORTHERN EUROPE", Continent::Europe),
    ("SOUTHERN EUROPE", Continent::Europe),
    ("ANTARCTICA", Continent::Antarctica),
    ("ANTARCTIC", Continent::Antarctica),
];

static CONTINENT_INDEX: LazyLock<HashMap<&'static str, Continent>> =
    LazyLock::new(|| CONTINENT_SYNONYMS.iter().copied().collect());

/// Fold a raw continent string into its canonical bucket.
///
/// The lookup is pure and idempotent: a continent's key or display name
/// normalises back to itself. Empty or unmapped input yields
/// [`Continent::Unknown`].
#[must_use]
pub fn normalize_continent(raw: &str) -> Continent {
    let folded = fold(raw);
    CONTINENT_INDEX
        .get(folded.as_str())
        .copied()
        .unwrap_or(Continent::Unknown)
}
