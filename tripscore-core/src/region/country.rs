//! Canonical country names.
//!
//! Sub-national regions fold into their parent country so one country never
//! fragments into several score buckets.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::{fold, reference};

/// Country reported when a visit carries no usable country at all.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

const UNITED_KINGDOM: &str = "United Kingdom";
const UNITED_STATES: &str = "United States";

const UK_REGIONS: &[&str] = &[
    "ENGLAND",
    "SCOTLAND",
    "WALES",
    "NORTHERN IRELAND",
    "GREAT BRITAIN",
    "BRITAIN",
    "UK",
    "U.K.",
    "GB",
    "UNITED KINGDOM OF GREAT BRITAIN AND NORTHERN IRELAND",
];

// Georgia is deliberately absent: the bare name resolves to the country.
const US_REGIONS: &[&str] = &[
    "USA",
    "US",
    "U.S.",
    "U.S.A.",
    "UNITED STATES OF AMERICA",
    "ALABAMA",
    "ALASKA",
    "ARIZONA",
    "ARKANSAS",
    "CALIFORNIA",
    "COLORADO",
    "CONNECTICUT",
    "DELAWARE",
    "FLORIDA",
    "HAWAII",
    "IDAHO",
    "ILLINOIS",
    "INDIANA",
    "IOWA",
    "KANSAS",
    "KENTUCKY",
    "LOUISIANA",
    "MAINE",
    "MARYLAND",
    "MASSACHUSETTS",
    "MICHIGAN",
    "MINNESOTA",
    "MISSISSIPPI",
    "MISSOURI",
    "MONTANA",
    "NEBRASKA",
    "NEVADA",
    "NEW HAMPSHIRE",
    "NEW JERSEY",
    "NEW MEXICO",
    "NEW YORK",
    "NORTH CAROLINA",
    "NORTH DAKOTA",
    "OHIO",
    "OKLAHOMA",
    "OREGON",
    "PENNSYLVANIA",
    "RHODE ISLAND",
    "SOUTH CAROLINA",
    "SOUTH DAKOTA",
    "TENNESSEE",
    "TEXAS",
    "UTAH",
    "VERMONT",
    "VIRGINIA",
    "WASHINGTON",
    "WEST VIRGINIA",
    "WISCONSIN",
    "WYOMING",
    "DISTRICT OF COLUMBIA",
    "WASHINGTON DC",
    "WASHINGTON D.C.",
    "D.C.",
    "PUERTO RICO",
    "GUAM",
    "U.S. VIRGIN ISLANDS",
    "US VIRGIN ISLANDS",
    "AMERICAN SAMOA",
    "NORTHERN MARIANA ISLANDS",
];

const CANADA_REGIONS: &[&str] = &[
    "ONTARIO",
    "QUEBEC",
    "QUÉBEC",
    "BRITISH COLUMBIA",
    "ALBERTA",
    "MANITOBA",
    "SASKATCHEWAN",
    "NOVA SCOTIA",
    "NEW BRUNSWICK",
    "NEWFOUNDLAND",
    "NEWFOUNDLAND AND LABRADOR",
    "PRINCE EDWARD ISLAND",
    "YUKON",
    "NORTHWEST TERRITORIES",
    "NUNAVUT",
];

const AUSTRALIA_REGIONS: &[&str] = &[
    "NEW SOUTH WALES",
    "VICTORIA",
    "QUEENSLAND",
    "SOUTH AUSTRALIA",
    "WESTERN AUSTRALIA",
    "TASMANIA",
    "NORTHERN TERRITORY",
    "AUSTRALIAN CAPITAL TERRITORY",
];

const CHINA_REGIONS: &[&str] = &[
    "HONG KONG",
    "HONG KONG SAR",
    "MACAU",
    "MACAO",
    "TAIWAN",
    "PRC",
    "PEOPLE'S REPUBLIC OF CHINA",
];

/// One-off spellings of reference countries.
const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("CZECHIA", "Czech Republic"),
    ("HOLLAND", "Netherlands"),
    ("THE NETHERLANDS", "Netherlands"),
    ("KOREA", "South Korea"),
    ("REPUBLIC OF KOREA", "South Korea"),
    ("KOREA, REPUBLIC OF", "South Korea"),
    ("RUSSIAN FEDERATION", "Russia"),
    ("UAE", "United Arab Emirates"),
    ("VIET NAM", "Vietnam"),
    ("TÜRKIYE", "Turkey"),
    ("TURKIYE", "Turkey"),
    ("CÔTE D'IVOIRE", "Ivory Coast"),
    ("COTE D'IVOIRE", "Ivory Coast"),
    ("DRC", "Democratic Republic of the Congo"),
    ("DR CONGO", "Democratic Republic of the Congo"),
    ("BURMA", "Myanmar"),
    ("SWAZILAND", "Eswatini"),
    ("CAPE VERDE", "Cabo Verde"),
    ("MACEDONIA", "North Macedonia"),
    ("VATICAN", "Vatican City"),
    ("HOLY SEE", "Vatican City"),
    ("EAST TIMOR", "Timor-Leste"),
];

static REGION_INDEX: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let parents: [(&[&str], &str); 5] = [
        (UK_REGIONS, UNITED_KINGDOM),
        (US_REGIONS, UNITED_STATES),
        (CANADA_REGIONS, "Canada"),
        (AUSTRALIA_REGIONS, "Australia"),
        (CHINA_REGIONS, "China"),
    ];
    parents
        .into_iter()
        .flat_map(|(regions, parent)| regions.iter().map(move |&region| (region, parent)))
        .chain(COUNTRY_ALIASES.iter().copied())
        .collect()
});

/// Fold a raw country string into its canonical name.
///
/// Regions resolve to their parent country, aliases and case variants of
/// reference countries resolve to the reference spelling, and anything else
/// passes through trimmed but otherwise unchanged. Blank input yields
/// [`UNKNOWN_COUNTRY`]. The transform is idempotent.
///
/// # Examples
/// ```
/// use tripscore_core::normalize_country;
///
/// assert_eq!(normalize_country("England"), "United Kingdom");
/// assert_eq!(normalize_country("california"), "United States");
/// assert_eq!(normalize_country("Hong Kong"), "China");
/// assert_eq!(normalize_country("JAPAN"), "Japan");
/// assert_eq!(normalize_country("Freedonia"), "Freedonia");
/// ```
#[must_use]
pub fn normalize_country(raw: &str) -> String {
    let folded = fold(raw);
    if folded.is_empty() {
        return UNKNOWN_COUNTRY.to_owned();
    }
    if let Some(parent) = REGION_INDEX.get(folded.as_str()) {
        return (*parent).to_owned();
    }
    reference::canonical_spelling(&folded)
        .map_or_else(|| raw.trim().to_owned(), ToOwned::to_owned)
}

/// Report whether `country` names a country from the reference table or a
/// known alias of one.
#[must_use]
pub fn is_known_country(country: &str) -> bool {
    let folded = fold(country);
    REGION_INDEX.contains_key(folded.as_str()) || reference::canonical_spelling(&folded).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("England", UNITED_KINGDOM)]
    #[case("Scotland", UNITED_KINGDOM)]
    #[case("wales", UNITED_KINGDOM)]
    #[case("Northern Ireland", UNITED_KINGDOM)]
    #[case("Great Britain", UNITED_KINGDOM)]
    #[case("UK", UNITED_KINGDOM)]
    #[case("Texas", UNITED_STATES)]
    #[case("new york", UNITED_STATES)]
    #[case("District of Columbia", UNITED_STATES)]
    #[case("Puerto Rico", UNITED_STATES)]
    #[case("USA", UNITED_STATES)]
    #[case("Ontario", "Canada")]
    #[case("Québec", "Canada")]
    #[case("New South Wales", "Australia")]
    #[case("Tasmania", "Australia")]
    #[case("Taiwan", "China")]
    #[case("Macau", "China")]
    #[case("Czechia", "Czech Republic")]
    #[case("Georgia", "Georgia")]
    fn regions_fold_into_parent_countries(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_country(raw), expected);
    }

    #[rstest]
    #[case("  france ", "France")]
    #[case("UNITED KINGDOM", UNITED_KINGDOM)]
    #[case("Freedonia", "Freedonia")]
    #[case("  Freedonia  ", "Freedonia")]
    #[case("", UNKNOWN_COUNTRY)]
    #[case("   ", UNKNOWN_COUNTRY)]
    fn reference_and_passthrough(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_country(raw), expected);
    }

    #[rstest]
    #[case("England")]
    #[case("texas")]
    #[case("Freedonia")]
    #[case("")]
    #[case("hong kong")]
    fn normalisation_is_idempotent(#[case] raw: &str) {
        let once = normalize_country(raw);
        assert_eq!(normalize_country(&once), once);
    }

    #[rstest]
    fn every_alias_target_is_a_reference_country() {
        for parent in REGION_INDEX.values() {
            assert!(
                reference::canonical_spelling(parent).is_some(),
                "{parent} missing from reference table"
            );
        }
    }

    #[rstest]
    #[case("Scotland", true)]
    #[case("japan", true)]
    #[case("Freedonia", false)]
    fn known_country_detection(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(is_known_country(raw), expected);
    }
}
