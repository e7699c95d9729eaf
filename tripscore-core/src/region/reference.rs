//! Static table of the countries expected on each continent.
//!
//! Per-continent breakdowns list every country here, visited or not. The
//! table also maps a canonical country back to its continent when a visit
//! carries no usable continent string.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::{Continent, fold};

const ASIA: &[&str] = &[
    "Afghanistan",
    "Armenia",
    "Azerbaijan",
    "Bahrain",
    "Bangladesh",
    "Bhutan",
    "Brunei",
    "Cambodia",
    "China",
    "Georgia",
    "India",
    "Indonesia",
    "Iran",
    "Iraq",
    "Israel",
    "Japan",
    "Jordan",
    "Kazakhstan",
    "Kuwait",
    "Kyrgyzstan",
    "Laos",
    "Lebanon",
    "Malaysia",
    "Maldives",
    "Mongolia",
    "Myanmar",
    "Nepal",
    "North Korea",
    "Oman",
    "Pakistan",
    "Palestine",
    "Philippines",
    "Qatar",
    "Saudi Arabia",
    "Singapore",
    "South Korea",
    "Sri Lanka",
    "Syria",
    "Tajikistan",
    "Thailand",
    "Timor-Leste",
    "Turkey",
    "Turkmenistan",
    "United Arab Emirates",
    "Uzbekistan",
    "Vietnam",
    "Yemen",
];

const AFRICA: &[&str] = &[
    "Algeria",
    "Angola",
    "Benin",
    "Botswana",
    "Burkina Faso",
    "Burundi",
    "Cabo Verde",
    "Cameroon",
    "Central African Republic",
    "Chad",
    "Comoros",
    "Democratic Republic of the Congo",
    "Djibouti",
    "Egypt",
    "Equatorial Guinea",
    "Eritrea",
    "Eswatini",
    "Ethiopia",
    "Gabon",
    "Gambia",
    "Ghana",
    "Guinea",
    "Guinea-Bissau",
    "Ivory Coast",
    "Kenya",
    "Lesotho",
    "Liberia",
    "Libya",
    "Madagascar",
    "Malawi",
    "Mali",
    "Mauritania",
    "Mauritius",
    "Morocco",
    "Mozambique",
    "Namibia",
    "Niger",
    "Nigeria",
    "Republic of the Congo",
    "Rwanda",
    "Sao Tome and Principe",
    "Senegal",
    "Seychelles",
    "Sierra Leone",
    "Somalia",
    "South Africa",
    "South Sudan",
    "Sudan",
    "Tanzania",
    "Togo",
    "Tunisia",
    "Uganda",
    "Zambia",
    "Zimbabwe",
];

const NORTH_AMERICA: &[&str] = &[
    "Antigua and Barbuda",
    "Bahamas",
    "Barbados",
    "Belize",
    "Canada",
    "Costa Rica",
    "Cuba",
    "Dominica",
    "Dominican Republic",
    "El Salvador",
    "Grenada",
    "Guatemala",
    "Haiti",
    "Honduras",
    "Jamaica",
    "Mexico",
    "Nicaragua",
    "Panama",
    "Saint Kitts and Nevis",
    "Saint Lucia",
    "Saint Vincent and the Grenadines",
    "Trinidad and Tobago",
    "United States",
];

const SOUTH_AMERICA: &[&str] = &[
    "Argentina",
    "Bolivia",
    "Brazil",
    "Chile",
    "Colombia",
    "Ecuador",
    "Guyana",
    "Paraguay",
    "Peru",
    "Suriname",
    "Uruguay",
    "Venezuela",
];

const AUSTRALIA: &[&str] = &[
    "Australia",
    "Fiji",
    "Kiribati",
    "Marshall Islands",
    "Micronesia",
    "Nauru",
    "New Zealand",
    "Palau",
    "Papua New Guinea",
    "Samoa",
    "Solomon Islands",
    "Tonga",
    "Tuvalu",
    "Vanuatu",
];

const EUROPE: &[&str] = &[
    "Albania",
    "Andorra",
    "Austria",
    "Belarus",
    "Belgium",
    "Bosnia and Herzegovina",
    "Bulgaria",
    "Croatia",
    "Cyprus",
    "Czech Republic",
    "Denmark",
    "Estonia",
    "Finland",
    "France",
    "Germany",
    "Greece",
    "Hungary",
    "Iceland",
    "Ireland",
    "Italy",
    "Kosovo",
    "Latvia",
    "Liechtenstein",
    "Lithuania",
    "Luxembourg",
    "Malta",
    "Moldova",
    "Monaco",
    "Montenegro",
    "Netherlands",
    "North Macedonia",
    "Norway",
    "Poland",
    "Portugal",
    "Romania",
    "Russia",
    "San Marino",
    "Serbia",
    "Slovakia",
    "Slovenia",
    "Spain",
    "Sweden",
    "Switzerland",
    "Ukraine",
    "United Kingdom",
    "Vatican City",
];

const ANTARCTICA: &[&str] = &["Antarctica"];

/// Folded country name → (canonical spelling, continent).
static COUNTRY_INDEX: LazyLock<HashMap<String, (&'static str, Continent)>> = LazyLock::new(|| {
    Continent::NAMED
        .into_iter()
        .flat_map(|continent| {
            countries_of(continent)
                .iter()
                .map(move |&name| (fold(name), (name, continent)))
        })
        .collect()
});

/// Countries expected on `continent`, alphabetically.
///
/// [`Continent::Unknown`] has no reference countries.
///
/// # Examples
/// ```
/// use tripscore_core::Continent;
/// use tripscore_core::region::reference::countries_of;
///
/// assert!(countries_of(Continent::Asia).contains(&"Japan"));
/// assert!(countries_of(Continent::Unknown).is_empty());
/// ```
#[must_use]
pub const fn countries_of(continent: Continent) -> &'static [&'static str] {
    match continent {
        Continent::Asia => ASIA,
        Continent::Africa => AFRICA,
        Continent::NorthAmerica => NORTH_AMERICA,
        Continent::SouthAmerica => SOUTH_AMERICA,
        Continent::Australia => AUSTRALIA,
        Continent::Europe => EUROPE,
        Continent::Antarctica => ANTARCTICA,
        Continent::Unknown => &[],
    }
}

/// Continent of a reference country, matched case-insensitively.
///
/// Countries outside the table yield [`Continent::Unknown`].
#[must_use]
pub fn continent_of_country(country: &str) -> Continent {
    COUNTRY_INDEX
        .get(&fold(country))
        .map_or(Continent::Unknown, |&(_, continent)| continent)
}

/// Canonical spelling of a reference country, matched case-insensitively.
#[must_use]
pub fn canonical_spelling(country: &str) -> Option<&'static str> {
    COUNTRY_INDEX.get(&fold(country)).map(|&(name, _)| name)
}
