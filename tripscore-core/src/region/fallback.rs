//! Last-resort location recovery for legacy records.
//!
//! Neither heuristic is consulted while a visit carries usable country and
//! continent fields; [`super::resolve_location`] only reaches for them when
//! the primary normalised path comes back empty.

use geo::{Coord, Intersects, Rect};

use super::{Continent, country};

/// Approximate continent extents, tested in order.
///
/// Boxes overlap (the Mediterranean, the Middle East, the Bering Strait), so
/// the first match wins. Antarctica and Europe come before the larger boxes
/// they intersect.
const CONTINENT_BOXES: [(Continent, (f64, f64), (f64, f64)); 7] = [
    // (continent, (min lng, min lat), (max lng, max lat))
    (Continent::Antarctica, (-180.0, -90.0), (180.0, -60.0)),
    (Continent::Europe, (-25.0, 35.0), (45.0, 72.0)),
    (Continent::Africa, (-18.0, -35.0), (52.0, 37.5)),
    (Continent::Asia, (25.0, -11.0), (180.0, 81.0)),
    (Continent::Australia, (110.0, -50.0), (180.0, -11.0)),
    (Continent::NorthAmerica, (-170.0, 7.0), (-50.0, 84.0)),
    (Continent::SouthAmerica, (-82.0, -56.0), (-34.0, 13.0)),
];

/// Guess a continent from a coordinate (`x = longitude`, `y = latitude`).
///
/// The boxes are coarse; expect misclassification near their edges.
/// Points outside every box yield [`Continent::Unknown`].
#[must_use]
pub fn continent_from_coordinate(coord: Coord<f64>) -> Continent {
    CONTINENT_BOXES
        .iter()
        .find(|(_, min, max)| {
            let bbox = Rect::new(Coord { x: min.0, y: min.1 }, Coord { x: max.0, y: max.1 });
            // `Intersects` treats boundary points as inside the rectangle.
            bbox.intersects(&coord)
        })
        .map_or(Continent::Unknown, |(continent, _, _)| *continent)
}

/// Recover a canonical country from a free-form address.
///
/// Comma-separated segments are tried from the last one backwards; the first
/// segment naming a known country or region wins. Segments are matched
/// whole, never as substrings.
///
/// # Examples
/// ```
/// use tripscore_core::region::fallback::country_from_address;
///
/// assert_eq!(
///     country_from_address("221B Baker Street, London, England").as_deref(),
///     Some("United Kingdom"),
/// );
/// assert_eq!(country_from_address("Somewhere nice"), None);
/// ```
#[must_use]
pub fn country_from_address(address: &str) -> Option<String> {
    address
        .rsplit(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .find(|segment| country::is_known_country(segment))
        .map(country::normalize_country)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(139.69, 35.69, Continent::Asia)]
    #[case(2.35, 48.86, Continent::Europe)]
    #[case(31.24, 30.04, Continent::Africa)]
    #[case(151.21, -33.87, Continent::Australia)]
    #[case(-74.0, 40.71, Continent::NorthAmerica)]
    #[case(-58.38, -34.6, Continent::SouthAmerica)]
    #[case(0.0, -75.0, Continent::Antarctica)]
    #[case(-30.0, -40.0, Continent::Unknown)]
    fn bounding_boxes_cover_major_cities(
        #[case] lng: f64,
        #[case] lat: f64,
        #[case] expected: Continent,
    ) {
        assert_eq!(continent_from_coordinate(Coord { x: lng, y: lat }), expected);
    }

    #[rstest]
    #[case("1600 Pennsylvania Ave NW, Washington, DC 20500, USA", Some("United States"))]
    #[case("Shibuya, Tokyo, Japan", Some("Japan"))]
    #[case("Edinburgh, Scotland", Some("United Kingdom"))]
    #[case("Japanese Garden, Portland", None)]
    #[case("", None)]
    fn address_segments_are_matched_whole(#[case] address: &str, #[case] expected: Option<&str>) {
        assert_eq!(country_from_address(address).as_deref(), expected);
    }
}
