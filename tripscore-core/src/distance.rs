//! Great-circle distances between visited points.
//!
//! Distances are summed unrounded; [`round_km`] is applied only when a
//! report is shaped.

use geo::Coord;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two coordinates
/// (`x = longitude`, `y = latitude`).
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tripscore_core::haversine_km;
///
/// let london = Coord { x: -0.1278, y: 51.5074 };
/// let paris = Coord { x: 2.3522, y: 48.8566 };
/// let km = haversine_km(london, paris);
/// assert!((km - 343.5).abs() < 1.0);
/// assert_eq!(haversine_km(london, london), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lng = (b.x - a.x).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `h` marginally past 1.0 for antipodal points.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// Sum the distances between consecutive points.
///
/// Points must already be in chronological order. Empty and single-point
/// inputs yield zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "distance totals accumulate floating-point legs"
)]
pub fn cumulative_distance_km<I>(points: I) -> f64
where
    I: IntoIterator<Item = Coord<f64>>,
{
    let mut total = 0.0;
    let mut previous: Option<Coord<f64>> = None;
    for point in points {
        if let Some(prev) = previous {
            total += haversine_km(prev, point);
        }
        previous = Some(point);
    }
    total
}

/// Round a distance to the nearest whole kilometre for display.
///
/// Negative and non-finite inputs yield zero.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is finite, non-negative and bounded by Earth's circumference times the fetch cap"
)]
pub fn round_km(km: f64) -> u64 {
    if !km.is_finite() || km <= 0.0 {
        return 0;
    }
    km.round() as u64
}
