//! Round raw coordinates into deduplication cells.
//!
//! Two visits are the same place exactly when their [`ClusterKey`]s are
//! equal. The grid resolution lives in one [`ClusterPrecision`] value so
//! every call site clusters with the same tolerance.
//!
//! # Examples
//! ```
//! use geo::Coord;
//! use tripscore_core::{ClusterPrecision, cluster_key};
//!
//! let precision = ClusterPrecision::default();
//! let a = cluster_key(Coord { x: 139.0, y: 35.0 }, precision);
//! let b = cluster_key(Coord { x: 139.004, y: 35.004 }, precision);
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "35.00,139.00");
//! ```

use std::fmt;

use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Decimal places used when no precision is configured (~1.1 km cells).
pub const DEFAULT_CLUSTER_DECIMALS: u8 = 2;

/// Finest supported precision (~0.1 m cells).
pub const MAX_CLUSTER_DECIMALS: u8 = 6;

/// Number of decimal places coordinates are rounded to before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ClusterPrecision(u8);

/// Errors returned by [`ClusterPrecision::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClusterPrecisionError {
    /// More decimals were requested than the grid supports.
    #[error("cluster precision {requested} exceeds the maximum of {max} decimals")]
    TooFine {
        /// Requested number of decimals.
        requested: u8,
        /// Largest supported number of decimals.
        max: u8,
    },
}

impl ClusterPrecision {
    /// Validate and construct a precision.
    ///
    /// # Errors
    /// Returns [`ClusterPrecisionError::TooFine`] above
    /// [`MAX_CLUSTER_DECIMALS`].
    pub const fn new(decimals: u8) -> Result<Self, ClusterPrecisionError> {
        if decimals > MAX_CLUSTER_DECIMALS {
            return Err(ClusterPrecisionError::TooFine {
                requested: decimals,
                max: MAX_CLUSTER_DECIMALS,
            });
        }
        Ok(Self(decimals))
    }

    /// Number of decimal places.
    #[must_use]
    pub const fn decimals(self) -> u8 {
        self.0
    }

    /// Cells per degree.
    #[must_use]
    pub fn scale(self) -> f64 {
        10_f64.powi(i32::from(self.0))
    }
}

impl Default for ClusterPrecision {
    fn default() -> Self {
        Self(DEFAULT_CLUSTER_DECIMALS)
    }
}

impl TryFrom<u8> for ClusterPrecision {
    type Error = ClusterPrecisionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClusterPrecision> for u8 {
    fn from(value: ClusterPrecision) -> Self {
        value.0
    }
}

/// Identity of one grid cell.
///
/// Keys hold integer cell indices so equality never depends on float
/// formatting. `Display` renders the rounded coordinates as
/// `"<lat>,<lng>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterKey {
    lat_cell: i64,
    lng_cell: i64,
    precision: ClusterPrecision,
}

impl ClusterKey {
    /// Latitude of the cell centre.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "cell indices are bounded by 180 * 10^6 and convert exactly"
    )]
    pub fn lat(&self) -> f64 {
        self.lat_cell as f64 / self.precision.scale()
    }

    /// Longitude of the cell centre.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "cell indices are bounded by 180 * 10^6 and convert exactly"
    )]
    pub fn lng(&self) -> f64 {
        self.lng_cell as f64 / self.precision.scale()
    }
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = usize::from(self.precision.decimals());
        write!(f, "{:.digits$},{:.digits$}", self.lat(), self.lng())
    }
}

impl Serialize for ClusterKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Compute the cluster key for a coordinate (`x = longitude`,
/// `y = latitude`).
///
/// Each axis is rounded half away from zero. Callers must pass a usable
/// coordinate (see [`crate::Visit::coordinate`]).
#[must_use]
pub fn cluster_key(coord: Coord<f64>, precision: ClusterPrecision) -> ClusterKey {
    ClusterKey {
        lat_cell: to_cell(coord.y, precision),
        lng_cell: to_cell(coord.x, precision),
        precision,
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "usable coordinates are within +-180 so scaled cells fit in i64"
)]
fn to_cell(value: f64, precision: ClusterPrecision) -> i64 {
    let cell = (value * precision.scale()).round() as i64;
    // `-0.0` rounds to zero; keep a single representation for the origin.
    if cell == 0 { 0 } else { cell }
}
