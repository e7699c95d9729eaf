//! Core domain types for the TripScore engine.
//!
//! The crate holds the leaf components every score is built from:
//!
//! - [`Visit`] and its classification enums, as handed over by the ingestion
//!   pipeline.
//! - [`cluster`]: rounding raw coordinates into deduplication cells.
//! - [`region`]: folding raw continent and country strings into canonical
//!   buckets, plus the static reference table of countries per continent.
//! - [`distance`]: great-circle distances between chronologically ordered
//!   points.
//! - [`VisitStore`] and [`MediaLookup`]: the read-only seams to the
//!   collaborators that own visits and media.
//!
//! Nothing in this crate writes to a visit; scores are derived elsewhere and
//! recomputed per request.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cluster;
pub mod config;
pub mod distance;
pub mod media;
pub mod region;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
pub mod visit;

pub use cluster::{ClusterKey, ClusterPrecision, ClusterPrecisionError, cluster_key};
pub use config::{DEFAULT_FETCH_LIMIT, EngineConfig};
pub use distance::{EARTH_RADIUS_KM, cumulative_distance_km, haversine_km, round_km};
pub use media::{MediaLookup, MediaLookupError, MediaRef, NoMediaLookup, PlaceMediaRequest};
pub use region::{
    Continent, ResolvedLocation, UNKNOWN_COUNTRY, normalize_continent, normalize_country,
    resolve_location,
};
pub use store::{MemoryVisitStore, VisitQuery, VisitStore, VisitStoreError};
pub use visit::{TrustLevel, UserId, UserIdError, VerificationStatus, Visit, VisitSource};
