//! Errors surfaced to callers of the engine.

use thiserror::Error;
use tripscore_core::{UserIdError, VisitStoreError};

/// Errors raised while answering a score request.
///
/// Validation failures are raised before any visit is read. Storage
/// failures abort the request; no partial aggregation is returned.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The user identifier failed validation.
    #[error("invalid user id: {0}")]
    InvalidUser(#[from] UserIdError),
    /// The continent in a continent query did not name one of the seven
    /// continents.
    #[error("unknown continent {name:?}")]
    UnknownContinent {
        /// Continent as supplied by the caller.
        name: String,
    },
    /// The engine configuration cannot serve requests.
    #[error("invalid engine configuration: {reason}")]
    InvalidConfig {
        /// Which setting is unusable.
        reason: &'static str,
    },
    /// Reading visits failed.
    #[error("internal error while reading visits")]
    Storage(#[from] VisitStoreError),
}
