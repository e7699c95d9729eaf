//! Tunables shared by every aggregation.

use serde::{Deserialize, Serialize};

use crate::ClusterPrecision;

/// Upper bound on visits read for one request.
///
/// Reads are capped so a single heavy user cannot stall a request. A visit
/// set that reaches the cap is scored from the visits that were read, and
/// the truncation is logged.
pub const DEFAULT_FETCH_LIMIT: usize = 1000;

/// Engine configuration.
///
/// # Examples
/// ```
/// use tripscore_core::{DEFAULT_FETCH_LIMIT, EngineConfig};
///
/// let config = EngineConfig::default();
/// assert_eq!(config.fetch_limit, DEFAULT_FETCH_LIMIT);
/// assert_eq!(config.cluster_precision.decimals(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Grid resolution used to deduplicate visits into places.
    pub cluster_precision: ClusterPrecision,
    /// Maximum number of visits fetched per request.
    pub fetch_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cluster_precision: ClusterPrecision::default(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Replace the cluster precision.
    #[must_use]
    pub const fn with_cluster_precision(mut self, precision: ClusterPrecision) -> Self {
        self.cluster_precision = precision;
        self
    }

    /// Replace the fetch limit.
    #[must_use]
    pub const fn with_fetch_limit(mut self, fetch_limit: usize) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }
}
