//! Facade crate for the TripScore aggregation engine.
//!
//! This crate re-exports the core domain types, the engine with its reports
//! and analytics, and the SQLite visit store behind the `store-sqlite`
//! feature.

#![forbid(unsafe_code)]

pub use tripscore_core::{
    ClusterKey, ClusterPrecision, Continent, EngineConfig, MediaLookup, MediaRef,
    MemoryVisitStore, NoMediaLookup, TrustLevel, UserId, VerificationStatus, Visit, VisitQuery,
    VisitSource, VisitStore, VisitStoreError,
};
pub use tripscore_scorer::{
    AdminAnalytics, Scope, ScoreError, ScoreSnapshot, TripScoreEngine, UniquePlace, aggregate,
    analytics, reports,
};

#[cfg(feature = "store-sqlite")]
pub use tripscore_data::{SqliteVisitStore, SqliteVisitStoreError, VisitFileError, load_visits_json};
