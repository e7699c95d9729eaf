//! Score aggregation and reporting for TripScore.
//!
//! [`aggregate`] turns a user's visits into a [`ScoreSnapshot`]: eligible
//! visits are ordered chronologically, deduplicated into [`UniquePlace`]s by
//! cluster key, and counted once per place. Every total in the snapshot is
//! derived from its children, and a step-wise tally kept during the walk is
//! reconciled against it with a logged warning on disagreement.
//!
//! The [`reports`] module shapes snapshots into the four read-only
//! responses, [`TripScoreEngine`] wires a [`tripscore_core::VisitStore`] and
//! [`tripscore_core::MediaLookup`] to them per request, and [`analytics`]
//! offers the same primitives across all users.

#![forbid(unsafe_code)]

mod aggregate;
pub mod analytics;
mod engine;
mod error;
mod place;
pub mod reports;
mod snapshot;

pub use aggregate::{Scope, aggregate};
pub use analytics::AdminAnalytics;
pub use engine::TripScoreEngine;
pub use error::ScoreError;
pub use place::UniquePlace;
pub use snapshot::{CountryKey, ScoreSnapshot, StepTally, TallyMismatch};
