//! Visit sources for the TripScore engine.
//!
//! Two read-only backends implement [`tripscore_core::VisitStore`]:
//!
//! - [`SqliteVisitStore`] reads the `visits` table of a SQLite database,
//!   honouring the per-request owner and limit in SQL.
//! - [`load_visits_json`] loads a JSON export into a
//!   [`tripscore_core::MemoryVisitStore`].
//!
//! Neither backend ever writes.

#![forbid(unsafe_code)]

pub mod fs;
pub mod json;
pub mod sqlite;
#[doc(hidden)]
pub mod test_support;

pub use json::{VisitFileError, load_visits_json};
pub use sqlite::{SqliteVisitStore, SqliteVisitStoreError, VISITS_TABLE_SQL};
