//! Load visits from a JSON export.
//!
//! The file holds an array of visits in the camelCase layout of
//! [`tripscore_core::Visit`]. Loaded visits are served from memory.

use std::io::{self, BufReader};

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use thiserror::Error;
use tripscore_core::{MemoryVisitStore, Visit};

use crate::fs::open_utf8_file;

/// Errors raised while loading a JSON visits file.
#[derive(Debug, Error)]
pub enum VisitFileError {
    /// The file could not be opened.
    #[error("failed to open visits file {path}")]
    Open {
        /// Location of the file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file was not a JSON array of visits.
    #[error("failed to parse visits file {path}")]
    Parse {
        /// Location of the file.
        path: Utf8PathBuf,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Read a JSON array of visits from `path` into a [`MemoryVisitStore`].
///
/// # Errors
/// Returns [`VisitFileError::Open`] when the file cannot be opened and
/// [`VisitFileError::Parse`] when its contents are not a visits array.
pub fn load_visits_json(path: &Utf8Path) -> Result<MemoryVisitStore, VisitFileError> {
    let file = open_utf8_file(path).map_err(|source| VisitFileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let visits: Vec<Visit> = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        VisitFileError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!("loaded {} visits from {path}", visits.len());
    Ok(MemoryVisitStore::with_visits(visits))
}
