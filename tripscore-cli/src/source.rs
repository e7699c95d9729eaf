//! Visit source selection shared by every command.

use camino::{Utf8Path, Utf8PathBuf};
use tripscore_core::{ClusterPrecision, EngineConfig, VisitStore};
use tripscore_data::fs::file_is_file;
use tripscore_data::{SqliteVisitStore, load_visits_json};

use crate::{ARG_VISITS, CliError};

/// Where visits are read from and how they are aggregated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceConfig {
    /// JSON export (`.json`) or SQLite database (anything else).
    pub(crate) visits: Utf8PathBuf,
    /// Engine tunables.
    pub(crate) engine: EngineConfig,
}

impl SourceConfig {
    /// Build from the merged optional arguments of a command.
    pub(crate) fn from_parts(
        visits: Option<Utf8PathBuf>,
        visits_env: &'static str,
        fetch_limit: Option<usize>,
        cluster_decimals: Option<u8>,
    ) -> Result<Self, CliError> {
        let visits = visits.ok_or(CliError::MissingArgument {
            field: ARG_VISITS,
            env: visits_env,
        })?;
        let mut engine = EngineConfig::default();
        if let Some(limit) = fetch_limit {
            engine = engine.with_fetch_limit(limit);
        }
        if let Some(decimals) = cluster_decimals {
            engine = engine.with_cluster_precision(ClusterPrecision::new(decimals)?);
        }
        Ok(Self { visits, engine })
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.visits, ARG_VISITS)
    }

    /// Open the visit store the path points at.
    pub(crate) fn open_store(&self) -> Result<Box<dyn VisitStore>, CliError> {
        if is_json(&self.visits) {
            Ok(Box::new(load_visits_json(&self.visits)?))
        } else {
            Ok(Box::new(SqliteVisitStore::open(&self.visits)?))
        }
    }
}

fn is_json(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}
