//! Test helpers for writing visit exports and databases.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use tripscore_core::Visit;
use tripscore_core::test_support::VisitBuilder;
use tripscore_core::{TrustLevel, VerificationStatus};
use tripscore_data::test_support::write_visits_database;

/// Temporary directory holding visit fixtures.
#[derive(Debug)]
pub(super) struct VisitFiles {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl VisitFiles {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn write_json(&self, visits: &[Visit]) -> Utf8PathBuf {
        let path = self.root.join("visits.json");
        let payload = serde_json::to_vec_pretty(visits).expect("serialize visits");
        std::fs::write(&path, payload).expect("write visits export");
        path
    }

    pub(super) fn write_sqlite(&self, visits: &[Visit]) -> Utf8PathBuf {
        let path = self.root.join("visits.db");
        write_visits_database(&path, visits).expect("write visits database");
        path
    }
}

/// Alice scores three places (Tokyo twice, Paris, mid-Atlantic); Bob scores
/// Tokyo and has one pending suspicious upload in London.
pub(super) fn sample_visits() -> Vec<Visit> {
    vec![
        VisitBuilder::new("a-tokyo-1", "alice")
            .at(35.0, 139.0)
            .country("Japan")
            .address("Shibuya")
            .day(1)
            .build(),
        VisitBuilder::new("a-tokyo-2", "alice")
            .at(35.003, 139.002)
            .country("Japan")
            .day(2)
            .build(),
        VisitBuilder::new("a-paris", "alice")
            .at(48.85, 2.35)
            .country("France")
            .tags(&["museum"])
            .day(3)
            .build(),
        VisitBuilder::new("a-ocean", "alice")
            .at(-40.0, -30.0)
            .day(4)
            .build(),
        VisitBuilder::new("b-tokyo", "bob")
            .at(35.001, 139.001)
            .country("Japan")
            .day(5)
            .build(),
        VisitBuilder::new("b-flagged", "bob")
            .at(51.5, -0.12)
            .country("England")
            .trust(TrustLevel::Suspicious)
            .status(VerificationStatus::Pending)
            .day(6)
            .build(),
    ]
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture file");
}
