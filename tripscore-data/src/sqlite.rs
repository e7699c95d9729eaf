//! SQLite-backed visit store.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params};
use serde::Deserialize;
use serde::de::IntoDeserializer;
use serde::de::value::{Error as ValueError, StrDeserializer};
use thiserror::Error;
use tripscore_core::{UserId, Visit, VisitQuery, VisitStore, VisitStoreError};

/// Schema of the `visits` table the store reads.
///
/// Timestamps are RFC 3339 strings with any offset and are ordered by the
/// instant they name. Enum columns hold the snake-case names used in JSON
/// (`camera_live`, `auto_verified`, ...) and `category_tags` is a JSON array
/// of strings.
pub const VISITS_TABLE_SQL: &str = "CREATE TABLE visits (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    post_id TEXT,
    lat REAL,
    lng REAL,
    address TEXT NOT NULL DEFAULT '',
    country TEXT NOT NULL DEFAULT '',
    continent TEXT NOT NULL DEFAULT '',
    source TEXT NOT NULL,
    trust_level TEXT NOT NULL,
    verification_status TEXT NOT NULL,
    taken_at TEXT,
    uploaded_at TEXT NOT NULL,
    is_active INTEGER NOT NULL,
    category_tags TEXT NOT NULL DEFAULT '[]'
)";

const SELECT_VISITS: &str = "SELECT id, user_id, post_id, lat, lng, address, country, continent,
        source, trust_level, verification_status, taken_at, uploaded_at, is_active, category_tags
    FROM visits
    WHERE ?1 IS NULL OR user_id = ?1
    ORDER BY julianday(COALESCE(taken_at, uploaded_at)), id
    LIMIT ?2";

/// Errors raised while reading visits from SQLite.
#[derive(Debug, Error)]
pub enum SqliteVisitStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the database on disk.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// The database has no `visits` table.
    #[error("SQLite database at {path} has no visits table")]
    MissingTable {
        /// Location of the database on disk.
        path: Utf8PathBuf,
    },
    /// Preparing or executing a query failed.
    #[error("failed to query {operation}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A column held a value the visit model does not accept.
    #[error("visit {visit_id} has invalid {column} {value:?}: {reason}")]
    InvalidColumn {
        /// Identifier of the affected visit.
        visit_id: String,
        /// Offending column.
        column: &'static str,
        /// Raw value read from the database.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// The `category_tags` column was not a JSON array of strings.
    #[error("failed to parse category tags for visit {visit_id}")]
    InvalidTags {
        /// Identifier of the affected visit.
        visit_id: String,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

impl From<SqliteVisitStoreError> for VisitStoreError {
    fn from(err: SqliteVisitStoreError) -> Self {
        Self::Backend {
            source: Box::new(err),
        }
    }
}

/// Read-only [`VisitStore`] over a SQLite database.
///
/// Every fetch opens its own read-only connection, so concurrent requests
/// never share database state. Rows are returned oldest first (capture time,
/// else upload time) and capped at the query limit.
#[derive(Debug, Clone)]
pub struct SqliteVisitStore {
    path: Utf8PathBuf,
}

impl SqliteVisitStore {
    /// Open the database at `path`, checking that it holds a `visits` table.
    ///
    /// # Errors
    /// Returns [`SqliteVisitStoreError::OpenDatabase`] when the file cannot
    /// be opened and [`SqliteVisitStoreError::MissingTable`] when the schema
    /// is absent.
    pub fn open(path: &Utf8Path) -> Result<Self, SqliteVisitStoreError> {
        let connection = open_read_only(path)?;
        let table: Option<String> = connection
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'visits'",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|source| SqliteVisitStoreError::Query {
                operation: "visits table lookup",
                source,
            })?;
        if table.is_none() {
            return Err(SqliteVisitStoreError::MissingTable {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Location of the backing database.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read visits matching `query`.
    ///
    /// # Errors
    /// Returns [`SqliteVisitStoreError`] when the database cannot be read or
    /// a row does not describe a valid visit.
    pub fn read_visits(&self, query: &VisitQuery) -> Result<Vec<Visit>, SqliteVisitStoreError> {
        let connection = open_read_only(&self.path)?;
        let mut statement =
            connection
                .prepare(SELECT_VISITS)
                .map_err(|source| SqliteVisitStoreError::Query {
                    operation: "visit selection",
                    source,
                })?;
        let owner = query.owner.as_ref().map(UserId::as_str);
        let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);
        let mut rows =
            statement
                .query(params![owner, limit])
                .map_err(|source| SqliteVisitStoreError::Query {
                    operation: "visit rows",
                    source,
                })?;

        let mut visits = Vec::new();
        while let Some(row) = rows.next().map_err(|source| SqliteVisitStoreError::Query {
            operation: "visit rows",
            source,
        })? {
            visits.push(visit_from_row(row)?);
        }
        debug!("read {} visits from {}", visits.len(), self.path);
        Ok(visits)
    }
}

impl VisitStore for SqliteVisitStore {
    fn fetch_visits(&self, query: &VisitQuery) -> Result<Vec<Visit>, VisitStoreError> {
        Ok(self.read_visits(query)?)
    }
}

fn open_read_only(path: &Utf8Path) -> Result<Connection, SqliteVisitStoreError> {
    Connection::open_with_flags(path.as_std_path(), OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
        |source| SqliteVisitStoreError::OpenDatabase {
            path: path.to_path_buf(),
            source,
        },
    )
}

fn visit_from_row(row: &Row<'_>) -> Result<Visit, SqliteVisitStoreError> {
    let id: String = row.get(0).map_err(query_error("visit id"))?;
    let user_id: String = row.get(1).map_err(query_error("visit user id"))?;
    let source: String = row.get(8).map_err(query_error("visit source"))?;
    let trust_level: String = row.get(9).map_err(query_error("visit trust level"))?;
    let status: String = row.get(10).map_err(query_error("visit verification status"))?;
    let taken_at: Option<String> = row.get(11).map_err(query_error("visit capture time"))?;
    let uploaded_at: String = row.get(12).map_err(query_error("visit upload time"))?;
    let tags: String = row.get(14).map_err(query_error("visit category tags"))?;

    Ok(Visit {
        user_id: UserId::parse(&user_id)
            .map_err(|err| invalid(&id, "user_id", &user_id, &err))?,
        post_id: row.get(2).map_err(query_error("visit post id"))?,
        lat: row.get(3).map_err(query_error("visit latitude"))?,
        lng: row.get(4).map_err(query_error("visit longitude"))?,
        address: row.get(5).map_err(query_error("visit address"))?,
        raw_country: row.get(6).map_err(query_error("visit country"))?,
        raw_continent: row.get(7).map_err(query_error("visit continent"))?,
        source: parse_enum(&id, "source", &source)?,
        trust_level: parse_enum(&id, "trust_level", &trust_level)?,
        verification_status: parse_enum(&id, "verification_status", &status)?,
        taken_at: taken_at
            .map(|raw| parse_timestamp(&id, "taken_at", &raw))
            .transpose()?,
        uploaded_at: parse_timestamp(&id, "uploaded_at", &uploaded_at)?,
        is_active: row.get(13).map_err(query_error("visit activity flag"))?,
        category_tags: serde_json::from_str(&tags).map_err(|source| {
            SqliteVisitStoreError::InvalidTags {
                visit_id: id.clone(),
                source,
            }
        })?,
        id,
    })
}

fn query_error(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> SqliteVisitStoreError {
    move |source| SqliteVisitStoreError::Query { operation, source }
}

fn parse_enum<T>(visit_id: &str, column: &'static str, raw: &str) -> Result<T, SqliteVisitStoreError>
where
    T: for<'de> Deserialize<'de>,
{
    let deserializer: StrDeserializer<'_, ValueError> = raw.into_deserializer();
    T::deserialize(deserializer).map_err(|err| invalid(visit_id, column, raw, &err))
}

fn parse_timestamp(
    visit_id: &str,
    column: &'static str,
    raw: &str,
) -> Result<DateTime<Utc>, SqliteVisitStoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|err| invalid(visit_id, column, raw, &err))
}

fn invalid(
    visit_id: &str,
    column: &'static str,
    raw: &str,
    reason: &dyn std::fmt::Display,
) -> SqliteVisitStoreError {
    SqliteVisitStoreError::InvalidColumn {
        visit_id: visit_id.to_owned(),
        column,
        value: raw.to_owned(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_visits_database;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;
    use tripscore_core::test_support::VisitBuilder;
    use tripscore_core::{TrustLevel, VisitSource};

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temporary directory")
    }

    fn db_path(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join("visits.db")).expect("utf8 path")
    }

    fn sample_visits() -> Vec<Visit> {
        vec![
            VisitBuilder::new("late", "alice")
                .at(48.8, 2.3)
                .country("France")
                .tags(&["museum"])
                .day(5)
                .build(),
            VisitBuilder::new("early", "alice")
                .at(35.0, 139.0)
                .country("Japan")
                .source(VisitSource::GalleryExif)
                .trust(TrustLevel::Medium)
                .post("p1")
                .day(1)
                .build(),
            VisitBuilder::new("upload-only", "alice")
                .at(51.5, -0.12)
                .uploaded_only(3)
                .build(),
            VisitBuilder::new("bob-1", "bob").at(40.7, -74.0).build(),
        ]
    }

    fn ids(visits: &[Visit]) -> Vec<&str> {
        visits.iter().map(|v| v.id.as_str()).collect()
    }

    #[rstest]
    fn reads_one_user_oldest_first(temp_dir: TempDir) {
        let path = db_path(&temp_dir);
        write_visits_database(&path, &sample_visits()).expect("write database");
        let store = SqliteVisitStore::open(&path).expect("open store");
        let owner = UserId::parse("alice").expect("valid id");

        let visits = store
            .fetch_visits(&VisitQuery::for_user(owner, 10))
            .expect("read visits");
        assert_eq!(ids(&visits), ["early", "upload-only", "late"]);

        let early = visits.first().expect("early visit");
        assert_eq!(early.source, VisitSource::GalleryExif);
        assert_eq!(early.trust_level, TrustLevel::Medium);
        assert_eq!(early.post_id.as_deref(), Some("p1"));
        assert_eq!(visits.last().map(|v| v.category_tags.clone()), Some(vec!["museum".to_owned()]));
        assert!(visits.get(1).is_some_and(|v| v.taken_at.is_none()));
    }

    #[rstest]
    fn limit_caps_the_oldest_visits(temp_dir: TempDir) {
        let path = db_path(&temp_dir);
        write_visits_database(&path, &sample_visits()).expect("write database");
        let store = SqliteVisitStore::open(&path).expect("open store");

        let visits = store
            .fetch_visits(&VisitQuery::global(2))
            .expect("read visits");
        assert_eq!(ids(&visits), ["bob-1", "early"]);
    }

    #[rstest]
    fn offset_timestamps_order_by_instant(temp_dir: TempDir) {
        let path = db_path(&temp_dir);
        write_visits_database(&path, &sample_visits()).expect("write database");
        let connection = Connection::open(path.as_std_path()).expect("open for writing");
        connection
            .execute(
                "UPDATE visits SET taken_at = '2024-01-02T08:00:00+09:00' WHERE id = 'late'",
                [],
            )
            .expect("rewrite capture time");
        let store = SqliteVisitStore::open(&path).expect("open store");
        let owner = UserId::parse("alice").expect("valid id");

        let visits = store
            .fetch_visits(&VisitQuery::for_user(owner, 1))
            .expect("read visits");
        assert_eq!(ids(&visits), ["late"]);
        let expected = "2024-01-01T23:00:00Z"
            .parse::<DateTime<Utc>>()
            .expect("valid timestamp");
        assert_eq!(visits.first().and_then(|v| v.taken_at), Some(expected));
    }

    #[rstest]
    fn round_trips_the_visit_model(temp_dir: TempDir) {
        let path = db_path(&temp_dir);
        let original = sample_visits();
        write_visits_database(&path, &original).expect("write database");
        let store = SqliteVisitStore::open(&path).expect("open store");

        let read = store
            .fetch_visits(&VisitQuery::global(10))
            .expect("read visits");
        for visit in &original {
            assert!(read.contains(visit), "{} changed on the way through", visit.id);
        }
    }

    #[rstest]
    fn corrupt_rows_name_the_visit(temp_dir: TempDir) {
        let path = db_path(&temp_dir);
        write_visits_database(&path, &sample_visits()).expect("write database");
        let connection = Connection::open(path.as_std_path()).expect("open for writing");
        connection
            .execute(
                "UPDATE visits SET trust_level = 'dubious' WHERE id = 'late'",
                [],
            )
            .expect("corrupt row");
        let store = SqliteVisitStore::open(&path).expect("open store");

        let err = store
            .read_visits(&VisitQuery::global(10))
            .expect_err("corrupt trust level");
        match err {
            SqliteVisitStoreError::InvalidColumn {
                visit_id, column, ..
            } => {
                assert_eq!(visit_id, "late");
                assert_eq!(column, "trust_level");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    fn invalid_tags_are_reported(temp_dir: TempDir) {
        let path = db_path(&temp_dir);
        write_visits_database(&path, &sample_visits()).expect("write database");
        let connection = Connection::open(path.as_std_path()).expect("open for writing");
        connection
            .execute("UPDATE visits SET category_tags = '{' WHERE id = 'bob-1'", [])
            .expect("corrupt tags");
        let store = SqliteVisitStore::open(&path).expect("open store");

        let err = store
            .fetch_visits(&VisitQuery::global(10))
            .expect_err("corrupt tags");
        assert!(matches!(err, VisitStoreError::Backend { .. }));
    }

    #[rstest]
    fn missing_table_is_rejected(temp_dir: TempDir) {
        let path = db_path(&temp_dir);
        Connection::open(path.as_std_path())
            .and_then(|c| c.execute("CREATE TABLE other (id INTEGER)", []))
            .expect("create unrelated table");
        let err = SqliteVisitStore::open(&path).expect_err("no visits table");
        assert!(matches!(err, SqliteVisitStoreError::MissingTable { .. }));
    }

    #[rstest]
    fn missing_file_is_rejected(temp_dir: TempDir) {
        let path = db_path(&temp_dir);
        let err = SqliteVisitStore::open(&path).expect_err("missing database");
        assert!(matches!(err, SqliteVisitStoreError::OpenDatabase { .. }));
    }
}
