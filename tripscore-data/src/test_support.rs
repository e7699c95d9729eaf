//! Fixture writers for tests that need a visits database on disk.

use camino::Utf8Path;
use chrono::SecondsFormat;
use rusqlite::{Connection, params};
use serde::Serialize;
use tripscore_core::Visit;

use crate::sqlite::VISITS_TABLE_SQL;

/// Create a SQLite database at `path` holding `visits`.
///
/// # Errors
/// Returns any `rusqlite` failure raised while creating or filling the
/// table.
pub fn write_visits_database(path: &Utf8Path, visits: &[Visit]) -> rusqlite::Result<()> {
    let mut connection = Connection::open(path.as_std_path())?;
    connection.execute(VISITS_TABLE_SQL, [])?;
    let tx = connection.transaction()?;
    {
        let mut insert = tx.prepare(
            "INSERT INTO visits (id, user_id, post_id, lat, lng, address, country, continent,
                source, trust_level, verification_status, taken_at, uploaded_at, is_active,
                category_tags)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        )?;
        for visit in visits {
            insert.execute(params![
                visit.id,
                visit.user_id.as_str(),
                visit.post_id,
                visit.lat,
                visit.lng,
                visit.address,
                visit.raw_country,
                visit.raw_continent,
                enum_text(&visit.source),
                enum_text(&visit.trust_level),
                enum_text(&visit.verification_status),
                visit
                    .taken_at
                    .map(|at| at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
                visit
                    .uploaded_at
                    .to_rfc3339_opts(SecondsFormat::AutoSi, true),
                visit.is_active,
                serde_json::to_string(&visit.category_tags).unwrap_or_else(|_| "[]".to_owned()),
            ])?;
        }
    }
    tx.commit()
}

/// Serialize a unit enum to the bare string serde gives it.
fn enum_text<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(text)) => text,
        _ => String::new(),
    }
}
