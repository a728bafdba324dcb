use std::path::Path;
use std::time::Duration;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OpenFlags};
use thiserror::Error;

use crate::models::record::AggregateRecord;
use crate::models::snapshot::Snapshot;

/// Row cap per fetch; the dashboard never shows more than this.
pub const SNAPSHOT_LIMIT: u32 = 100;

/// Name of the aggregate table maintained by the external tracker.
pub const AGGREGATE_TABLE: &str = "traffic_analytics";

/// How long a fetch waits on a writer's lock before giving up. The tracker
/// writes concurrently, so a short bounded wait beats blocking forever.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const FETCH_QUERY: &str = "
    SELECT
        id,
        datetime(timestamp, 'localtime') AS timestamp,
        car_count,
        truck_count,
        bus_count,
        motorcycle_count,
        total_vehicles,
        ROUND(avg_speed, 2) AS avg_speed,
        congestion_level,
        ROUND(lane_occupancy, 2) AS lane_occupancy,
        ROUND(vehicle_density, 2) AS vehicle_density
    FROM traffic_analytics
    ORDER BY timestamp DESC
    LIMIT ?1
";

/// Failures surfaced by the fetch stage. Both variants render as a
/// "Database error" status line; neither aborts the process.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Store file unreachable, or a writer held its lock past the bound.
    #[error("Database error: {0}")]
    Connectivity(String),
    /// The aggregate table has not been created yet.
    #[error("Database error: table '{0}' not found. Start tracking first!")]
    SchemaMissing(&'static str),
}

impl From<rusqlite::Error> for FetchError {
    fn from(err: rusqlite::Error) -> Self {
        let detail = err.to_string();
        if detail.contains("no such table") {
            FetchError::SchemaMissing(AGGREGATE_TABLE)
        } else {
            FetchError::Connectivity(detail)
        }
    }
}

/// Fetch the most recent `limit` aggregate rows, most-recent-first.
///
/// Fail-fast: one attempt per call, no retry loop. A failed cycle is
/// reported through the status line and the next timer tick (or a manual
/// refresh) simply tries again.
pub fn fetch_snapshot(db_path: &Path, limit: u32) -> Result<Snapshot, FetchError> {
    let conn = open_readonly(db_path)?;
    let mut stmt = conn.prepare(FETCH_QUERY)?;
    let rows = stmt
        .query_map(params![limit], map_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    log::info!("fetched {} aggregate rows from {}", rows.len(), db_path.display());
    Ok(Snapshot::new(rows))
}

fn open_readonly(db_path: &Path) -> Result<Connection, FetchError> {
    let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|e| FetchError::Connectivity(e.to_string()))?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AggregateRecord> {
    let raw_ts: String = row.get(1)?;
    let timestamp = NaiveDateTime::parse_from_str(&raw_ts, "%Y-%m-%d %H:%M:%S").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(AggregateRecord {
        id: row.get(0)?,
        timestamp,
        car_count: row.get(2)?,
        truck_count: row.get(3)?,
        bus_count: row.get(4)?,
        motorcycle_count: row.get(5)?,
        total_vehicles: row.get(6)?,
        avg_speed: row.get(7)?,
        congestion_level: row.get(8)?,
        lane_occupancy: row.get(9)?,
        vehicle_density: row.get(10)?,
    })
}
