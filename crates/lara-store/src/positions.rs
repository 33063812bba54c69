//! Read-only position queries feeding the corridor loader.

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use lara_core::{FlightId, PositionRow};
use sqlx::SqlitePool;

/// Optional time window applied when reading positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionQuery {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

/// Encode a timestamp the way it is stored in the `positions` table.
pub(crate) fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Fetch every position with latitude, longitude and heading present,
/// joined with its flight's callsign, in insertion order.
pub async fn fetch_position_rows(pool: &SqlitePool, query: &PositionQuery) -> Result<Vec<PositionRow>> {
    let records = sqlx::query_as::<_, PositionRecord>(
        r#"
        SELECT p.flight_id, p.latitude, p.longitude, p.altitude_m, p.heading, f.callsign
        FROM positions p
        JOIN flights f ON p.flight_id = f.id
        WHERE p.latitude IS NOT NULL
          AND p.longitude IS NOT NULL
          AND p.heading IS NOT NULL
          AND (?1 IS NULL OR p.timestamp >= ?1)
          AND (?2 IS NULL OR p.timestamp <= ?2)
        ORDER BY p.id
        "#,
    )
    .bind(query.since.as_ref().map(encode_timestamp))
    .bind(query.until.as_ref().map(encode_timestamp))
    .fetch_all(pool)
    .await?;

    Ok(records.into_iter().map(Into::into).collect())
}

/// Total number of stored positions, eligible or not.
pub async fn count_positions(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM positions")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct PositionRecord {
    flight_id: i64,
    latitude: Option<f64>,
    longitude: Option<f64>,
    altitude_m: Option<f64>,
    heading: Option<f64>,
    callsign: Option<String>,
}

impl From<PositionRecord> for PositionRow {
    fn from(record: PositionRecord) -> Self {
        PositionRow {
            flight_id: FlightId(record.flight_id),
            latitude: record.latitude,
            longitude: record.longitude,
            altitude_m: record.altitude_m,
            heading: record.heading,
            callsign: record.callsign.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
        }
    }
}
