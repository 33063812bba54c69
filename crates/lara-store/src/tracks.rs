//! Flight and position writes.

use anyhow::Result;
use chrono::{DateTime, Utc};
use lara_core::FlightId;
use sqlx::SqlitePool;

use crate::positions::encode_timestamp;

/// A flight session to be stored.
#[derive(Debug, Clone)]
pub struct NewFlight {
    pub icao24: String,
    pub callsign: Option<String>,
    pub origin_country: Option<String>,
}

impl NewFlight {
    pub fn new(icao24: impl Into<String>) -> Self {
        Self {
            icao24: icao24.into(),
            callsign: None,
            origin_country: None,
        }
    }

    pub fn with_callsign(mut self, callsign: impl Into<String>) -> Self {
        self.callsign = Some(callsign.into());
        self
    }
}

/// A position sample to be stored.
#[derive(Debug, Clone)]
pub struct NewPosition {
    pub timestamp: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude_m: Option<f64>,
    pub velocity_ms: Option<f64>,
    pub heading: Option<f64>,
    pub on_ground: bool,
}

/// Store one flight with all of its positions in a single transaction.
pub async fn insert_track(
    pool: &SqlitePool,
    flight: &NewFlight,
    positions: &[NewPosition],
) -> Result<FlightId> {
    let first_seen = positions.iter().map(|p| p.timestamp).min();
    let last_seen = positions.iter().map(|p| p.timestamp).max();

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO flights (icao24, callsign, origin_country, first_seen, last_seen, position_count)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&flight.icao24)
    .bind(&flight.callsign)
    .bind(&flight.origin_country)
    .bind(first_seen.as_ref().map(encode_timestamp))
    .bind(last_seen.as_ref().map(encode_timestamp))
    .bind(positions.len() as i64)
    .execute(&mut *tx)
    .await?;
    let flight_id = result.last_insert_rowid();

    for position in positions {
        sqlx::query(
            r#"
            INSERT INTO positions (flight_id, timestamp, latitude, longitude, altitude_m, velocity_ms, heading, on_ground)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(flight_id)
        .bind(encode_timestamp(&position.timestamp))
        .bind(position.latitude)
        .bind(position.longitude)
        .bind(position.altitude_m)
        .bind(position.velocity_ms)
        .bind(position.heading)
        .bind(position.on_ground)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(FlightId(flight_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;

    #[tokio::test]
    async fn test_insert_track_records_session_bounds() {
        let db = init_database(":memory:", 1).await.unwrap();
        let t0 = Utc::now();
        let positions: Vec<NewPosition> = (0..4)
            .map(|i| NewPosition {
                timestamp: t0 + chrono::Duration::seconds(i * 10),
                latitude: Some(52.5),
                longitude: Some(13.3 + i as f64 * 0.01),
                altitude_m: None,
                velocity_ms: None,
                heading: Some(90.0),
                on_ground: false,
            })
            .collect();

        let first = insert_track(db.pool(), &NewFlight::new("3c6444"), &positions).await.unwrap();
        let second = insert_track(db.pool(), &NewFlight::new("3c6445"), &positions[..1]).await.unwrap();
        assert_ne!(first, second);

        let (count, first_seen, last_seen): (i64, String, String) = sqlx::query_as(
            "SELECT position_count, first_seen, last_seen FROM flights WHERE id = ?1",
        )
        .bind(first.0)
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(count, 4);
        assert_eq!(first_seen, encode_timestamp(&t0));
        assert_eq!(last_seen, encode_timestamp(&(t0 + chrono::Duration::seconds(30))));
    }
}
