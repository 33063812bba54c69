//! Core data models for corridor detection.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::params::DetectionParams;
use crate::spatial::normalize_heading;

/// Identifier of the flight session that produced a position sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightId(pub i64);

/// A raw position row as exposed by the position store.
///
/// Every geometric field may be missing; rows without latitude,
/// longitude or heading never reach the grouping stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRow {
    pub flight_id: FlightId,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub altitude_m: Option<f64>,
    pub heading: Option<f64>,
    #[serde(default)]
    pub callsign: Option<String>,
}

impl PositionRow {
    /// Convert into an eligible [`Position`], or `None` if a required field is absent.
    pub fn into_position(self) -> Option<Position> {
        let latitude = self.latitude.filter(|v| v.is_finite())?;
        let longitude = self.longitude.filter(|v| v.is_finite())?;
        let heading = self.heading.filter(|v| v.is_finite())?;

        Some(Position {
            latitude,
            longitude,
            altitude_m: self.altitude_m.filter(|v| v.is_finite()),
            heading: normalize_heading(heading),
            flight_id: self.flight_id,
            callsign: self.callsign,
        })
    }
}

/// A position sample eligible for grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude_m: Option<f64>,
    /// Track over ground in degrees, always within [0, 360).
    pub heading: f64,
    pub flight_id: FlightId,
    #[serde(default)]
    pub callsign: Option<String>,
}

impl Position {
    /// Create a new position with only required fields.
    pub fn new(flight_id: FlightId, latitude: f64, longitude: f64, heading: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude_m: None,
            heading: normalize_heading(heading),
            flight_id,
            callsign: None,
        }
    }

    /// Set barometric altitude.
    pub fn with_altitude(mut self, altitude_m: f64) -> Self {
        self.altitude_m = Some(altitude_m);
        self
    }

    /// Set callsign.
    pub fn with_callsign(mut self, callsign: impl Into<String>) -> Self {
        self.callsign = Some(callsign.into());
        self
    }
}

/// Positions sharing approximate heading and spatial proximity.
#[derive(Debug, Clone, Default)]
pub struct PositionGroup {
    positions: Vec<Position>,
}

impl PositionGroup {
    pub fn new(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of distinct flights contributing samples.
    pub fn unique_flights(&self) -> usize {
        self.positions
            .iter()
            .map(|p| p.flight_id)
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Best-fit line through a position group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    /// Initial bearing from start to end, [0, 360)
    pub heading: f64,
    pub length_km: f64,
}

impl LineSegment {
    /// Midpoint of the two endpoints as (lat, lon).
    pub fn midpoint(&self) -> (f64, f64) {
        (
            (self.start_lat + self.end_lat) / 2.0,
            (self.start_lon + self.end_lon) / 2.0,
        )
    }
}

/// A detected flight corridor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    /// 1-based position after ranking; 0 until ranked.
    pub rank: usize,
    pub center_lat: f64,
    pub center_lon: f64,
    pub heading: f64,
    pub length_km: f64,
    pub width_km: f64,
    pub unique_flights: usize,
    pub total_positions: usize,
    pub avg_altitude_m: f64,
    pub linearity_score: f64,
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
}

/// Result of one detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorridorReport {
    /// Corridors that survived filtering, before top-N truncation
    pub total_corridors: usize,
    pub corridors: Vec<Corridor>,
    pub parameters: DetectionParams,
}

impl CorridorReport {
    /// A well-formed report with no corridors.
    pub fn empty(parameters: DetectionParams) -> Self {
        Self {
            total_corridors: 0,
            corridors: Vec::new(),
            parameters,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.corridors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(lat: Option<f64>, lon: Option<f64>, heading: Option<f64>) -> PositionRow {
        PositionRow {
            flight_id: FlightId(1),
            latitude: lat,
            longitude: lon,
            altitude_m: Some(10_000.0),
            heading,
            callsign: Some("DLH4AB".into()),
        }
    }

    #[test]
    fn row_without_heading_is_not_eligible() {
        assert!(row(Some(49.0), Some(8.0), None).into_position().is_none());
        assert!(row(None, Some(8.0), Some(90.0)).into_position().is_none());
        assert!(row(Some(49.0), Some(f64::NAN), Some(90.0)).into_position().is_none());
    }

    #[test]
    fn row_heading_is_normalized() {
        let position = row(Some(49.0), Some(8.0), Some(360.0))
            .into_position()
            .expect("eligible row");
        assert_eq!(position.heading, 0.0);
        assert_eq!(position.callsign.as_deref(), Some("DLH4AB"));
    }

    #[test]
    fn unique_flights_counts_distinct_ids() {
        let group = PositionGroup::new(vec![
            Position::new(FlightId(1), 49.0, 8.0, 0.0),
            Position::new(FlightId(1), 49.1, 8.0, 0.0),
            Position::new(FlightId(2), 49.2, 8.0, 0.0),
        ]);
        assert_eq!(group.len(), 3);
        assert_eq!(group.unique_flights(), 2);
    }

    #[test]
    fn midpoint_is_average_of_endpoints() {
        let segment = LineSegment {
            start_lat: 49.0,
            start_lon: 8.0,
            end_lat: 50.0,
            end_lon: 9.0,
            heading: 33.0,
            length_km: 133.0,
        };
        assert_eq!(segment.midpoint(), (49.5, 8.5));
    }

    #[test]
    fn flight_id_serializes_as_integer() {
        let json = serde_json::to_string(&FlightId(42)).unwrap();
        assert_eq!(json, "42");
    }
}
