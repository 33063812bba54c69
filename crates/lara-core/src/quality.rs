//! Corridor quality metrics and survival filters.

use crate::models::{Corridor, LineSegment, PositionGroup};
use crate::params::DetectionParams;
use crate::spatial::perpendicular_distance_km;

/// Guards the linearity ratio against zero-length segments.
const LINEARITY_EPSILON_KM: f64 = 0.001;

/// Quality metrics for one fitted group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorridorMetrics {
    pub unique_flights: usize,
    pub total_positions: usize,
    pub avg_altitude_m: f64,
    /// Twice the mean perpendicular deviation
    pub width_km: f64,
    pub max_deviation_km: f64,
    /// 1.0 = every sample on the line, 0.0 = deviation of half the length or more
    pub linearity_score: f64,
}

/// Compute quality metrics for a group against its fitted segment.
pub fn evaluate(group: &PositionGroup, segment: &LineSegment) -> CorridorMetrics {
    let positions = group.positions();

    let altitudes: Vec<f64> = positions.iter().filter_map(|p| p.altitude_m).collect();
    let avg_altitude_m = if altitudes.is_empty() {
        0.0
    } else {
        (altitudes.iter().sum::<f64>() / altitudes.len() as f64).max(0.0)
    };

    let deviations: Vec<f64> = positions
        .iter()
        .map(|p| perpendicular_distance_km(p.latitude, p.longitude, segment))
        .collect();
    let mean_deviation = if deviations.is_empty() {
        0.0
    } else {
        deviations.iter().sum::<f64>() / deviations.len() as f64
    };
    let max_deviation_km = deviations.iter().copied().fold(0.0, f64::max);

    let half_length = segment.length_km / 2.0 + LINEARITY_EPSILON_KM;
    let linearity_score = (1.0 - (max_deviation_km / half_length).min(1.0)).clamp(0.0, 1.0);

    CorridorMetrics {
        unique_flights: group.unique_flights(),
        total_positions: positions.len(),
        avg_altitude_m,
        width_km: 2.0 * mean_deviation,
        max_deviation_km,
        linearity_score,
    }
}

impl CorridorMetrics {
    /// Whether a corridor with these metrics and this segment meets the minimum standards.
    pub fn passes(&self, segment: &LineSegment, params: &DetectionParams) -> bool {
        self.linearity_score >= params.min_linearity_score
            && segment.length_km >= params.min_corridor_length_km
            && self.unique_flights >= params.min_flights
    }

    /// Build an unranked corridor from the metrics and segment.
    pub fn into_corridor(self, segment: &LineSegment) -> Corridor {
        let (center_lat, center_lon) = segment.midpoint();
        Corridor {
            rank: 0,
            center_lat,
            center_lon,
            heading: segment.heading,
            length_km: segment.length_km,
            width_km: self.width_km,
            unique_flights: self.unique_flights,
            total_positions: self.total_positions,
            avg_altitude_m: self.avg_altitude_m,
            linearity_score: self.linearity_score,
            start_lat: segment.start_lat,
            start_lon: segment.start_lon,
            end_lat: segment.end_lat,
            end_lon: segment.end_lon,
        }
    }
}
