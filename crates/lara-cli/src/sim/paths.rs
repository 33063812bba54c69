//! Flight path implementations.

use lara_core::spatial::{bearing_deg, haversine_km, offset_by_bearing};

/// Trait for flight path implementations.
pub trait FlightPath: Send + Sync {
    /// Get (lat, lon, altitude_m) at time t seconds from start.
    fn get_position(&self, t: f64) -> (f64, f64, f64);

    /// Get track over ground at time t (degrees, 0 = North).
    fn get_heading(&self, t: f64) -> f64 {
        // Default: estimate heading from position delta
        let dt = 1.0;
        let (lat1, lon1, _) = self.get_position(t);
        let (lat2, lon2, _) = self.get_position(t + dt);

        if (lat2 - lat1).abs() < 1e-10 && (lon2 - lon1).abs() < 1e-10 {
            return 0.0;
        }

        bearing_deg(lat1, lon1, lat2, lon2)
    }

    /// Get speed in meters per second.
    fn get_speed_mps(&self) -> f64;

    /// Time in seconds to fly the whole path.
    fn duration_s(&self) -> f64;
}

/// Great-circle flight path between two points.
#[derive(Debug, Clone)]
pub struct LinearPath {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    pub altitude_m: f64,
    pub speed_mps: f64,
    pub distance_km: f64,
    pub duration: f64,
    heading: f64,
}

impl LinearPath {
    /// Create a new linear flight path.
    pub fn new(
        start_lat: f64,
        start_lon: f64,
        end_lat: f64,
        end_lon: f64,
        altitude_m: f64,
        speed_mps: f64,
    ) -> Self {
        let distance_km = haversine_km(start_lat, start_lon, end_lat, end_lon);
        let duration = if speed_mps > 0.0 {
            distance_km * 1000.0 / speed_mps
        } else {
            0.0
        };

        Self {
            start_lat,
            start_lon,
            end_lat,
            end_lon,
            altitude_m,
            speed_mps,
            distance_km,
            duration,
            heading: bearing_deg(start_lat, start_lon, end_lat, end_lon),
        }
    }

    /// Create a path of `length_km` starting at a point and flying a fixed bearing.
    pub fn from_bearing(
        start_lat: f64,
        start_lon: f64,
        bearing: f64,
        length_km: f64,
        altitude_m: f64,
        speed_mps: f64,
    ) -> Self {
        let (end_lat, end_lon) = offset_by_bearing(start_lat, start_lon, length_km, bearing);
        Self::new(start_lat, start_lon, end_lat, end_lon, altitude_m, speed_mps)
    }
}

impl FlightPath for LinearPath {
    fn get_position(&self, t: f64) -> (f64, f64, f64) {
        // Clamp progress to [0, 1]
        let progress = if self.duration > 0.0 {
            (t / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let lat = self.start_lat + progress * (self.end_lat - self.start_lat);
        let lon = self.start_lon + progress * (self.end_lon - self.start_lon);

        (lat, lon, self.altitude_m)
    }

    fn get_heading(&self, _t: f64) -> f64 {
        self.heading
    }

    fn get_speed_mps(&self) -> f64 {
        self.speed_mps
    }

    fn duration_s(&self) -> f64 {
        self.duration
    }
}
