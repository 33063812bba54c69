//! Synthetic corridor traffic for seeding a position database.

use chrono::{DateTime, Duration, Utc};
use lara_core::spatial::{normalize_heading, offset_by_bearing};
use lara_store::{NewFlight, NewPosition};
use rand::Rng;

use super::paths::LinearPath;
use super::FlightPath;

/// Cruise speed for generated traffic (~450 kt).
const CRUISE_SPEED_MPS: f64 = 230.0;

/// Gap between the departure times of consecutive flights on one corridor.
const DEPARTURE_INTERVAL_S: i64 = 120;

/// A straight route flown by several aircraft.
#[derive(Debug, Clone)]
pub struct CorridorPlan {
    pub name: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub heading: f64,
    pub length_km: f64,
    pub altitude_m: f64,
    pub flights: usize,
}

/// Noise and sampling applied to every generated flight.
#[derive(Debug, Clone)]
pub struct TrafficConfig {
    pub samples_per_flight: usize,
    /// Maximum lateral offset of a flight from the corridor centerline.
    pub jitter_km: f64,
    /// Maximum error added to each reported heading.
    pub heading_noise_deg: f64,
    /// Maximum altitude deviation from the corridor level.
    pub altitude_noise_m: f64,
    pub start: DateTime<Utc>,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            samples_per_flight: 12,
            jitter_km: 1.0,
            heading_noise_deg: 2.0,
            altitude_noise_m: 150.0,
            start: Utc::now(),
        }
    }
}

/// One generated flight ready to be stored.
#[derive(Debug, Clone)]
pub struct SyntheticFlight {
    pub flight: NewFlight,
    pub positions: Vec<NewPosition>,
}

/// Spread `count` corridors through one center point, evenly in heading.
///
/// Headings sit in the middle of a 10° sector so small heading noise
/// does not split a corridor. Each corridor gets fewer flights than the
/// previous one, never below a third of `flights`.
pub fn corridor_fan(
    center_lat: f64,
    center_lon: f64,
    count: usize,
    flights: usize,
    length_km: f64,
    altitude_m: f64,
) -> Vec<CorridorPlan> {
    if count == 0 {
        return Vec::new();
    }

    // Opposite directions share a line, so fan out over a half circle
    let step = 180.0 / count as f64;
    let floor = (flights / 3).max(1);

    (0..count)
        .map(|i| {
            let sector = (i as f64 * step / 10.0).floor() * 10.0;
            CorridorPlan {
                name: format!("corridor-{}", i + 1),
                center_lat,
                center_lon,
                heading: normalize_heading(sector + 5.0),
                length_km,
                altitude_m: altitude_m + i as f64 * 300.0,
                flights: flights.saturating_sub(i * flights / (count + 1)).max(floor),
            }
        })
        .collect()
}

/// Generate every flight of one corridor.
pub fn generate_corridor_traffic<R: Rng>(
    rng: &mut R,
    plan: &CorridorPlan,
    config: &TrafficConfig,
) -> Vec<SyntheticFlight> {
    // Corridor entry point, half a length behind the center
    let (entry_lat, entry_lon) = offset_by_bearing(
        plan.center_lat,
        plan.center_lon,
        plan.length_km / 2.0,
        plan.heading + 180.0,
    );

    (0..plan.flights)
        .map(|n| {
            let lateral_km = symmetric(rng, config.jitter_km);
            let (start_lat, start_lon) =
                offset_by_bearing(entry_lat, entry_lon, lateral_km, plan.heading + 90.0);
            let altitude_m = plan.altitude_m + symmetric(rng, config.altitude_noise_m);
            let path = LinearPath::from_bearing(
                start_lat,
                start_lon,
                plan.heading,
                plan.length_km,
                altitude_m,
                CRUISE_SPEED_MPS,
            );

            let departure = config.start + Duration::seconds(n as i64 * DEPARTURE_INTERVAL_S);
            let positions = sample_path(rng, &path, departure, config);

            let icao24 = format!("{:06x}", rng.random_range(0..0x100_0000u32));
            let callsign = format!("LRA{:04}", n + 1);

            SyntheticFlight {
                flight: NewFlight::new(icao24).with_callsign(callsign),
                positions,
            }
        })
        .collect()
}

fn sample_path<R: Rng>(
    rng: &mut R,
    path: &LinearPath,
    departure: DateTime<Utc>,
    config: &TrafficConfig,
) -> Vec<NewPosition> {
    let samples = config.samples_per_flight.max(2);
    let interval = path.duration_s() / (samples - 1) as f64;

    (0..samples)
        .map(|i| {
            let t = i as f64 * interval;
            let (lat, lon, alt) = path.get_position(t);
            let heading = normalize_heading(path.get_heading(t) + symmetric(rng, config.heading_noise_deg));

            NewPosition {
                timestamp: departure + Duration::milliseconds((t * 1000.0) as i64),
                latitude: Some(lat),
                longitude: Some(lon),
                altitude_m: Some(alt),
                velocity_ms: Some(path.get_speed_mps()),
                heading: Some(heading),
                on_ground: false,
            }
        })
        .collect()
}

/// Uniform sample in [-limit, limit].
fn symmetric<R: Rng>(rng: &mut R, limit: f64) -> f64 {
    if limit <= 0.0 {
        return 0.0;
    }
    rng.random_range(-limit..=limit)
}
