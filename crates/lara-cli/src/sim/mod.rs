//! Synthetic traffic generation.

pub mod paths;
pub mod scenarios;

pub use paths::{FlightPath, LinearPath};
pub use scenarios::{corridor_fan, generate_corridor_traffic, CorridorPlan, SyntheticFlight, TrafficConfig};
