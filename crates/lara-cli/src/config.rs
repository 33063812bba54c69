//! Tool configuration from environment and command-line overrides.

use std::env;

use clap::Args;
use lara_core::{DeploymentProfile, DetectionParams};

/// Default location of the position database.
pub const DEFAULT_DB_PATH: &str = "data/lara_flights.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub database_max_connections: u32,
    pub profile: DeploymentProfile,
    pub parallel: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_path: lookup("LARA_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            database_max_connections: lookup("LARA_DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(4),
            profile: lookup("LARA_PROFILE")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            parallel: lookup("LARA_PARALLEL")
                .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}

/// Per-run overrides of individual detection parameters.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamOverrides {
    /// Minimum distinct flights for a corridor
    #[arg(long)]
    pub min_flights: Option<usize>,

    /// Heading tolerance against the group seed (degrees)
    #[arg(long)]
    pub heading_tolerance: Option<f64>,

    /// Maximum distance to any group member (km)
    #[arg(long)]
    pub proximity_km: Option<f64>,

    /// Minimum linearity score in [0, 1]
    #[arg(long)]
    pub min_linearity: Option<f64>,

    /// Minimum corridor length (km)
    #[arg(long)]
    pub min_length_km: Option<f64>,

    /// Number of corridors to report
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Refuse to run on more positions than this
    #[arg(long)]
    pub max_positions: Option<usize>,
}

impl ParamOverrides {
    pub fn apply(&self, mut params: DetectionParams) -> DetectionParams {
        if let Some(v) = self.min_flights {
            params.min_flights = v;
        }
        if let Some(v) = self.heading_tolerance {
            params.heading_tolerance_deg = v;
        }
        if let Some(v) = self.proximity_km {
            params.proximity_km = v;
        }
        if let Some(v) = self.min_linearity {
            params.min_linearity_score = v;
        }
        if let Some(v) = self.min_length_km {
            params.min_corridor_length_km = v;
        }
        if let Some(v) = self.top_n {
            params.top_n = v;
        }
        if self.max_positions.is_some() {
            params.max_positions = self.max_positions;
        }
        params
    }
}
