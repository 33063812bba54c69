//! Detection parameters and deployment presets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable thresholds for one detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    /// Minimum distinct flights for a corridor to survive
    pub min_flights: usize,
    /// Max heading deviation from a group's seed (degrees)
    pub heading_tolerance_deg: f64,
    /// Max distance to any group member for absorption (km)
    pub proximity_km: f64,
    /// Minimum linearity score in [0, 1]
    pub min_linearity_score: f64,
    /// Minimum fitted segment length (km)
    pub min_corridor_length_km: f64,
    /// Corridors returned after ranking
    pub top_n: usize,
    /// Sample-count budget; runs above it return an empty report
    pub max_positions: Option<usize>,
}

impl Default for DetectionParams {
    fn default() -> Self {
        DeploymentProfile::Local.params()
    }
}

/// Threshold presets for different traffic volumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentProfile {
    /// Small receiver radius, a few days of traffic
    #[default]
    Local,
    /// Busy airspace with weeks of traffic
    Regional,
}

impl DeploymentProfile {
    pub fn params(self) -> DetectionParams {
        match self {
            DeploymentProfile::Local => DetectionParams {
                min_flights: 15,
                heading_tolerance_deg: 30.0,
                proximity_km: 10.0,
                min_linearity_score: 0.3,
                min_corridor_length_km: 3.0,
                top_n: 50,
                max_positions: None,
            },
            DeploymentProfile::Regional => DetectionParams {
                min_flights: 60,
                heading_tolerance_deg: 20.0,
                proximity_km: 10.0,
                min_linearity_score: 0.5,
                min_corridor_length_km: 3.0,
                top_n: 50,
                max_positions: None,
            },
        }
    }
}

impl std::str::FromStr for DeploymentProfile {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(DeploymentProfile::Local),
            "regional" => Ok(DeploymentProfile::Regional),
            other => Err(ParamsError::UnknownProfile(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("{name} must be a finite, non-negative number (got {value})")]
    Negative { name: &'static str, value: f64 },

    #[error("min_linearity_score must lie in [0, 1] (got {0})")]
    LinearityOutOfRange(f64),

    #[error("heading_tolerance_deg must not exceed 180 (got {0})")]
    ToleranceOutOfRange(f64),

    #[error("top_n must be at least 1")]
    EmptyTopN,

    #[error("unknown deployment profile '{0}'")]
    UnknownProfile(String),
}

impl DetectionParams {
    /// Check the parameters for obviously malformed values.
    ///
    /// The detector assumes well-formed input and never calls this itself.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (name, value) in [
            ("heading_tolerance_deg", self.heading_tolerance_deg),
            ("proximity_km", self.proximity_km),
            ("min_corridor_length_km", self.min_corridor_length_km),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::Negative { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.min_linearity_score) {
            return Err(ParamsError::LinearityOutOfRange(self.min_linearity_score));
        }
        if self.heading_tolerance_deg > 180.0 {
            return Err(ParamsError::ToleranceOutOfRange(self.heading_tolerance_deg));
        }
        if self.top_n == 0 {
            return Err(ParamsError::EmptyTopN);
        }
        Ok(())
    }

    /// Minimum number of eligible samples before detection is attempted.
    pub fn required_positions(&self) -> usize {
        self.min_flights.saturating_mul(2)
    }
}
