pub mod detector;
pub mod fitting;
pub mod grouping;
pub mod loader;
pub mod models;
pub mod params;
pub mod quality;
pub mod spatial;

pub use detector::{
    rank_corridors, CorridorDetector, DetectionObserver, NoopObserver, TracingObserver,
};
pub use fitting::fit_line;
pub use grouping::{heading_bucket, DirectionalProximityGrouper, GroupingStrategy};
pub use loader::{check_positions, load_positions, LoadOutcome};
pub use models::{
    Corridor, CorridorReport, FlightId, LineSegment, Position, PositionGroup, PositionRow,
};
pub use params::{DeploymentProfile, DetectionParams, ParamsError};
pub use quality::{evaluate, CorridorMetrics};
pub use spatial::{bearing_deg, haversine_km};
