//! Corridor detection pipeline.
//!
//! Ties the stages together: load → group → fit → evaluate → rank.
//! Each run is a pure function of its input positions and parameters;
//! progress is reported through an injected [`DetectionObserver`].

use tracing::{debug, info, warn};

use crate::fitting::fit_line;
use crate::grouping::{DirectionalProximityGrouper, GroupingStrategy};
use crate::loader::{check_positions, load_positions, LoadOutcome};
use crate::models::{Corridor, CorridorReport, Position, PositionRow};
use crate::params::DetectionParams;
use crate::quality::evaluate;

/// Number of corridors included in progress previews.
pub const PREVIEW_LEN: usize = 10;

/// Receives progress events from a detection run.
///
/// All methods default to no-ops so observers only implement what they need.
pub trait DetectionObserver: Send + Sync {
    fn positions_loaded(&self, _count: usize) {}

    fn insufficient_data(&self, _available: usize, _required: usize) {}

    fn budget_exceeded(&self, _available: usize, _budget: usize) {}

    fn groups_formed(&self, _strategy: &str, _count: usize) {}

    /// Called once with the total survivor count and the top of the ranking.
    fn corridors_ranked(&self, _total: usize, _preview: &[Corridor]) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DetectionObserver for NoopObserver {}

/// Observer that reports progress through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DetectionObserver for TracingObserver {
    fn positions_loaded(&self, count: usize) {
        info!("Loaded {} eligible positions", count);
    }

    fn insufficient_data(&self, available: usize, required: usize) {
        warn!(
            "Insufficient data for corridor detection: {} positions (need {})",
            available, required
        );
    }

    fn budget_exceeded(&self, available: usize, budget: usize) {
        warn!(
            "Position budget exceeded: {} positions (budget {}), skipping detection",
            available, budget
        );
    }

    fn groups_formed(&self, strategy: &str, count: usize) {
        info!("Found {} candidate groups ({})", count, strategy);
    }

    fn corridors_ranked(&self, total: usize, preview: &[Corridor]) {
        info!("Found {} corridors", total);
        for corridor in preview {
            info!(
                "  #{:2}: ({:.4}, {:.4}) {:>3.0}° {:.1} km - {} flights, linearity {:.2}",
                corridor.rank,
                corridor.center_lat,
                corridor.center_lon,
                corridor.heading,
                corridor.length_km,
                corridor.unique_flights,
                corridor.linearity_score
            );
        }
    }
}

/// Corridor detection engine.
pub struct CorridorDetector {
    params: DetectionParams,
    strategy: Box<dyn GroupingStrategy>,
    observer: Box<dyn DetectionObserver>,
}

impl Default for CorridorDetector {
    fn default() -> Self {
        Self::new(DetectionParams::default())
    }
}

impl CorridorDetector {
    /// Create a detector with the directional-proximity grouper and no observer.
    pub fn new(params: DetectionParams) -> Self {
        Self {
            params,
            strategy: Box::new(DirectionalProximityGrouper::new()),
            observer: Box::new(NoopObserver),
        }
    }

    /// Replace the grouping strategy.
    pub fn with_strategy(mut self, strategy: impl GroupingStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Replace the progress observer.
    pub fn with_observer(mut self, observer: impl DetectionObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn params(&self) -> &DetectionParams {
        &self.params
    }

    /// Run detection over raw store rows.
    pub fn detect_rows<I>(&self, rows: I) -> CorridorReport
    where
        I: IntoIterator<Item = PositionRow>,
    {
        self.run(load_positions(rows, &self.params))
    }

    /// Run detection over already-eligible positions.
    pub fn detect(&self, positions: Vec<Position>) -> CorridorReport {
        self.run(check_positions(positions, &self.params))
    }

    fn run(&self, outcome: LoadOutcome) -> CorridorReport {
        let positions = match outcome {
            LoadOutcome::Ready(positions) => positions,
            LoadOutcome::Insufficient {
                available,
                required,
            } => {
                self.observer.insufficient_data(available, required);
                return CorridorReport::empty(self.params.clone());
            }
            LoadOutcome::OverBudget { available, budget } => {
                self.observer.budget_exceeded(available, budget);
                return CorridorReport::empty(self.params.clone());
            }
        };
        self.observer.positions_loaded(positions.len());

        let groups = self.strategy.group(&positions, &self.params);
        self.observer.groups_formed(self.strategy.name(), groups.len());

        let mut survivors = Vec::new();
        for group in &groups {
            let segment = fit_line(group);
            let metrics = evaluate(group, &segment);
            if !metrics.passes(&segment, &self.params) {
                debug!(
                    flights = metrics.unique_flights,
                    length_km = segment.length_km,
                    linearity = metrics.linearity_score,
                    "Group rejected"
                );
                continue;
            }
            survivors.push(metrics.into_corridor(&segment));
        }

        let (total_corridors, corridors) = rank_corridors(survivors, self.params.top_n);
        let preview_len = corridors.len().min(PREVIEW_LEN);
        self.observer
            .corridors_ranked(total_corridors, &corridors[..preview_len]);

        CorridorReport {
            total_corridors,
            corridors,
            parameters: self.params.clone(),
        }
    }
}

/// Rank corridors by unique flights, descending.
///
/// The sort is stable, so equal flight counts keep discovery order. Ranks
/// are 1-based and contiguous. Returns the survivor count before truncation
/// together with the top `top_n` corridors.
pub fn rank_corridors(mut corridors: Vec<Corridor>, top_n: usize) -> (usize, Vec<Corridor>) {
    corridors.sort_by(|a, b| b.unique_flights.cmp(&a.unique_flights));
    for (idx, corridor) in corridors.iter_mut().enumerate() {
        corridor.rank = idx + 1;
    }
    let total = corridors.len();
    corridors.truncate(top_n);
    (total, corridors)
}
