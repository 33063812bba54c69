//! Position loading and eligibility filtering.

use crate::models::{Position, PositionRow};
use crate::params::DetectionParams;

/// Outcome of loading positions for a detection run.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// Enough eligible positions to attempt detection
    Ready(Vec<Position>),
    /// Fewer eligible positions than `2 × min_flights`
    Insufficient { available: usize, required: usize },
    /// More eligible positions than the configured sample budget
    OverBudget { available: usize, budget: usize },
}

/// Filter raw store rows down to positions with latitude, longitude and heading.
///
/// The source is consumed once and never written to.
pub fn load_positions<I>(rows: I, params: &DetectionParams) -> LoadOutcome
where
    I: IntoIterator<Item = PositionRow>,
{
    let positions: Vec<Position> = rows
        .into_iter()
        .filter_map(PositionRow::into_position)
        .collect();
    check_positions(positions, params)
}

/// Apply the sufficiency and budget rules to already-eligible positions.
pub fn check_positions(positions: Vec<Position>, params: &DetectionParams) -> LoadOutcome {
    let available = positions.len();
    let required = params.required_positions();

    if available == 0 || available < required {
        return LoadOutcome::Insufficient {
            available,
            required,
        };
    }

    if let Some(budget) = params.max_positions {
        if available > budget {
            return LoadOutcome::OverBudget { available, budget };
        }
    }

    LoadOutcome::Ready(positions)
}
