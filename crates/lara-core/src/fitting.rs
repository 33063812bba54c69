//! Least-squares line fitting for position groups.

use crate::models::{LineSegment, PositionGroup};
use crate::spatial::{bearing_deg, haversine_km};

/// Slope denominators below this are treated as degenerate.
const DEGENERATE_DENOMINATOR: f64 = 1e-10;

/// Which coordinate acts as the regression's independent variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    /// Longitude as a function of latitude (north–south corridors)
    Latitude,
    /// Latitude as a function of longitude (east–west corridors)
    Longitude,
}

/// Fit a representative segment through a group of positions.
///
/// The axis with the larger variance is used as the independent variable,
/// and the endpoints are the fitted line evaluated at that axis's observed
/// minimum and maximum, so the length reflects the true observed extent.
/// An empty group yields a zero-length segment at the origin.
pub fn fit_line(group: &PositionGroup) -> LineSegment {
    let positions = group.positions();
    let lats: Vec<f64> = positions.iter().map(|p| p.latitude).collect();
    let lons: Vec<f64> = positions.iter().map(|p| p.longitude).collect();

    let (Some(mean_lat), Some(mean_lon)) = (mean(&lats), mean(&lons)) else {
        return segment_between(0.0, 0.0, 0.0, 0.0);
    };

    let axis = if sample_variance(&lats, mean_lat) >= sample_variance(&lons, mean_lon) {
        Axis::Latitude
    } else {
        Axis::Longitude
    };

    let (xs, ys, mean_x, mean_y) = match axis {
        Axis::Latitude => (&lats, &lons, mean_lat, mean_lon),
        Axis::Longitude => (&lons, &lats, mean_lon, mean_lat),
    };

    let (numerator, denominator) = xs.iter().zip(ys.iter()).fold((0.0, 0.0), |acc, (x, y)| {
        let dx = x - mean_x;
        (acc.0 + dx * (y - mean_y), acc.1 + dx * dx)
    });

    let x_min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let (y_start, y_end) = if denominator.abs() < DEGENERATE_DENOMINATOR {
        // Flat along the independent axis: hold the dependent axis at its mean.
        (mean_y, mean_y)
    } else {
        let slope = numerator / denominator;
        (
            mean_y + slope * (x_min - mean_x),
            mean_y + slope * (x_max - mean_x),
        )
    };

    match axis {
        Axis::Latitude => segment_between(x_min, y_start, x_max, y_end),
        Axis::Longitude => segment_between(y_start, x_min, y_end, x_max),
    }
}

fn segment_between(start_lat: f64, start_lon: f64, end_lat: f64, end_lon: f64) -> LineSegment {
    LineSegment {
        start_lat,
        start_lon,
        end_lat,
        end_lon,
        heading: bearing_deg(start_lat, start_lon, end_lat, end_lon),
        length_km: haversine_km(start_lat, start_lon, end_lat, end_lon),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn sample_variance(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    sum_sq / (values.len() - 1) as f64
}
