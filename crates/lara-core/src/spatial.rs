//! Spherical and planar geometry helpers used by the corridor pipeline.

use crate::models::LineSegment;

/// Mean Earth radius used for great-circle math.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree, used by the planar deviation approximation.
pub const KM_PER_DEGREE: f64 = 111.32;

/// Segments shorter than this (in degrees) are treated as points.
const DEGENERATE_SEGMENT_DEG: f64 = 1e-10;

/// Calculate distance between two points in kilometers using Haversine formula.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Initial bearing (forward azimuth) from point 1 to point 2.
/// Returns degrees in [0, 360), 0 = north, 90 = east.
pub fn bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    normalize_heading(x.atan2(y).to_degrees())
}

/// Wrap any angle in degrees into [0, 360).
pub fn normalize_heading(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Smallest angle between two headings, in [0, 180].
pub fn angular_difference_deg(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    diff.min(360.0 - diff)
}

/// Offset a position by distance and bearing along a great circle.
///
/// # Arguments
/// * `lat`, `lon` - Starting position in degrees
/// * `distance_km` - Distance in kilometers
/// * `bearing` - Bearing in degrees (0 = north, 90 = east)
///
/// # Returns
/// (new_lat, new_lon) in degrees
pub fn offset_by_bearing(lat: f64, lon: f64, distance_km: f64, bearing: f64) -> (f64, f64) {
    if distance_km.abs() <= f64::EPSILON {
        return (lat, lon);
    }

    let lat1 = lat.to_radians();
    let lon1 = lon.to_radians();
    let bearing_rad = bearing.to_radians();
    let angular_distance = distance_km / EARTH_RADIUS_KM;

    let sin_lat1 = lat1.sin();
    let cos_lat1 = lat1.cos();
    let sin_ad = angular_distance.sin();
    let cos_ad = angular_distance.cos();

    let sin_lat2 = sin_lat1 * cos_ad + cos_lat1 * sin_ad * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let y = bearing_rad.sin() * sin_ad * cos_lat1;
    let x = cos_ad - sin_lat1 * sin_lat2;
    let mut lon2 = lon1 + y.atan2(x);
    lon2 =
        (lon2 + std::f64::consts::PI).rem_euclid(2.0 * std::f64::consts::PI) - std::f64::consts::PI;

    (lat2.to_degrees(), lon2.to_degrees())
}

/// Perpendicular distance in kilometers from a point to the line through a segment.
///
/// Planar cross-product approximation in degree space, scaled with a fixed
/// km-per-degree factor. Only meaningful over a few tens of kilometers.
pub fn perpendicular_distance_km(lat: f64, lon: f64, segment: &LineSegment) -> f64 {
    // Vector from segment start to point
    let px = lon - segment.start_lon;
    let py = lat - segment.start_lat;

    // Vector along segment
    let sx = segment.end_lon - segment.start_lon;
    let sy = segment.end_lat - segment.start_lat;

    let seg_len = (sx * sx + sy * sy).sqrt();
    if seg_len < DEGENERATE_SEGMENT_DEG {
        return haversine_km(lat, lon, segment.start_lat, segment.start_lon);
    }

    let cross = (px * (sy / seg_len) - py * (sx / seg_len)).abs();
    cross * KM_PER_DEGREE
}
