//! End-to-end corridor detection scenarios on synthetic traffic.

use lara_core::spatial::angular_difference_deg;
use lara_core::{
    CorridorDetector, DetectionParams, DirectionalProximityGrouper, FlightId, Position,
    PositionRow,
};

const SAMPLES_PER_FLIGHT: usize = 10;

/// Straight-line traffic: `flights` flights each sampled evenly from `start` to `end`.
/// Each flight is shifted by `lateral` degrees in the direction given by `offset`.
struct Track {
    first_id: i64,
    flights: usize,
    start: (f64, f64),
    end: (f64, f64),
    heading: f64,
    offset: (f64, f64),
}

impl Track {
    fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        for flight in 0..self.flights {
            let id = FlightId(self.first_id + flight as i64);
            for step in 0..SAMPLES_PER_FLIGHT {
                let t = step as f64 / (SAMPLES_PER_FLIGHT - 1) as f64;
                let lat = self.start.0 + (self.end.0 - self.start.0) * t + self.offset.0 * flight as f64;
                let lon = self.start.1 + (self.end.1 - self.start.1) * t + self.offset.1 * flight as f64;
                positions.push(
                    Position::new(id, lat, lon, self.heading)
                        .with_altitude(9_000.0 + 100.0 * flight as f64),
                );
            }
        }
        positions
    }
}

fn north_south_traffic() -> Vec<Position> {
    Track {
        first_id: 1,
        flights: 15,
        start: (49.0, 8.0),
        end: (49.5, 8.0),
        heading: 0.0,
        offset: (0.0, 0.0),
    }
    .positions()
}

fn three_corridor_traffic() -> Vec<Position> {
    let mut positions = Track {
        first_id: 100,
        flights: 12,
        start: (49.0, 8.0),
        end: (49.5, 8.0),
        heading: 0.0,
        offset: (0.0, 0.001),
    }
    .positions();
    positions.extend(
        Track {
            first_id: 200,
            flights: 8,
            start: (49.8, 8.5),
            end: (49.8, 9.2),
            heading: 90.0,
            offset: (0.001, 0.0),
        }
        .positions(),
    );
    positions.extend(
        Track {
            first_id: 300,
            flights: 6,
            start: (48.3, 7.0),
            end: (48.66, 7.36),
            heading: 45.0,
            offset: (0.001, 0.0),
        }
        .positions(),
    );
    positions
}

fn params(min_flights: usize) -> DetectionParams {
    DetectionParams {
        min_flights,
        ..DetectionParams::default()
    }
}

#[test]
fn north_south_traffic_forms_a_corridor() {
    let report = CorridorDetector::new(params(10)).detect(north_south_traffic());

    assert!(report.total_corridors >= 1);
    let top = &report.corridors[0];
    let off_axis = angular_difference_deg(top.heading, 0.0).min(angular_difference_deg(top.heading, 180.0));
    assert!(off_axis <= 30.0, "heading {} not north-south", top.heading);
    assert!(top.linearity_score > 0.6);
    assert!(top.length_km > 5.0);
    assert_eq!(top.unique_flights, 15);
    assert_eq!(top.total_positions, 150);
    assert_eq!(top.rank, 1);
}

#[test]
fn distinct_directions_form_distinct_corridors() {
    let report = CorridorDetector::new(params(3)).detect(three_corridor_traffic());

    assert!(report.total_corridors >= 2);
    for (i, a) in report.corridors.iter().enumerate() {
        for b in &report.corridors[i + 1..] {
            let diff = angular_difference_deg(a.heading, b.heading);
            assert!(diff > 20.0, "corridors {} and {} too similar ({diff}°)", a.rank, b.rank);
        }
    }

    let flights: Vec<usize> = report.corridors.iter().map(|c| c.unique_flights).collect();
    assert_eq!(flights, vec![12, 8, 6]);
}

#[test]
fn ranks_are_contiguous() {
    let report = CorridorDetector::new(params(3)).detect(three_corridor_traffic());

    let ranks: Vec<usize> = report.corridors.iter().map(|c| c.rank).collect();
    let expected: Vec<usize> = (1..=report.corridors.len()).collect();
    assert_eq!(ranks, expected);
    assert!(report
        .corridors
        .windows(2)
        .all(|pair| pair[0].unique_flights >= pair[1].unique_flights));
}

#[test]
fn raising_min_flights_never_adds_corridors() {
    let positions = three_corridor_traffic();
    let mut previous = usize::MAX;
    for min_flights in [1, 3, 6, 7, 8, 10, 12, 13, 50] {
        let total = CorridorDetector::new(params(min_flights))
            .detect(positions.clone())
            .total_corridors;
        assert!(total <= previous, "min_flights {min_flights} raised total to {total}");
        previous = total;
    }
    assert_eq!(previous, 0);
}

#[test]
fn top_n_truncates_but_keeps_total() {
    let report = CorridorDetector::new(DetectionParams {
        top_n: 1,
        ..params(3)
    })
    .detect(three_corridor_traffic());

    assert_eq!(report.total_corridors, 3);
    assert_eq!(report.corridors.len(), 1);
    assert_eq!(report.corridors[0].unique_flights, 12);
}

#[test]
fn empty_source_returns_empty_report() {
    let report = CorridorDetector::default().detect_rows(Vec::<PositionRow>::new());

    assert_eq!(report.total_corridors, 0);
    assert!(report.corridors.is_empty());
    assert_eq!(report.parameters, DetectionParams::default());
}

#[test]
fn rows_without_heading_are_ignored() {
    let mut rows: Vec<PositionRow> = north_south_traffic()
        .into_iter()
        .map(|p| PositionRow {
            flight_id: p.flight_id,
            latitude: Some(p.latitude),
            longitude: Some(p.longitude),
            altitude_m: p.altitude_m,
            heading: Some(p.heading),
            callsign: None,
        })
        .collect();
    rows.extend((0..40).map(|i| PositionRow {
        flight_id: FlightId(1_000 + i),
        latitude: Some(49.25),
        longitude: Some(8.3),
        altitude_m: None,
        heading: None,
        callsign: None,
    }));

    let report = CorridorDetector::new(params(10)).detect_rows(rows);
    assert_eq!(report.total_corridors, 1);
    assert_eq!(report.corridors[0].total_positions, 150);
}

#[test]
fn parallel_grouping_gives_identical_report() {
    let sequential = CorridorDetector::new(params(3)).detect(three_corridor_traffic());
    let parallel = CorridorDetector::new(params(3))
        .with_strategy(DirectionalProximityGrouper::parallel())
        .detect(three_corridor_traffic());

    assert_eq!(sequential.corridors, parallel.corridors);
}

#[test]
fn over_budget_run_fails_closed() {
    let report = CorridorDetector::new(DetectionParams {
        max_positions: Some(100),
        ..params(3)
    })
    .detect(three_corridor_traffic());

    assert_eq!(report.total_corridors, 0);
    assert!(report.corridors.is_empty());
}

#[test]
fn report_serializes_with_output_contract_fields() {
    let report = CorridorDetector::new(params(10)).detect(north_south_traffic());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["total_corridors"], 1);
    assert_eq!(json["parameters"]["min_flights"], 10);
    let corridor = &json["corridors"][0];
    for key in [
        "rank",
        "center_lat",
        "center_lon",
        "heading",
        "length_km",
        "width_km",
        "unique_flights",
        "total_positions",
        "avg_altitude_m",
        "linearity_score",
        "start_lat",
        "start_lon",
        "end_lat",
        "end_lon",
    ] {
        assert!(corridor.get(key).is_some(), "missing {key}");
    }
    assert_eq!(corridor["avg_altitude_m"], 9_700.0);
}
