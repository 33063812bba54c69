//! Human and JSON renderings of a corridor report.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lara_core::CorridorReport;

/// Corridors listed in the console summary.
const SUMMARY_LEN: usize = 10;

/// Render the console summary: a header line and the top corridors.
pub fn format_summary(report: &CorridorReport) -> String {
    let min_flights = report.parameters.min_flights;
    if report.is_empty() {
        return format!("No stable corridors detected (min {min_flights} flights)\n");
    }

    let mut out = format!(
        "Found {} corridors (min {} flights)\n",
        report.total_corridors, min_flights
    );
    for c in report.corridors.iter().take(SUMMARY_LEN) {
        let _ = writeln!(
            out,
            "  #{:2}: ({:.4}, {:.4}) heading {:5.1}° - {:.1} km, {} flights, {} positions, linearity {:.2}",
            c.rank,
            c.center_lat,
            c.center_lon,
            c.heading,
            c.length_km,
            c.unique_flights,
            c.total_positions,
            c.linearity_score,
        );
    }
    out
}

/// Write the report as pretty-printed JSON, creating parent directories.
pub fn write_json(report: &CorridorReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lara_core::{Corridor, DetectionParams};

    fn corridor(rank: usize, flights: usize) -> Corridor {
        Corridor {
            rank,
            center_lat: 52.5,
            center_lon: 13.4,
            heading: 95.0,
            length_km: 42.0,
            width_km: 1.2,
            unique_flights: flights,
            total_positions: flights * 10,
            avg_altitude_m: 9000.0,
            linearity_score: 0.91,
            start_lat: 52.5,
            start_lon: 13.1,
            end_lat: 52.5,
            end_lon: 13.7,
        }
    }

    #[test]
    fn test_summary_for_empty_report() {
        let report = CorridorReport::empty(DetectionParams::default());
        assert_eq!(
            format_summary(&report),
            "No stable corridors detected (min 15 flights)\n"
        );
    }

    #[test]
    fn test_summary_lists_at_most_ten() {
        let corridors: Vec<Corridor> = (1..=12).map(|r| corridor(r, 40 - r)).collect();
        let report = CorridorReport {
            total_corridors: 12,
            corridors,
            parameters: DetectionParams::default(),
        };
        let summary = format_summary(&report);
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines[0], "Found 12 corridors (min 15 flights)");
        assert_eq!(lines.len(), 1 + SUMMARY_LEN);
        assert!(lines[1].starts_with("  # 1: (52.5000, 13.4000)"));
        assert!(lines[1].contains("39 flights, 390 positions"));
    }

    #[test]
    fn test_write_json_creates_directories() {
        let dir = std::env::temp_dir().join(format!("lara-report-{}", std::process::id()));
        let path = dir.join("nested").join("corridors.json");
        let report = CorridorReport {
            total_corridors: 1,
            corridors: vec![corridor(1, 20)],
            parameters: DetectionParams::default(),
        };

        write_json(&report, &path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["total_corridors"], 1);
        assert_eq!(value["corridors"][0]["unique_flights"], 20);
        assert_eq!(value["parameters"]["min_flights"], 15);

        fs::remove_dir_all(&dir).unwrap();
    }
}
