//! Detect flight corridors in a position database.
//!
//! Usage:
//!   cargo run -p lara-cli --bin detect_corridors -- --db data/lara_flights.db --output corridors.json

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use lara_cli::{format_summary, write_json, Config, ParamOverrides};
use lara_core::{CorridorDetector, DeploymentProfile, DirectionalProximityGrouper, TracingObserver};
use lara_store::{count_positions, fetch_position_rows, init_database, PositionQuery};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Corridor detection over stored flight positions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Position database (defaults to LARA_DB_PATH)
    #[arg(long)]
    db: Option<String>,

    /// Threshold preset: local or regional (defaults to LARA_PROFILE)
    #[arg(long)]
    profile: Option<DeploymentProfile>,

    #[command(flatten)]
    overrides: ParamOverrides,

    /// Only use positions at or after this time (RFC 3339)
    #[arg(long)]
    since: Option<DateTime<Utc>>,

    /// Only use positions at or before this time (RFC 3339)
    #[arg(long)]
    until: Option<DateTime<Utc>>,

    /// Group heading buckets on all cores
    #[arg(long)]
    parallel: bool,

    /// Write the full report as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("detect_corridors=info".parse()?)
                .add_directive("lara_core=info".parse()?)
                .add_directive("lara_store=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    let db_path = args.db.unwrap_or(config.database_path);
    if !Path::new(&db_path).exists() {
        bail!("Database not found: {db_path}");
    }

    let profile = args.profile.unwrap_or(config.profile);
    let params = args.overrides.apply(profile.params());
    params.validate().context("invalid detection parameters")?;

    let db = init_database(&db_path, config.database_max_connections).await?;
    let stored = count_positions(db.pool()).await?;
    tracing::info!("Opened {} ({} stored positions, profile {:?})", db_path, stored, profile);

    let query = PositionQuery {
        since: args.since,
        until: args.until,
    };
    let rows = fetch_position_rows(db.pool(), &query).await?;

    let mut detector = CorridorDetector::new(params).with_observer(TracingObserver);
    if args.parallel || config.parallel {
        detector = detector.with_strategy(DirectionalProximityGrouper::parallel());
    }

    let report = tokio::task::spawn_blocking(move || detector.detect_rows(rows)).await?;

    print!("{}", format_summary(&report));

    if let Some(path) = args.output {
        write_json(&report, &path)?;
        tracing::info!("Report written to {}", path.display());
    }

    Ok(())
}
