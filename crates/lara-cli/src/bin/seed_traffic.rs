//! Seed a position database with synthetic corridor traffic.
//!
//! Usage:
//!   cargo run -p lara-cli --bin seed_traffic -- --corridors 3 --flights 20 --seed 7

use anyhow::Result;
use clap::Parser;
use lara_cli::sim::{corridor_fan, generate_corridor_traffic, TrafficConfig};
use lara_cli::Config;
use lara_store::{count_positions, init_database, insert_track};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Berlin, Brandenburg Gate
const DEFAULT_LAT: f64 = 52.516257;
const DEFAULT_LON: f64 = 13.377525;

/// Synthetic corridor traffic generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Position database (defaults to LARA_DB_PATH)
    #[arg(long)]
    db: Option<String>,

    /// Center latitude shared by all corridors
    #[arg(long, default_value_t = DEFAULT_LAT)]
    lat: f64,

    /// Center longitude shared by all corridors
    #[arg(long, default_value_t = DEFAULT_LON)]
    lon: f64,

    /// Number of corridors
    #[arg(long, default_value_t = 3)]
    corridors: usize,

    /// Flights on the busiest corridor
    #[arg(long, default_value_t = 20)]
    flights: usize,

    /// Position samples per flight
    #[arg(long, default_value_t = 12)]
    samples: usize,

    /// Corridor length (km)
    #[arg(long, default_value_t = 40.0)]
    length_km: f64,

    /// Maximum lateral offset from the centerline (km)
    #[arg(long, default_value_t = 1.0)]
    jitter_km: f64,

    /// Cruise altitude of the first corridor (meters)
    #[arg(long, default_value_t = 9000.0)]
    altitude_m: f64,

    /// RNG seed for reproducible traffic
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("seed_traffic=info".parse()?))
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    let db_path = args.db.unwrap_or(config.database_path);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let traffic = TrafficConfig {
        samples_per_flight: args.samples,
        jitter_km: args.jitter_km,
        ..TrafficConfig::default()
    };

    let db = init_database(&db_path, config.database_max_connections).await?;
    let plans = corridor_fan(
        args.lat,
        args.lon,
        args.corridors,
        args.flights,
        args.length_km,
        args.altitude_m,
    );

    for plan in &plans {
        let flights = generate_corridor_traffic(&mut rng, plan, &traffic);
        for synthetic in &flights {
            insert_track(db.pool(), &synthetic.flight, &synthetic.positions).await?;
        }
        tracing::info!(
            "{}: heading {:.0}°, {} flights at {:.0} m",
            plan.name,
            plan.heading,
            flights.len(),
            plan.altitude_m
        );
    }

    let total = count_positions(db.pool()).await?;
    tracing::info!("Seeded {} corridors into {} ({} positions stored)", plans.len(), db_path, total);

    Ok(())
}
