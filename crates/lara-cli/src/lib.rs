//! LARA CLI - command line tools for corridor detection.
//!
//! Binaries:
//! - detect_corridors: run corridor detection over a position database
//! - seed_traffic: fill a database with synthetic corridor traffic

pub mod config;
pub mod report;
pub mod sim;

pub use config::{Config, ParamOverrides};
pub use report::{format_summary, write_json};
