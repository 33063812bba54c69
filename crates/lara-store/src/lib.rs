//! Persistence layer for LARA.
//!
//! SQLite-backed storage of flight sessions and their position samples,
//! plus the read-only query that feeds corridor detection.

pub mod db;
pub mod positions;
pub mod tracks;

pub use db::{init_database, Database};
pub use positions::{count_positions, fetch_position_rows, PositionQuery};
pub use tracks::{insert_track, NewFlight, NewPosition};
