//! Database connection and initialization.

use anyhow::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::{info, warn};

/// Database connection wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Open (or create) the SQLite position store.
///
/// Creates the database file if it doesn't exist, runs migrations,
/// and returns a connection pool. Pass `":memory:"` for a throwaway store.
pub async fn init_database(db_path: &str, max_connections: u32) -> Result<Database> {
    // Ensure parent directory exists
    if let Some(parent) = Path::new(db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path);

    info!("Connecting to database: {}", db_path);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(&db_url)
        .await?;

    run_migrations(&pool).await?;

    Ok(Database { pool })
}

async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let migration_sql = include_str!("../migrations/001_init.sql");

    info!("Running database migrations...");

    for statement in migration_sql.split(';') {
        // Remove comment lines and trim whitespace
        let statement: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }

        if let Err(e) = sqlx::query(statement).execute(pool).await {
            let err_str = e.to_string();
            if err_str.contains("already exists") {
                continue;
            }
            if statement.to_uppercase().starts_with("CREATE") {
                anyhow::bail!("Migration failed on CREATE statement: {}", e);
            }
            warn!("Migration statement failed: {}", e);
        }
    }

    info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_database_creates_tables() {
        let db = init_database(":memory:", 1).await.unwrap();

        let result: (i32,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('flights', 'positions')",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();

        assert_eq!(result.0, 2);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = init_database(":memory:", 1).await.unwrap();
        run_migrations(db.pool()).await.unwrap();
    }
}
