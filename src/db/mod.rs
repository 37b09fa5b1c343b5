// Database layer — append-only SQLite storage for past message checks.
//
// We use rusqlite with the "bundled" feature so there's no system SQLite
// dependency. The database file lives wherever SCAMGUARD_DB_PATH points
// (defaults to ./scamguard.db). Building without the `sqlite` feature keeps
// the models and the trait but drops the backend, so the server runs with
// persistence disabled.

pub mod models;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod queries;
#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use traits::Database;

#[cfg(feature = "sqlite")]
use anyhow::{Context, Result};
#[cfg(feature = "sqlite")]
use rusqlite::Connection;
#[cfg(feature = "sqlite")]
use std::path::Path;

/// Open (or create) the database and run migrations.
///
/// This is the main entry point — called by `scamguard init` and by the
/// server when persistence is enabled.
#[cfg(feature = "sqlite")]
pub fn initialize(db_path: &str) -> Result<Connection> {
    // Create parent directories if needed
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for database: {}", db_path))?;
        }
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    // Enable WAL mode for better concurrent read performance
    conn.pragma_update(None, "journal_mode", "WAL")?;

    schema::create_tables(&conn)?;

    Ok(conn)
}

/// Open an existing database (fails if it doesn't exist yet).
#[cfg(feature = "sqlite")]
pub fn open(db_path: &str) -> Result<Connection> {
    if !Path::new(db_path).exists() {
        anyhow::bail!(
            "Database not found at {}. Run `scamguard init` first.",
            db_path
        );
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;

    Ok(conn)
}

/// Open an existing SQLite database behind the `Database` trait.
#[cfg(feature = "sqlite")]
pub fn open_sqlite(db_path: &str) -> Result<std::sync::Arc<dyn Database>> {
    let conn = open(db_path)?;
    // Pick up migrations added since the file was created.
    schema::create_tables(&conn)?;
    Ok(std::sync::Arc::new(sqlite::SqliteDatabase::new(conn)))
}

/// Create (if needed) and open a SQLite database behind the `Database` trait.
#[cfg(feature = "sqlite")]
pub fn initialize_sqlite(db_path: &str) -> Result<std::sync::Arc<dyn Database>> {
    let conn = initialize(db_path)?;
    Ok(std::sync::Arc::new(sqlite::SqliteDatabase::new(conn)))
}
