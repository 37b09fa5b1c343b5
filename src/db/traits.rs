// Database trait — backend-agnostic async interface for the record store.
//
// Implementor: SqliteDatabase (wraps rusqlite behind a tokio Mutex).
// Methods are async so a natively async backend could sit behind the same
// interface without touching callers.
//
// The store is append-only: there is an insert and several reads, and no
// way to modify or remove a stored check.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{CheckFilter, CheckRecord, ScoreResult};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Checks ---

    /// Store a scored message and return its ID.
    async fn insert_check(&self, message: &str, result: &ScoreResult) -> Result<i64>;

    /// Get a single check by ID.
    async fn get_check(&self, id: i64) -> Result<Option<CheckRecord>>;

    /// List checks matching the filter, ordered by creation time descending.
    async fn list_checks(&self, filter: &CheckFilter) -> Result<Vec<CheckRecord>>;

    /// Count checks matching the filter (limit and offset are ignored).
    async fn count_checks(&self, filter: &CheckFilter) -> Result<i64>;

    /// Number of stored checks per risk level.
    async fn risk_level_counts(&self) -> Result<Vec<(String, i64)>>;
}
