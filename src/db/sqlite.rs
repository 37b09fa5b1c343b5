// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{CheckFilter, CheckRecord, ScoreResult};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// In-memory database with the schema applied. Nothing survives a restart.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::schema::create_tables(&conn)?;
        Ok(Self::new(conn))
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn insert_check(&self, message: &str, result: &ScoreResult) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_check(&conn, message, result)
    }

    async fn get_check(&self, id: i64) -> Result<Option<CheckRecord>> {
        let conn = self.conn.lock().await;
        super::queries::get_check(&conn, id)
    }

    async fn list_checks(&self, filter: &CheckFilter) -> Result<Vec<CheckRecord>> {
        let conn = self.conn.lock().await;
        super::queries::list_checks(&conn, filter)
    }

    async fn count_checks(&self, filter: &CheckFilter) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::count_checks(&conn, filter)
    }

    async fn risk_level_counts(&self) -> Result<Vec<(String, i64)>> {
        let conn = self.conn.lock().await;
        super::queries::risk_level_counts(&conn)
    }
}
