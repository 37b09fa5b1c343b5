// Database queries — create and read operations for stored checks.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.
// There are deliberately no UPDATE or DELETE statements: checks are append-only.

use anyhow::Result;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use super::models::{CheckFilter, CheckRecord, ScoreResult};

const CHECK_COLUMNS: &str = "id, message, risk_level, score, created_at";

/// Store a scored message and return its ID.
pub fn insert_check(conn: &Connection, message: &str, result: &ScoreResult) -> Result<i64> {
    conn.execute(
        "INSERT INTO scam_checks (message, risk_level, score) VALUES (?1, ?2, ?3)",
        params![message, result.risk_level.as_str(), result.score],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Get a single check by ID.
pub fn get_check(conn: &Connection, id: i64) -> Result<Option<CheckRecord>> {
    let sql = format!("SELECT {CHECK_COLUMNS} FROM scam_checks WHERE id = ?1");
    let result = conn.query_row(&sql, params![id], row_to_check).optional()?;
    Ok(result)
}

/// List checks matching the filter, most recent first.
pub fn list_checks(conn: &Connection, filter: &CheckFilter) -> Result<Vec<CheckRecord>> {
    let (where_clause, mut values) = filter_clause(filter);
    let mut sql = format!(
        "SELECT {CHECK_COLUMNS} FROM scam_checks{where_clause}
         ORDER BY created_at DESC, id DESC"
    );

    // SQLite needs a LIMIT before OFFSET; -1 means unbounded.
    if filter.limit.is_some() || filter.offset > 0 {
        sql.push_str(" LIMIT ? OFFSET ?");
        values.push(Value::Integer(filter.limit.map(i64::from).unwrap_or(-1)));
        values.push(Value::Integer(i64::from(filter.offset)));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), row_to_check)?;

    let mut checks = Vec::new();
    for row in rows {
        checks.push(row?);
    }
    Ok(checks)
}

/// Count checks matching the filter, ignoring its limit and offset.
pub fn count_checks(conn: &Connection, filter: &CheckFilter) -> Result<i64> {
    let (where_clause, values) = filter_clause(filter);
    let sql = format!("SELECT COUNT(*) FROM scam_checks{where_clause}");
    let count = conn.query_row(&sql, params_from_iter(values), |row| row.get(0))?;
    Ok(count)
}

/// Number of stored checks per risk level, ordered by level name.
pub fn risk_level_counts(conn: &Connection) -> Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT risk_level, COUNT(*) FROM scam_checks
         GROUP BY risk_level
         ORDER BY risk_level",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut counts = Vec::new();
    for row in rows {
        counts.push(row?);
    }
    Ok(counts)
}

fn row_to_check(row: &Row<'_>) -> rusqlite::Result<CheckRecord> {
    Ok(CheckRecord {
        id: row.get(0)?,
        message: row.get(1)?,
        risk_level: row.get(2)?,
        score: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Build the WHERE clause and its positional parameters for a filter.
fn filter_clause(filter: &CheckFilter) -> (String, Vec<Value>) {
    let mut conditions = Vec::new();
    let mut values = Vec::new();

    if let Some(level) = filter.risk_level {
        conditions.push("risk_level = ?");
        values.push(Value::Text(level.as_str().to_string()));
    }

    if let Some(period) = filter.since {
        let (start, shift) = period.sqlite_modifiers();
        conditions.push("created_at >= datetime('now', ?, ?)");
        values.push(Value::Text(start.to_string()));
        values.push(Value::Text(shift.to_string()));
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        // LIKE is case-insensitive for ASCII in SQLite.
        conditions.push("message LIKE ? ESCAPE '\\'");
        values.push(Value::Text(format!("%{}%", escape_like(search))));
    }

    if conditions.is_empty() {
        (String::new(), values)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), values)
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
