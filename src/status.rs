// System status display — DB location and size, check counts, latest check.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::db::models::CheckFilter;
use crate::db::Database;
use crate::output::terminal;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, db_display_path: &str) -> Result<()> {
    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_display_path, file_size);

    let total = db.count_checks(&CheckFilter::default()).await?;
    println!("Stored checks: {total}");
    if total > 0 {
        terminal::display_risk_counts(&db.risk_level_counts().await?);
    }

    let latest = db
        .list_checks(&CheckFilter {
            limit: Some(1),
            ..Default::default()
        })
        .await?;
    match latest.first() {
        Some(check) => println!("Latest check: #{} ({})", check.id, check),
        None => {
            println!("Latest check: none yet");
            println!("  Run `scamguard serve` and POST to /api/analyze/");
        }
    }

    Ok(())
}

/// True if there is a database file to report on. Prints setup help if not.
pub fn check_initialized(db_path: &str) -> bool {
    if Path::new(db_path).exists() {
        return true;
    }
    println!("Database: not initialized ({db_path})");
    println!("\nRun `scamguard init` to set up the database.");
    false
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
