// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so the scorer and the web layer can use them
// without depending on rusqlite directly.

use serde::{Deserialize, Serialize};

/// Risk classification for a scored message.
///
/// Serialized in its display form ("Medium Risk"), which is also what the
/// record store persists in the `risk_level` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Safe")]
    Safe,
    #[serde(rename = "Medium Risk")]
    MediumRisk,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl RiskLevel {
    /// Determine the level from a heuristic score.
    ///
    /// 0-2 is Safe, 3-5 is Medium Risk, 6 and above is High Risk.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 6 => RiskLevel::HighRisk,
            s if s >= 3 => RiskLevel::MediumRisk,
            _ => RiskLevel::Safe,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "Safe",
            RiskLevel::MediumRisk => "Medium Risk",
            RiskLevel::HighRisk => "High Risk",
        }
    }

    /// Parse a user-supplied level, accepting the display form as well as
    /// compact spellings like `medium`, `medium_risk` or `HIGH-RISK`.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "safe" => Some(RiskLevel::Safe),
            "medium" | "mediumrisk" => Some(RiskLevel::MediumRisk),
            "high" | "highrisk" => Some(RiskLevel::HighRisk),
            _ => None,
        }
    }

    pub fn all() -> [RiskLevel; 3] {
        [RiskLevel::Safe, RiskLevel::MediumRisk, RiskLevel::HighRisk]
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of scoring a single message. Never persisted directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub risk_level: RiskLevel,
    pub score: u32,
    /// One entry per triggered heuristic, in evaluation order.
    pub reasons: Vec<String>,
}

/// A stored check. Created once, never updated.
#[derive(Debug, Clone, Serialize)]
pub struct CheckRecord {
    pub id: i64,
    pub message: String,
    pub risk_level: String,
    pub score: i64,
    /// SQLite `datetime('now')` text, UTC: `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
}

impl CheckRecord {
    /// The date part of `created_at`, or the raw value if it doesn't parse.
    pub fn created_date(&self) -> String {
        chrono::NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%d %H:%M:%S")
            .map(|dt| dt.date().to_string())
            .unwrap_or_else(|_| self.created_at.clone())
    }
}

impl std::fmt::Display for CheckRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.risk_level, self.created_date())
    }
}

/// Relative creation-time windows for filtering stored checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePeriod {
    Today,
    Past7Days,
    ThisMonth,
    ThisYear,
}

impl DatePeriod {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "today" => Some(DatePeriod::Today),
            "past_7_days" | "week" | "7d" => Some(DatePeriod::Past7Days),
            "this_month" | "month" => Some(DatePeriod::ThisMonth),
            "this_year" | "year" => Some(DatePeriod::ThisYear),
            _ => None,
        }
    }

    /// SQLite modifiers that turn `datetime('now')` into the window's lower bound.
    pub fn sqlite_modifiers(&self) -> (&'static str, &'static str) {
        match self {
            DatePeriod::Today => ("start of day", "+0 days"),
            DatePeriod::Past7Days => ("start of day", "-6 days"),
            DatePeriod::ThisMonth => ("start of month", "+0 days"),
            DatePeriod::ThisYear => ("start of year", "+0 days"),
        }
    }
}

/// Listing criteria for stored checks. All fields are optional; the default
/// filter returns every record, most recent first.
#[derive(Debug, Clone, Default)]
pub struct CheckFilter {
    pub risk_level: Option<RiskLevel>,
    pub since: Option<DatePeriod>,
    /// Case-insensitive substring match on the message text.
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}
