// Stored check listing and detail handlers (read-only admin view).
//
// GET /api/checks       — paginated, optional ?risk_level=, ?since= and ?q= filters
// GET /api/checks/{id}  — single check
//
// Unknown risk_level or since values are ignored rather than rejected, so a
// stale bookmark still lists something.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::db::models::{CheckFilter, CheckRecord, DatePeriod, RiskLevel};
use crate::db::Database;
use crate::web::{api_error, AppState};

pub const DEFAULT_PER_PAGE: u32 = 50;
pub const MAX_PER_PAGE: u32 = 200;

#[derive(Deserialize, Default)]
pub struct ChecksQuery {
    /// Safe | Medium Risk | High Risk (also safe / medium / high)
    pub risk_level: Option<String>,
    /// today | past_7_days | this_month | this_year
    pub since: Option<String>,
    /// Case-insensitive message search
    pub q: Option<String>,
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Results per page (default 50, max 200)
    pub per_page: Option<u32>,
}

impl ChecksQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    pub fn to_filter(&self) -> CheckFilter {
        let per_page = self.per_page();
        CheckFilter {
            risk_level: self.risk_level.as_deref().and_then(RiskLevel::parse),
            since: self.since.as_deref().and_then(DatePeriod::parse),
            search: self.q.clone().filter(|q| !q.trim().is_empty()),
            limit: Some(per_page),
            offset: (self.page() - 1).saturating_mul(per_page),
        }
    }
}

/// GET /api/checks — list stored checks, most recent first.
pub async fn list_checks(
    State(state): State<AppState>,
    Query(params): Query<ChecksQuery>,
) -> Response {
    let Some(db) = store(&state) else {
        return persistence_disabled();
    };

    let filter = params.to_filter();
    let listing = async {
        let checks = db.list_checks(&filter).await?;
        let total = db.count_checks(&filter).await?;
        anyhow::Ok((checks, total))
    };

    match listing.await {
        Ok((checks, total)) => {
            let checks: Vec<serde_json::Value> = checks.iter().map(check_to_json).collect();
            Json(serde_json::json!({
                "checks": checks,
                "total": total,
                "page": params.page(),
                "per_page": params.per_page(),
            }))
            .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "DB error listing checks");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// GET /api/checks/{id} — single stored check.
pub async fn get_check(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let Some(db) = store(&state) else {
        return persistence_disabled();
    };

    match db.get_check(id).await {
        Ok(Some(check)) => Json(check_to_json(&check)).into_response(),
        Ok(None) => api_error(StatusCode::NOT_FOUND, "Check not found"),
        Err(e) => {
            tracing::error!(error = %e, id, "DB error fetching check");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

// --- Helpers ---

fn store(state: &AppState) -> Option<Arc<dyn Database>> {
    state.db.clone()
}

fn persistence_disabled() -> Response {
    api_error(StatusCode::SERVICE_UNAVAILABLE, "Persistence disabled")
}

fn check_to_json(check: &CheckRecord) -> serde_json::Value {
    serde_json::json!({
        "id": check.id,
        "message": check.message,
        "risk_level": check.risk_level,
        "score": check.score,
        "created_at": check.created_at,
        "summary": check.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = ChecksQuery::default();
        let filter = query.to_filter();
        assert_eq!(filter.limit, Some(50));
        assert_eq!(filter.offset, 0);
        assert!(filter.risk_level.is_none());
        assert!(filter.search.is_none());
    }

    #[test]
    fn test_query_pagination_is_clamped() {
        let query = ChecksQuery {
            page: Some(0),
            per_page: Some(10_000),
            ..Default::default()
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), 200);

        let query = ChecksQuery {
            page: Some(3),
            per_page: Some(20),
            ..Default::default()
        };
        assert_eq!(query.to_filter().offset, 40);
    }

    #[test]
    fn test_query_parses_filters_and_ignores_unknown() {
        let query = ChecksQuery {
            risk_level: Some("high".to_string()),
            since: Some("past_7_days".to_string()),
            q: Some("  ".to_string()),
            ..Default::default()
        };
        let filter = query.to_filter();
        assert_eq!(filter.risk_level, Some(RiskLevel::HighRisk));
        assert_eq!(filter.since, Some(DatePeriod::Past7Days));
        assert!(filter.search.is_none());

        let query = ChecksQuery {
            risk_level: Some("catastrophic".to_string()),
            since: Some("last decade".to_string()),
            ..Default::default()
        };
        let filter = query.to_filter();
        assert!(filter.risk_level.is_none());
        assert!(filter.since.is_none());
    }
}
