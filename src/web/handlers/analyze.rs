// Analysis handlers.
//
// POST /api/analyze/       { "message": "..." } → score, risk level, reasons, tips
// POST /api/analyze-link/  { "url": "..." }     → link verdict
//
// The body is read as raw bytes and parsed leniently: a body that isn't a
// JSON object, or whose field is missing, null, not a string or empty, gets
// the same 400 as an absent field. The scorer only runs on a non-empty string.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::db::models::RiskLevel;
use crate::scoring::link::{self, LinkAnalysis};
use crate::scoring::message::{self, AWARENESS_TIPS};
use crate::web::{api_error, AppState};

pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const URL_REQUIRED: &str = "URL is required";

#[derive(Debug, Serialize)]
pub struct MessageAnalysisResponse {
    pub input_message: String,
    pub risk_level: RiskLevel,
    pub score: u32,
    pub reasons: Vec<String>,
    pub awareness_tips: [&'static str; 4],
}

#[derive(Debug, Serialize)]
pub struct LinkAnalysisResponse {
    pub input_url: String,
    #[serde(flatten)]
    pub analysis: LinkAnalysis,
}

/// POST /api/analyze/ — score a message and, if enabled, store the check.
pub async fn analyze_message(State(state): State<AppState>, body: Bytes) -> Response {
    let Some(text) = string_field(&body, "message") else {
        return api_error(StatusCode::BAD_REQUEST, MESSAGE_REQUIRED);
    };

    let result = message::analyze_message(&text);

    if let Some(db) = state.check_sink() {
        // A failed write never changes the analysis the caller gets back.
        match db.insert_check(&text, &result).await {
            Ok(id) => tracing::debug!(id, risk_level = %result.risk_level, "Stored check"),
            Err(e) => tracing::error!(error = %e, "Failed to store check"),
        }
    }

    tracing::info!(
        score = result.score,
        risk_level = %result.risk_level,
        reasons = result.reasons.len(),
        "Analyzed message"
    );

    Json(MessageAnalysisResponse {
        input_message: text,
        risk_level: result.risk_level,
        score: result.score,
        reasons: result.reasons,
        awareness_tips: AWARENESS_TIPS,
    })
    .into_response()
}

/// POST /api/analyze-link/ — assess a single URL. Never stored.
pub async fn analyze_link(body: Bytes) -> Response {
    let Some(url) = string_field(&body, "url") else {
        return api_error(StatusCode::BAD_REQUEST, URL_REQUIRED);
    };

    let analysis = link::analyze_link(&url);
    tracing::info!(
        scam_score = analysis.scam_score,
        risk_level = %analysis.risk_level,
        "Analyzed link"
    );

    Json(LinkAnalysisResponse {
        input_url: url,
        analysis,
    })
    .into_response()
}

/// Pull a non-empty string field out of a JSON object body.
fn string_field(body: &[u8], field: &str) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
