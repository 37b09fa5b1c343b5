// Web server — Axum JSON API.
//
// Public routes:
//   POST /api/analyze/       score a message (optionally stored)
//   POST /api/analyze-link/  assess a single URL
//   GET  /api/checks         admin listing of stored checks
//   GET  /api/checks/{id}    one stored check
//   GET  /health             liveness probe
//
// There is no authentication; bind to a private interface when the record
// store holds anything sensitive.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::db::Database;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record store, if this process has one.
    pub db: Option<Arc<dyn Database>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, db: Option<Arc<dyn Database>>) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// The store to write new checks to, when persistence is switched on.
    pub fn check_sink(&self) -> Option<&Arc<dyn Database>> {
        if self.config.persist_checks {
            self.db.as_ref()
        } else {
            None
        }
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.bind, state.config.port);
    let persistence = if state.check_sink().is_some() {
        "enabled"
    } else {
        "disabled"
    };

    let app = build_router(state);

    info!(persistence, "ScamGuard API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/analyze", post(handlers::analyze::analyze_message))
        .route("/api/analyze/", post(handlers::analyze::analyze_message))
        .route("/api/analyze-link", post(handlers::analyze::analyze_link))
        .route("/api/analyze-link/", post(handlers::analyze::analyze_link))
        .route("/api/checks", get(handlers::checks::list_checks))
        .route("/api/checks/{id}", get(handlers::checks::get_check));

    Router::new()
        .merge(api)
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
