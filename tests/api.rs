// HTTP API tests — drive the Axum router in-process with tower's oneshot.
//
// Store-backed tests use an in-memory SQLite database, so nothing touches disk.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use scamguard::config::Config;
use scamguard::web::{build_router, AppState};

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn stateless_app() -> Router {
    let config = Config {
        persist_checks: false,
        ..Config::default()
    };
    build_router(AppState::new(config, None))
}

// ============================================================
// POST /api/analyze/ — no store
// ============================================================

#[tokio::test]
async fn analyze_returns_full_response() {
    let app = stateless_app();
    let (status, body) = send(
        &app,
        post_json(
            "/api/analyze/",
            r#"{"message": "Free lottery! Click http://bit.ly/x"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "input_message": "Free lottery! Click http://bit.ly/x",
            "risk_level": "High Risk",
            "score": 7,
            "reasons": [
                "Suspicious keyword detected: 'lottery'",
                "Suspicious keyword detected: 'free'",
                "Message contains suspicious links"
            ],
            "awareness_tips": [
                "Never click unknown links",
                "Do not share OTP or bank details",
                "Verify sender identity",
                "Avoid urgent payment requests"
            ]
        })
    );
}

#[tokio::test]
async fn analyze_without_trailing_slash() {
    let app = stateless_app();
    let (status, body) = send(
        &app,
        post_json("/api/analyze", r#"{"message": "see you at dinner tonight"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_level"], "Safe");
    assert_eq!(body["score"], 0);
    assert_eq!(body["reasons"], json!([]));
}

#[tokio::test]
async fn analyze_rejects_missing_message() {
    let app = stateless_app();
    for payload in [
        r#"{}"#,
        r#"{"message": ""}"#,
        r#"{"message": null}"#,
        r#"{"text": "urgent"}"#,
        "not json at all",
    ] {
        let (status, body) = send(&app, post_json("/api/analyze/", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
        assert_eq!(body, json!({ "error": "Message is required" }));
    }
}

#[tokio::test]
async fn analyze_requires_post() {
    let app = stateless_app();
    let response = app.clone().oneshot(get("/api/analyze/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn listing_without_store_is_unavailable() {
    let app = stateless_app();
    let (status, body) = send(&app, get("/api/checks")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Persistence disabled");
}

#[tokio::test]
async fn health_is_ok() {
    let app = stateless_app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

// ============================================================
// POST /api/analyze-link/
// ============================================================

#[tokio::test]
async fn analyze_link_returns_verdict() {
    let app = stateless_app();
    let (status, body) = send(
        &app,
        post_json("/api/analyze-link/", r#"{"url": "http://bit.ly/abc"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input_url"], "http://bit.ly/abc");
    // Analysis fields sit beside input_url, not under a nested key.
    assert!(body.get("analysis").is_none());
    assert!(body["detected_threats"].is_array());
    assert!(body["detected_keywords"].is_array());
    assert_eq!(body["risk_level"], "SUSPICIOUS");
    assert_eq!(body["scam_score"], 45);
    assert_eq!(body["safety_advice"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn analyze_link_rejects_missing_url() {
    let app = stateless_app();
    let (status, body) = send(&app, post_json("/api/analyze-link/", r#"{}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "URL is required" }));
}

// ============================================================
// Record store
// ============================================================

#[cfg(feature = "sqlite")]
mod with_store {
    use super::*;
    use std::sync::Arc;

    use scamguard::db::models::CheckFilter;
    use scamguard::db::Database;
    use scamguard::db::sqlite::SqliteDatabase;

    fn store_app(persist: bool) -> (Router, Arc<dyn Database>) {
        let db: Arc<dyn Database> = Arc::new(SqliteDatabase::in_memory().unwrap());
        let config = Config {
            persist_checks: persist,
            ..Config::default()
        };
        let app = build_router(AppState::new(config, Some(db.clone())));
        (app, db)
    }

    async fn analyze(app: &Router, message: &str) {
        let payload = json!({ "message": message }).to_string();
        let (status, _) = send(app, post_json("/api/analyze/", &payload)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn successful_analysis_is_stored() {
        let (app, db) = store_app(true);
        analyze(&app, "Free lottery! Click http://bit.ly/x").await;

        let checks = db.list_checks(&CheckFilter::default()).await.unwrap();
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].message, "Free lottery! Click http://bit.ly/x");
        assert_eq!(checks[0].risk_level, "High Risk");
        assert_eq!(checks[0].score, 7);
    }

    #[tokio::test]
    async fn rejected_request_stores_nothing() {
        let (app, db) = store_app(true);
        let (status, _) = send(&app, post_json("/api/analyze/", r#"{}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(db.count_checks(&CheckFilter::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn persistence_off_stores_nothing_but_lists() {
        let (app, db) = store_app(false);
        analyze(&app, "urgent: verify account now").await;
        assert_eq!(db.count_checks(&CheckFilter::default()).await.unwrap(), 0);

        let (status, body) = send(&app, get("/api/checks")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn listing_filters_and_paginates() {
        let (app, _db) = store_app(true);
        analyze(&app, "Free lottery! Click http://bit.ly/x").await; // High
        analyze(&app, "URGENT: see https://example.com now").await; // Medium
        analyze(&app, "see you at dinner tonight").await; // Safe
        analyze(&app, "win a free prize, urgent!").await; // High

        let (status, body) = send(&app, get("/api/checks?risk_level=high")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["checks"].as_array().unwrap().len(), 2);

        let (_, body) = send(&app, get("/api/checks?q=DINNER")).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["checks"][0]["risk_level"], "Safe");

        let (_, body) = send(&app, get("/api/checks?per_page=3&page=2")).await;
        assert_eq!(body["total"], 4);
        assert_eq!(body["page"], 2);
        assert_eq!(body["per_page"], 3);
        assert_eq!(body["checks"].as_array().unwrap().len(), 1);

        let (_, body) = send(&app, get("/api/checks?since=today&risk_level=nonsense")).await;
        assert_eq!(body["total"], 4);
    }

    #[tokio::test]
    async fn listing_is_most_recent_first() {
        let (app, _db) = store_app(true);
        analyze(&app, "the first message sent").await;
        analyze(&app, "the second message sent").await;

        let (_, body) = send(&app, get("/api/checks")).await;
        assert_eq!(body["checks"][0]["message"], "the second message sent");
        assert_eq!(body["checks"][1]["message"], "the first message sent");
    }

    #[tokio::test]
    async fn check_detail_and_not_found() {
        let (app, db) = store_app(true);
        analyze(&app, "urgent: verify account now").await;
        let id = db.list_checks(&CheckFilter::default()).await.unwrap()[0].id;

        let (status, body) = send(&app, get(&format!("/api/checks/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id);
        assert_eq!(body["score"], 4);
        assert!(body["summary"]
            .as_str()
            .unwrap()
            .starts_with("Medium Risk - "));

        let (status, body) = send(&app, get("/api/checks/9999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Check not found");
    }
}
