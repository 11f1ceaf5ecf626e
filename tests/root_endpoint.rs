//! Integration tests for the auxiliary endpoints: `GET /` and `GET /metrics`

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use gemini_bridge::{
    config::{Config, GeminiConfig},
    handlers::{self, AppState},
};
use std::sync::Arc;
use tower::ServiceExt;

fn create_app(api_key: Option<&str>) -> axum::Router {
    let config = Config {
        gemini: GeminiConfig::new(
            api_key.map(str::to_string),
            "gemini-test",
            "http://127.0.0.1:9",
        ),
        ..Config::default()
    };
    handlers::router(AppState::new(Arc::new(config)).expect("should create AppState"))
}

async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_root_is_ok_without_api_key() {
    let response = get(create_app(None), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body.as_ref(), b"MaliAI backend is up (Gemini)");
}

#[tokio::test]
async fn test_root_is_ok_with_api_key() {
    let response = get(create_app(Some("key")), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_preflight_is_allowed() {
    let response = create_app(None)
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/chat")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_metrics_endpoint_reports_chat_outcomes() {
    let app = create_app(None);

    let chat = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"messages":[]}"#))
        .unwrap();
    let response = app.clone().oneshot(chat).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = get(app, "/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8_lossy(&body);
    assert!(
        text.contains(r#"gemini_bridge_chat_requests_total{outcome="config_error"} 1"#),
        "metrics output: {}",
        text
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = get(create_app(None), "/v1/chat/completions").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
