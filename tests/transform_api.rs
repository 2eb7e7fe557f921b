// tests/transform_api.rs
// End-to-end tests for the REST surface with an in-memory database and no
// provider credential (the engine falls back to local cleanup).

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use humanizer::api::http_router;
use humanizer::engine::{EngineConfig, HumanizationEngine};
use humanizer::state::AppState;
use humanizer::store::TransformationStore;

async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");

    let store = TransformationStore::new(pool);
    store.init().await.expect("schema init");

    let engine = HumanizationEngine::new(None, EngineConfig::default());
    http_router(Arc::new(AppState::new(store, engine)))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
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

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_and_root_respond() {
    let app = test_app().await;

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_uptime_counts_from_startup_not_first_request() {
    let app = test_app().await;
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    // The very first /health call must already see elapsed time.
    let response = app.oneshot(get("/health")).await.unwrap();
    let body = body_json(response).await;
    let uptime = body["uptime"].as_f64().expect("uptime is a number");
    assert!(uptime >= 0.05, "got uptime {uptime}");
}

#[tokio::test]
async fn transform_persists_and_is_retrievable() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/transform",
            json!({
                "originalText": "  hello   world  ",
                "mode": "paraphrase",
                "deepHumanization": false,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    // No credential configured: the engine returns whitespace-normalized input.
    assert_eq!(body["data"]["humanizedText"], "hello world");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(get("/api/transformations"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/transformations/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["originalText"], "  hello   world  ");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/transformations/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get(&format!("/api/transformations/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_payloads_are_rejected() {
    let app = test_app().await;

    // Blank text
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/transform",
            json!({ "originalText": "   ", "mode": "paraphrase" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown mode
    let response = app
        .oneshot(post_json(
            "/api/transform",
            json!({ "originalText": "hello", "mode": "shout" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn history_is_scoped_by_owner_header() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/transform")
                .header("content-type", "application/json")
                .header("x-user-id", "alice")
                .body(Body::from(
                    json!({
                        "originalText": "owned text",
                        "mode": "tone",
                        "deepHumanization": false,
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Anonymous history does not include alice's record.
    let response = app
        .clone()
        .oneshot(get("/api/transformations"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // Alice sees it.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/transformations")
                .header("x-user-id", "alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Anonymous delete of an owned record misses.
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/transformations/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
