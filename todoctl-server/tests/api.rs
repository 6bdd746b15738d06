//! Router-level tests against in-process stores

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use todoctl_server::db::{MemoryStore, StoreError, TodoStore};
use todoctl_server::models::{ListOrder, TaskText, TodoRow};
use todoctl_server::{build_router, AppState};

fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let router = build_router(AppState::new(store.clone()), Duration::from_secs(30));
    (router, store)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn buy_milk_lifecycle() {
    let (app, _store) = app();

    let (status, body) = send(&app, post_json("/add", r#"{"task":"buy milk"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"message": "Task added", "id": 1}));

    let (status, body) = send(&app, get("/list")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": 1, "task": "buy milk"}]));

    let (status, body) = send(&app, delete("/todos/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Todo deleted"}));

    let (status, body) = send(&app, get("/list")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn add_then_list_includes_exactly_one_new_entry() {
    let (app, _store) = app();
    send(&app, post_json("/add", r#"{"task":"existing"}"#)).await;

    let (_, added) = send(&app, post_json("/todos/add", r#"{"task":"water plants"}"#)).await;
    let id = added["id"].as_i64().unwrap();

    let (_, list) = send(&app, get("/todos/list")).await;
    let matches: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .filter(|t| t["task"] == "water plants")
        .collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["id"], id);
    assert_ne!(id, 1);
}

#[tokio::test]
async fn list_is_newest_first() {
    let (app, _store) = app();
    for task in ["first", "second", "third"] {
        send(&app, post_json("/add", &json!({ "task": task }).to_string())).await;
    }

    let (_, list) = send(&app, get("/list")).await;
    let tasks: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["task"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(tasks, ["third", "second", "first"]);
}

#[tokio::test]
async fn task_is_stored_trimmed() {
    let (app, _store) = app();
    send(&app, post_json("/add", r#"{"task":"  call mum  "}"#)).await;

    let (_, list) = send(&app, get("/list")).await;
    assert_eq!(list[0]["task"], "call mum");
}

#[tokio::test]
async fn invalid_add_bodies_are_rejected_before_the_store() {
    let (app, store) = app();
    send(&app, post_json("/add", r#"{"task":"keep me"}"#)).await;

    let cases = [
        r#"{}"#,
        r#"{"task":null}"#,
        r#"{"task":""}"#,
        r#"{"task":"   "}"#,
        r#"{"task":42}"#,
        r#"{"name":"buy milk"}"#,
        r#"not json"#,
        r#""#,
    ];
    for body in cases {
        let (status, response) = send(&app, post_json("/add", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert!(response["error"].is_string(), "body: {body}");
    }

    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn missing_task_has_specific_message() {
    let (app, _store) = app();
    let (_, body) = send(&app, post_json("/add", r#"{}"#)).await;
    assert_eq!(body, json!({"error": "task is required"}));

    let (_, body) = send(&app, post_json("/add", r#"{"task":" "}"#)).await;
    assert_eq!(body, json!({"error": "task cannot be empty"}));
}

#[tokio::test]
async fn add_without_json_content_type_is_400() {
    let (app, store) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/add")
        .body(Body::from(r#"{"task":"buy milk"}"#))
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.is_empty());
}

#[tokio::test]
async fn overlong_task_is_400() {
    let (app, store) = app();
    let body = json!({ "task": "x".repeat(256) }).to_string();

    let (status, _) = send(&app, post_json("/add", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.is_empty());
}

#[tokio::test]
async fn delete_unknown_id_is_404_and_changes_nothing() {
    let (app, store) = app();
    send(&app, post_json("/add", r#"{"task":"keep me"}"#)).await;

    let (status, body) = send(&app, delete("/todos/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Todo not found"}));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn delete_non_integer_id_is_404() {
    let (app, store) = app();
    send(&app, post_json("/add", r#"{"task":"keep me"}"#)).await;

    let (status, _) = send(&app, delete("/todos/abc")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn second_delete_of_same_id_is_404() {
    let (app, store) = app();
    send(&app, post_json("/add", r#"{"task":"one"}"#)).await;
    let (_, added) = send(&app, post_json("/add", r#"{"task":"two"}"#)).await;
    let uri = format!("/todos/{}", added["id"]);

    let (status, _) = send(&app, delete(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.len(), 1);

    let (status, _) = send(&app, delete(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn empty_list_is_200() {
    let (app, _store) = app();
    let (status, body) = send(&app, get("/list")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn health_tracks_store_reachability() {
    let (app, store) = app();

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert!(body["timestamp"].is_string());
    assert!(body.get("error").is_none());

    store.set_online(false);
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"], "disconnected");
    assert_eq!(body["error"], "database unreachable");
}

#[tokio::test]
async fn store_failures_are_generic_500s() {
    let (app, store) = app();
    store.set_online(false);

    let requests = [
        post_json("/add", r#"{"task":"buy milk"}"#),
        get("/list"),
        delete("/todos/1"),
    ];
    for request in requests {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error"}));
    }
}

#[tokio::test]
async fn validation_wins_over_dead_store() {
    let (app, store) = app();
    store.set_online(false);

    let (status, _) = send(&app, post_json("/add", r#"{"task":""}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Store whose calls never complete
struct StalledStore;

#[async_trait]
impl TodoStore for StalledStore {
    async fn probe(&self) -> Result<(), StoreError> {
        std::future::pending().await
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        std::future::pending().await
    }

    async fn insert(&self, _task: &TaskText, _created_at: DateTime<Utc>) -> Result<i64, StoreError> {
        std::future::pending().await
    }

    async fn select_all(&self, _order: ListOrder) -> Result<Vec<TodoRow>, StoreError> {
        std::future::pending().await
    }

    async fn delete_by_id(&self, _id: i64) -> Result<u64, StoreError> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn stalled_requests_time_out_with_408() {
    let app = build_router(
        AppState::new(Arc::new(StalledStore)),
        Duration::from_millis(100),
    );

    for request in [get("/list"), get("/health"), delete("/todos/1")] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}

#[tokio::test]
async fn cors_headers_are_present() {
    let (app, _store) = app();
    let request = Request::builder()
        .uri("/list")
        .header(header::ORIGIN, "http://localhost:8080")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
