use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use notification_service::bootstrap::build_app_state;
use notification_service::config::Config;
use notification_service::infrastructure::http::build_router;
use serde_json::{json, Value};
use tower::ServiceExt;

mod helpers;
use helpers::*;

/// Router plus the database guard that must outlive it.
struct TestApp {
    router: Router,
    _db: TestDatabase,
}

impl std::ops::Deref for TestApp {
    type Target = Router;

    fn deref(&self) -> &Router {
        &self.router
    }
}

async fn test_app(policy: &str) -> TestApp {
    let test_db = setup_test_db().await;
    let config = Config::from_lookup(|key| match key {
        "JWT_SECRET" => Some(TEST_JWT_SECRET.to_string()),
        "DELETION_TRANSITION_POLICY" => Some(policy.to_string()),
        _ => None,
    })
    .expect("valid test config");

    let state = build_app_state(test_db.db(), &config).expect("app state");
    TestApp {
        router: build_router(state),
        _db: test_db,
    }
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, bearer(token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_notification(app: &Router, user_id: i64, title: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/notifications",
        Some(&user_token()),
        Some(json!({"userId": user_id, "title": title, "message": "Test Message"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = test_app("lenient").await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_missing_or_bad_token_is_unauthorized() {
    let app = test_app("lenient").await;

    let (status, body) = send(&app, Method::GET, "/notifications/user/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(
        &app,
        Method::GET,
        "/notifications/user/1",
        Some("not-a-jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_list_notifications() {
    let app = test_app("lenient").await;

    let created = create_notification(&app, 1, "Test Title").await;
    assert!(created["id"].as_i64().unwrap() > 0);
    assert_eq!(created["userId"], 1);
    assert_eq!(created["title"], "Test Title");
    assert_eq!(created["message"], "Test Message");
    assert_eq!(created["read"], false);
    assert!(created["createdAt"].is_string());

    create_notification(&app, 2, "Someone else").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/notifications/user/1",
        Some(&user_token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
}

#[tokio::test]
async fn test_create_without_title_is_bad_request() {
    let app = test_app("lenient").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/notifications",
        Some(&user_token()),
        Some(json!({"userId": 1, "message": "no title"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_mark_read_then_unread_list_is_empty() {
    let app = test_app("lenient").await;
    let created = create_notification(&app, 3, "Ping").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/notifications/{}/read", id),
        Some(&user_token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["read"], true);

    let (_, unread) = send(
        &app,
        Method::GET,
        "/notifications/user/3/unread",
        Some(&user_token()),
        None,
    )
    .await;
    assert!(unread.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_mark_read_unknown_is_not_found() {
    let app = test_app("lenient").await;
    let (status, body) = send(
        &app,
        Method::PUT,
        "/notifications/777/read",
        Some(&user_token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("777"));
}

#[tokio::test]
async fn test_delete_notifications_by_user() {
    let app = test_app("lenient").await;
    create_notification(&app, 4, "a").await;
    create_notification(&app, 4, "b").await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/notifications/user/4",
        Some(&user_token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, listed) = send(
        &app,
        Method::GET,
        "/notifications/user/4",
        Some(&user_token()),
        None,
    )
    .await;
    assert!(listed.as_array().unwrap().is_empty());
}

/// Publish through the ingestion endpoint and wait until the listener has
/// recorded `expected` pending requests.
async fn wait_for_pending(app: &Router, expected: usize) -> Vec<Value> {
    for _ in 0..50 {
        let (status, body) = send(
            app,
            Method::GET,
            "/admin/deletion-requests/pending",
            Some(&admin_token()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let pending = body.as_array().unwrap().clone();
        if pending.len() >= expected {
            return pending;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    panic!("listener did not record {} requests", expected);
}

async fn publish(app: &Router, payload: &str) -> StatusCode {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/events/user-deletion-requests")
        .header(header::AUTHORIZATION, bearer(&user_token()))
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(payload.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn test_deletion_request_workflow() {
    let app = test_app("strict").await;

    assert_eq!(publish(&app, "55").await, StatusCode::ACCEPTED);
    let pending = wait_for_pending(&app, 1).await;
    assert_eq!(pending[0]["userId"], 55);
    assert_eq!(pending[0]["status"], "PENDING");
    assert!(pending[0]["requestTime"].is_string());
    let id = pending[0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/admin/deletion-requests/{}/approve", id),
        Some(&admin_token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "APPROVED");
    assert!(body["decisionTime"].is_string());

    // Already decided under the strict policy
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/admin/deletion-requests/{}/reject", id),
        Some(&admin_token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        Method::POST,
        "/admin/deletion-requests/9999/approve",
        Some(&admin_token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Request not found");
}

#[tokio::test]
async fn test_admin_routes_reject_plain_users() {
    let app = test_app("lenient").await;
    let (status, _) = send(
        &app,
        Method::GET,
        "/admin/deletion-requests/pending",
        Some(&user_token()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::POST,
        "/admin/deletion-requests/1/approve",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
