mod common;

use axum::http::StatusCode;
use common::{TestApp, assert_error, body_string};

#[tokio::test]
async fn health_check() {
    let app = TestApp::new().await;
    let resp = app.get("/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "ok");
}

#[tokio::test]
async fn index_shows_forms_and_users() {
    let app = TestApp::new().await;

    let html = body_string(app.get("/").await).await;
    assert!(html.contains("action=\"/api/exercise/new-user\""));
    assert!(html.contains("action=\"/api/exercise/add\""));
    assert!(html.contains("No users yet."));

    let user_id = app.create_user("carol").await;
    let html = body_string(app.get("/").await).await;
    assert!(html.contains("carol"));
    assert!(html.contains(&user_id));
    assert!(!html.contains("No users yet."));
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = TestApp::new().await;
    let resp = app.get("/api/exercise/nothing-here").await;
    assert_error(resp, StatusCode::NOT_FOUND, "not found").await;
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = TestApp::new().await;
    let req = axum::http::Request::builder()
        .uri("/api/exercise/users")
        .header("origin", "https://example.com")
        .body(axum::body::Body::empty())
        .unwrap();
    let resp = app.request(req).await;
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn static_files_are_cached() {
    let app = TestApp::new().await;
    let resp = app.get("/static/style.css").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("cache-control").unwrap(),
        "public, max-age=86400"
    );
}
