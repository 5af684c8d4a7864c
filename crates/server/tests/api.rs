//! HTTP-level tests driving the full router without a socket

use axum::body::Body;
use axum::Router;
use http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn setup_app() -> Router {
    let state = quill::ServiceState::from_config(&quill::ServiceConfig::default())
        .await
        .unwrap();
    quill::http_server::router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn register(app: &Router, name: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v0/auth/register",
            json!({
                "email": format!("{name}@example.com"),
                "username": name,
                "password": "password123",
            }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn readyz_reports_ok() {
    let app = setup_app().await;

    let response = app.oneshot(get("/_status/readyz", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_routes_get_the_json_error_envelope() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v0/nope")
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/v0/notes/", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn register_create_and_fetch_a_note() {
    let app = setup_app().await;
    let token = register(&app, "alice").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v0/notes/",
            json!({
                "title": "Draft",
                "content": "hello",
                "tags": ["Work"],
            }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let note_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["tags"], json!(["work"]));

    let response = app
        .clone()
        .oneshot(get(&format!("/api/v0/notes/{note_id}"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["title"], json!("Draft"));
}

#[tokio::test]
async fn other_accounts_see_not_found() {
    let app = setup_app().await;
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v0/notes/",
            json!({"title": "Secret", "content": "mine"}),
            Some(&alice),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let note_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/v0/notes/{note_id}"), Some(&bob)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = setup_app().await;
    register(&app, "alice").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v0/auth/register",
            json!({
                "email": "alice@example.com",
                "username": "alice2",
                "password": "password123",
            }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn search_endpoint_filters_by_query() {
    let app = setup_app().await;
    let token = register(&app, "alice").await;

    for (title, content) in [("Roadmap", "plans"), ("Groceries", "milk")] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v0/notes/",
                json!({"title": title, "content": content}),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(get("/api/v0/notes/search?query=roadmap", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["pagination"]["total"], json!(1));
    assert_eq!(body["data"][0]["title"], json!("Roadmap"));
}
