//! End-to-end widget lifecycle against the in-memory store, covering the
//! version and ETag handshake.

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::{TestResponse, TestServer};
use serde_json::{Value, json};
use widget_rest_api::middleware::create_cors_layer;
use widget_rest_api::models::Widget;
use widget_rest_api::routes::{create_app, create_app_state};

fn create_test_server() -> TestServer {
    let app_state = create_app_state();
    TestServer::new(create_app(app_state, create_cors_layer(&[]))).unwrap()
}

fn etag(response: &TestResponse) -> String {
    response
        .headers()
        .get(header::ETAG)
        .expect("ETag header")
        .to_str()
        .unwrap()
        .to_string()
}

async fn create_widget(server: &TestServer, name: &str) -> Widget {
    let response = server
        .post("/widget")
        .json(&json!({"name": name, "description": "Created in test"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let server = create_test_server();

    let first = create_widget(&server, "First").await;
    let second = create_widget(&server, "Second").await;

    assert_eq!(first.id, Some(1));
    assert_eq!(first.version, 1);
    assert_eq!(second.id, Some(2));
    assert_eq!(second.version, 1);

    let response = server.get("/widgets").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let widgets: Vec<Widget> = response.json();
    assert_eq!(widgets, vec![first, second]);
}

#[tokio::test]
async fn test_new_widget_matches_expected_headers() {
    let server = create_test_server();

    let response = server
        .post("/widget")
        .json(&json!({"name": "New Widget", "description": "This is my widget"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap().to_str().unwrap(),
        "/widget/1"
    );
    assert_eq!(etag(&response), "\"1\"");

    let body: Value = response.json();
    assert_eq!(
        body,
        json!({"id": 1, "name": "New Widget", "description": "This is my widget", "version": 1})
    );
}

#[tokio::test]
async fn test_update_bumps_version_and_etag() {
    let server = create_test_server();
    let created = create_widget(&server, "Widget").await;

    let fetched = server.get("/widget/1").await;
    let tag = etag(&fetched);
    assert_eq!(tag, "\"1\"");

    // The ETag from a GET can be echoed back verbatim
    let response = server
        .put("/widget/1")
        .add_header(header::IF_MATCH, HeaderValue::from_str(&tag).unwrap())
        .json(&json!({"name": "Widget Update", "description": created.description}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(etag(&response), "\"2\"");
    let updated: Widget = response.json();
    assert_eq!(updated.id, Some(1));
    assert_eq!(updated.name, "Widget Update");
    assert_eq!(updated.version, 2);

    let fetched: Widget = server.get("/widget/1").await.json();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_stale_if_match_is_rejected() {
    let server = create_test_server();
    create_widget(&server, "Widget").await;

    let first = server
        .put("/widget/1")
        .add_header(header::IF_MATCH, HeaderValue::from_static("1"))
        .json(&json!({"name": "First writer"}))
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);

    // A second client still holding version 1 loses
    let second = server
        .put("/widget/1")
        .add_header(header::IF_MATCH, HeaderValue::from_static("1"))
        .json(&json!({"name": "Second writer"}))
        .await;
    assert_eq!(second.status_code(), StatusCode::PRECONDITION_FAILED);

    let current: Widget = server.get("/widget/1").await.json();
    assert_eq!(current.name, "First writer");
    assert_eq!(current.version, 2);
}

#[tokio::test]
async fn test_wildcard_if_match() {
    let server = create_test_server();
    create_widget(&server, "Widget").await;

    let response = server
        .put("/widget/1")
        .add_header(header::IF_MATCH, HeaderValue::from_static("*"))
        .json(&json!({"name": "Anything goes"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(etag(&response), "\"2\"");
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let server = create_test_server();

    let response = server.post("/widget").json(&json!({"name": "   "})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    create_widget(&server, "Widget").await;
    let response = server
        .put("/widget/1")
        .add_header(header::IF_MATCH, HeaderValue::from_static("1"))
        .json(&json!({"name": ""}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let server = create_test_server();

    let response = server
        .post("/widget")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_delete_widget() {
    let server = create_test_server();
    create_widget(&server, "Widget").await;

    let response = server.delete("/widget/1").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server.get("/widget/1").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server.delete("/widget/1").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let server = create_test_server();
    create_widget(&server, "First").await;
    server.delete("/widget/1").await;

    let second = create_widget(&server, "Second").await;
    assert_eq!(second.id, Some(2));
}
