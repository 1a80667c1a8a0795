use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use people_api::{router, Store};

fn app() -> (Router, Store) {
    let store = Store::open_in_memory().unwrap();
    store.migrate().unwrap();
    (router(store.clone()), store)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    assert_eq!(
        content_type.as_ref().and_then(|v| v.to_str().ok()),
        Some("application/json"),
        "every response is JSON"
    );

    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn row_count(store: &Store) -> i64 {
    store
        .with_connection(|conn| conn.query_row("SELECT COUNT(*) FROM people", [], |r| r.get(0)))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_then_get_roundtrip() {
    let (app, _) = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/people",
        Some(json!({"name": "Alice", "age": 30})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["name"], "Alice");
    assert_eq!(created["age"], 30);
    let id = created["id"].as_i64().unwrap();
    assert_ne!(id, 0);

    let (status, fetched) = send(&app, Method::GET, &format!("/people/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let (app, _) = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/people",
        Some(json!({"id": 777, "name": "Bob", "age": 25})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(created["id"], 777);

    let (status, _) = send(&app, Method::GET, "/people/777", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_list_empty_is_array() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/people", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_returns_every_created_person() {
    let (app, _) = app();

    for (name, age) in [("Alice", 30), ("Bob", 25), ("Charlie", 35)] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/people",
            Some(json!({"name": name, "age": age})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, Method::GET, "/people", None).await;
    assert_eq!(status, StatusCode::OK);
    let people = body.as_array().unwrap();
    assert_eq!(people.len(), 3);
    assert_eq!(people[0]["name"], "Alice");
    assert_eq!(people[2]["age"], 35);
}

#[tokio::test]
async fn test_get_missing_is_server_error() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/people/99999", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Query returned no rows");
}

#[tokio::test]
async fn test_get_non_numeric_id_is_server_error() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/people/abc", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let (app, _) = app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/people",
        Some(json!({"name": "Alice", "age": 30})),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/people/{id}"),
        Some(json!({"id": 5, "name": "Alicia", "age": 31})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({"id": id, "name": "Alicia", "age": 31}));

    let (_, fetched) = send(&app, Method::GET, &format!("/people/{id}"), None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_missing_echoes_without_inserting() {
    let (app, store) = app();
    send(
        &app,
        Method::POST,
        "/people",
        Some(json!({"name": "Alice", "age": 30})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/people/99999",
        Some(json!({"name": "Ghost", "age": 99})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 99999, "name": "Ghost", "age": 99}));
    assert_eq!(row_count(&store).await, 1);
}

#[tokio::test]
async fn test_update_malformed_body_is_bad_request() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::PUT, "/people/1", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("age"));
}

#[tokio::test]
async fn test_delete_missing_still_ok() {
    let (app, store) = app();
    send(
        &app,
        Method::POST,
        "/people",
        Some(json!({"name": "Alice", "age": 30})),
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, "/people/99999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Person 99999 deleted"}));
    assert_eq!(row_count(&store).await, 1);
}

#[tokio::test]
async fn test_delete_twice_same_message() {
    let (app, store) = app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/people",
        Some(json!({"name": "Alice", "age": 30})),
    )
    .await;
    let uri = format!("/people/{}", created["id"]);

    let (first_status, first) = send(&app, Method::DELETE, &uri, None).await;
    let (second_status, second) = send(&app, Method::DELETE, &uri, None).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(row_count(&store).await, 0);
}

#[tokio::test]
async fn test_create_missing_field_is_bad_request() {
    let (app, store) = app();

    let (status, body) = send(&app, Method::POST, "/people", Some(json!({"age": 30}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
    assert_eq!(row_count(&store).await, 0);
}

#[tokio::test]
async fn test_create_wrong_type_is_bad_request() {
    let (app, _) = app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/people",
        Some(json!({"name": "Alice", "age": "thirty"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_invalid_json_without_content_type() {
    let (app, _) = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/people")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
    let store = Store::open_in_memory().unwrap();
    let app = router(store);

    let (status, body) = send(&app, Method::GET, "/people", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("people"));
}

#[tokio::test]
async fn test_file_backed_store_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.db");

    {
        let store = Store::open(&path).unwrap();
        store.migrate().unwrap();
        let app = router(store);
        let (status, _) = send(
            &app,
            Method::POST,
            "/people",
            Some(json!({"name": "Alice", "age": 30})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let store = Store::open(&path).unwrap();
    assert!(store.migrate().unwrap().is_empty());
    let (_, body) = send(&router(store), Method::GET, "/people", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_undecodable_path_id_reaches_store() {
    let (app, store) = app();
    send(
        &app,
        Method::POST,
        "/people",
        Some(json!({"name": "Alice", "age": 30})),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/people/%FF", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Query returned no rows");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/people/%FF",
        Some(json!({"name": "Ghost", "age": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 0, "name": "Ghost", "age": 1}));

    let (status, body) = send(&app, Method::DELETE, "/people/%FF", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Person \u{FFFD} deleted"}));
    assert_eq!(row_count(&store).await, 1);
}

#[tokio::test]
async fn test_oversized_body_keeps_payload_too_large() {
    let (app, store) = app();
    let name = "x".repeat(3 * 1024 * 1024);

    let (status, body) = send(
        &app,
        Method::POST,
        "/people",
        Some(json!({"name": name, "age": 30})),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());
    assert_eq!(row_count(&store).await, 0);
}
