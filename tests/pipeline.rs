use crate::common::{create_pipeline, TIMEZONE};
use api_pipeline::{ClientConfig, MemoryCredentialStore, RequestOptions, RequestPipeline};
use httpmock::MockServer;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

mod common;

#[derive(Deserialize, Debug, PartialEq)]
struct Session {
    user_id: u64,
}

#[tokio::test]
async fn get_sends_pipeline_headers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/me")
                .header("content-type", "application/json")
                .header("x-timezone", TIMEZONE)
                .header("authorization", "Bearer abc");
            then.status(200)
                .json_body(json!({"variant": "ok", "myData": {"id": 1}}));
        })
        .await;

    let pipeline = create_pipeline(&server, MemoryCredentialStore::with_token("abc"));
    let value: Value = pipeline.get("/me", None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(json!({"id": 1}), value);
}

#[tokio::test]
async fn get_without_token_is_unauthenticated() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/public")
                .matches(|req| {
                    req.headers.as_ref().map_or(true, |headers| {
                        !headers
                            .iter()
                            .any(|(name, _)| name.eq_ignore_ascii_case("authorization"))
                    })
                });
            then.status(200).json_body(json!({"open": true}));
        })
        .await;

    let pipeline = create_pipeline(&server, MemoryCredentialStore::new());
    let value: Value = pipeline.get("/public", None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(json!({"open": true}), value);
}

#[tokio::test]
async fn post_unwraps_envelope() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/sessions")
                .json_body(json!({"email": "a@b.c", "password": "pw"}));
            then.status(201)
                .json_body(json!({"variant": "created", "myData": {"user_id": 42}}));
        })
        .await;

    let pipeline = create_pipeline(&server, MemoryCredentialStore::new());
    let session: Session = pipeline
        .post(
            "/sessions",
            Some(json!({"email": "a@b.c", "password": "pw"})),
            None,
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(Session { user_id: 42 }, session);
}

#[tokio::test]
async fn per_call_options_reach_the_server() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/items")
                .query_param("page", "2")
                .header("accept-language", "de");
            then.status(200).json_body(json!([]));
        })
        .await;

    let pipeline = create_pipeline(&server, MemoryCredentialStore::new());
    let options = RequestOptions::new()
        .header("Accept-Language", "de")
        .query("page", "2");
    let items: Vec<Value> = pipeline.get("/items", Some(options)).await.unwrap();

    mock.assert_async().await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn server_message_becomes_the_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/sessions");
            then.status(401)
                .json_body(json!({"message": "Invalid credentials", "code": "AUTH_001"}));
        })
        .await;

    let pipeline = create_pipeline(&server, MemoryCredentialStore::new());
    let error = pipeline
        .post::<Value>("/sessions", Some(json!({})), None)
        .await
        .unwrap_err();

    assert_eq!("Invalid credentials", error.message());
}

#[tokio::test]
async fn status_without_message_reports_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/broken");
            then.status(503);
        })
        .await;

    let pipeline = create_pipeline(&server, MemoryCredentialStore::new());
    let error = pipeline.get::<Value>("/broken", None).await.unwrap_err();

    assert_eq!("Request failed with status code 503", error.message());
}

#[tokio::test]
async fn empty_success_body_deserializes_to_unit() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::POST).path("/logout");
            then.status(204);
        })
        .await;

    let pipeline = create_pipeline(&server, MemoryCredentialStore::with_token("abc"));
    pipeline.post::<()>("/logout", None, None).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn colon_in_path_is_joined_to_base_url() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::GET).path("/users:search");
            then.status(200).json_body(json!({"variant": "ok", "myData": []}));
        })
        .await;

    let pipeline = create_pipeline(&server, MemoryCredentialStore::new());
    let users: Vec<Value> = pipeline.get("users:search", None).await.unwrap();

    mock.assert_async().await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn timeout_is_reported_with_transport_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/slow");
            then.status(200).delay(Duration::from_millis(500));
        })
        .await;

    let config = ClientConfig::new(&server.base_url()).with_timeout(Duration::from_millis(50));
    let pipeline =
        RequestPipeline::create(&config, Arc::new(MemoryCredentialStore::new())).unwrap();
    let error = pipeline.get::<Value>("/slow", None).await.unwrap_err();

    assert!(!error.message().is_empty());
    assert_ne!("Network error", error.message());
}
