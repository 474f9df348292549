use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskora::api::ApiClient;
use taskora::config::ApiConfig;
use taskora::error::TaskoraError;
use taskora::session::{SessionStore, UserSession};
use taskora::storage::LocalStore;

fn fixtures(base_url: &str) -> (TempDir, Arc<SessionStore>, ApiClient) {
    let dir = TempDir::new().unwrap();
    let sessions = Arc::new(SessionStore::new(
        LocalStore::with_dir(dir.path()).unwrap(),
    ));
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    };
    let api = ApiClient::new(&config, sessions.clone()).unwrap();
    (dir, sessions, api)
}

fn session_expiring_in(minutes: i64) -> UserSession {
    UserSession {
        id: "u1".to_string(),
        email: "ada@example.com".to_string(),
        name: "ada".to_string(),
        authenticated: true,
        token: "tok_live".to_string(),
        expires_at: Utc::now() + Duration::minutes(minutes),
    }
}

/// A 404 with a JSON message body surfaces as an Api error carrying both
#[tokio::test]
async fn test_404_with_message_body() {
    let server = MockServer::start().await;
    let (_dir, _sessions, api) = fixtures(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/u1/todos/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = api
        .get::<serde_json::Value>("/api/u1/todos/missing", None)
        .await
        .unwrap_err();

    match err.downcast_ref::<TaskoraError>() {
        Some(TaskoraError::Api {
            status,
            message,
            payload,
        }) => {
            assert_eq!(*status, 404);
            assert_eq!(message, "not found");
            assert_eq!(payload.as_ref().unwrap()["message"], "not found");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

/// Requests carry the bearer token while the session is live
#[tokio::test]
async fn test_bearer_token_attached_when_authenticated() {
    let server = MockServer::start().await;
    let (_dir, sessions, api) = fixtures(&server.uri());
    sessions.save(&session_expiring_in(60));

    Mock::given(method("GET"))
        .and(path("/api/u1/todos"))
        .and(header("authorization", "Bearer tok_live"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let todos: Vec<serde_json::Value> = api.get("/api/u1/todos", None).await.unwrap();
    assert!(todos.is_empty());
}

/// An expired session yields no token and the request still goes out;
/// reading it evicts the slot
#[tokio::test]
async fn test_expired_session_is_evicted_on_request() {
    let server = MockServer::start().await;
    let (dir, sessions, api) = fixtures(&server.uri());
    sessions.save(&session_expiring_in(-5));

    Mock::given(method("GET"))
        .and(path("/api/u1/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let received: Vec<serde_json::Value> = api.get("/api/u1/todos", None).await.unwrap();
    assert!(received.is_empty());

    // The expired record is gone: no token, and the slot file was removed
    assert_eq!(sessions.token(), None);
    assert!(!dir.path().join("session.json").exists());
}

/// Transport failures with no response surface as Unavailable (status 0)
#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    // Nothing listens on port 1
    let (_dir, _sessions, api) = fixtures("http://127.0.0.1:1");

    let err = api
        .get::<serde_json::Value>("/api/u1/todos", None)
        .await
        .unwrap_err();

    match err.downcast_ref::<TaskoraError>() {
        Some(e @ TaskoraError::Unavailable(_)) => assert_eq!(e.status(), Some(0)),
        other => panic!("Expected Unavailable error, got {:?}", other),
    }
}

/// GET serializes a flat key-value map into the query string
#[tokio::test]
async fn test_get_serializes_query_params() {
    let server = MockServer::start().await;
    let (_dir, _sessions, api) = fixtures(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/u1/todos"))
        .and(query_param("status", "active"))
        .and(query_param("search", "milk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut params = HashMap::new();
    params.insert("status".to_string(), "active".to_string());
    params.insert("search".to_string(), "milk".to_string());

    let todos: Vec<serde_json::Value> = api.get("/api/u1/todos", Some(&params)).await.unwrap();
    assert!(todos.is_empty());
}

/// Empty success bodies come back as JSON null rather than a parse error
#[tokio::test]
async fn test_empty_body_is_null() {
    let server = MockServer::start().await;
    let (_dir, _sessions, api) = fixtures(&server.uri());

    Mock::given(method("DELETE"))
        .and(path("/api/u1/todos/t1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let value = api.delete("/api/u1/todos/t1").await.unwrap();
    assert!(value.is_null());
}

/// Error bodies without a message field still carry status and payload
#[tokio::test]
async fn test_error_without_message_field() {
    let server = MockServer::start().await;
    let (_dir, _sessions, api) = fixtures(&server.uri());

    Mock::given(method("POST"))
        .and(path("/api/u1/todos"))
        .and(header_exists("content-type"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"errors": ["title"]})))
        .expect(1)
        .mount(&server)
        .await;

    let err = api
        .post::<serde_json::Value, serde_json::Value>("/api/u1/todos", Some(&json!({"title": ""})))
        .await
        .unwrap_err();

    match err.downcast_ref::<TaskoraError>() {
        Some(TaskoraError::Api {
            status,
            message,
            payload,
        }) => {
            assert_eq!(*status, 422);
            assert_eq!(message, "HTTP error! status: 422");
            assert!(payload.is_some());
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}
