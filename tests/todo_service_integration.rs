use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskora::api::ApiClient;
use taskora::config::ApiConfig;
use taskora::error::TaskoraError;
use taskora::session::{SessionStore, UserSession};
use taskora::storage::LocalStore;
use taskora::todos::{Priority, TaskDraft, TodoService};

fn service(base_url: &str) -> (TempDir, TodoService) {
    let dir = TempDir::new().unwrap();
    let sessions = Arc::new(SessionStore::new(
        LocalStore::with_dir(dir.path()).unwrap(),
    ));
    sessions.save(&UserSession {
        id: "u1".to_string(),
        email: "ada@example.com".to_string(),
        name: "ada".to_string(),
        authenticated: true,
        token: "tok_live".to_string(),
        expires_at: Utc::now() + Duration::hours(1),
    });

    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    };
    let api = Arc::new(ApiClient::new(&config, sessions).unwrap());
    (dir, TodoService::new(api))
}

fn task_body(id: &str, title: &str, completed: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "completed": completed,
        "priority": "medium",
        "created_at": "2026-01-05T10:00:00Z"
    })
}

#[tokio::test]
async fn test_list_returns_tasks() {
    let server = MockServer::start().await;
    let (_dir, service) = service(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/u1/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_body("t1", "first", false),
            task_body("t2", "second", true),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let tasks = service.list("u1").await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, "t1");
    assert!(tasks[1].completed);
}

#[tokio::test]
async fn test_create_posts_draft() {
    let server = MockServer::start().await;
    let (_dir, service) = service(&server.uri());

    Mock::given(method("POST"))
        .and(path("/api/u1/todos"))
        .and(body_partial_json(json!({"title": "Buy milk", "priority": "low"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_body("t9", "Buy milk", false)))
        .expect(1)
        .mount(&server)
        .await;

    let draft = TaskDraft {
        title: "Buy milk".to_string(),
        priority: Priority::Low,
        ..Default::default()
    };
    let created = service.create("u1", &draft).await.unwrap();
    assert_eq!(created.id, "t9");
    assert!(!created.completed);
}

#[tokio::test]
async fn test_toggle_patches_complete_endpoint() {
    let server = MockServer::start().await;
    let (_dir, service) = service(&server.uri());

    Mock::given(method("PATCH"))
        .and(path("/api/u1/todos/t1/complete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_body("t1", "first", true)))
        .expect(1)
        .mount(&server)
        .await;

    let toggled = service.toggle("u1", "t1").await.unwrap();
    assert!(toggled.completed);
}

#[tokio::test]
async fn test_remove_deletes_task() {
    let server = MockServer::start().await;
    let (_dir, service) = service(&server.uri());

    Mock::given(method("DELETE"))
        .and(path("/api/u1/todos/t1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    service.remove("u1", "t1").await.unwrap();
}

#[tokio::test]
async fn test_get_missing_task_propagates_404() {
    let server = MockServer::start().await;
    let (_dir, service) = service(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/u1/todos/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = service.get("u1", "ghost").await.unwrap_err();
    match err.downcast_ref::<TaskoraError>() {
        Some(TaskoraError::Api { status, .. }) => assert_eq!(*status, 404),
        other => panic!("Expected Api error, got {:?}", other),
    }
}

/// complete_all updates incomplete tasks sequentially; a failure mid-batch
/// aborts the rest and propagates, leaving earlier updates in place
#[tokio::test]
async fn test_complete_all_aborts_on_first_failure() {
    let server = MockServer::start().await;
    let (_dir, service) = service(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/u1/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_body("t1", "first", false),
            task_body("t2", "second", false),
            task_body("t3", "third", false),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    // First update succeeds
    Mock::given(method("PUT"))
        .and(path("/api/u1/todos/t1"))
        .and(body_partial_json(json!({"completed": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_body("t1", "first", true)))
        .expect(1)
        .mount(&server)
        .await;

    // Second update fails
    Mock::given(method("PUT"))
        .and(path("/api/u1/todos/t2"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "write failed"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Third update must never be attempted
    Mock::given(method("PUT"))
        .and(path("/api/u1/todos/t3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_body("t3", "third", true)))
        .expect(0)
        .mount(&server)
        .await;

    let err = service.complete_all("u1").await.unwrap_err();
    match err.downcast_ref::<TaskoraError>() {
        Some(TaskoraError::Api {
            status, message, ..
        }) => {
            assert_eq!(*status, 500);
            assert_eq!(message, "write failed");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

/// complete_all skips tasks that are already completed
#[tokio::test]
async fn test_complete_all_skips_completed_tasks() {
    let server = MockServer::start().await;
    let (_dir, service) = service(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/u1/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_body("t1", "done already", true),
            task_body("t2", "pending", false),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/u1/todos/t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_body("t2", "pending", true)))
        .expect(1)
        .mount(&server)
        .await;

    // No update for the already-completed task
    Mock::given(method("PUT"))
        .and(path("/api/u1/todos/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_body("t1", "done already", true)))
        .expect(0)
        .mount(&server)
        .await;

    let completed = service.complete_all("u1").await.unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, "t2");
}
