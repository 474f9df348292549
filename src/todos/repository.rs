//! Repository seam over the two todo paths
//!
//! The original client grew two parallel todo-management paths: an
//! optimistic in-memory one and an API-backed one. Here both sit behind a
//! single trait, selected at composition time by configuration, so the
//! command layer never knows which path it is driving.

use crate::config::Config;
use crate::error::{Result, TaskoraError};
use crate::notify::Notice;
use crate::todos::model::{validate_draft, Task, TaskDraft};
use crate::todos::service::TodoService;
use crate::todos::store::TodoStore;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::RwLock;

/// Uniform contract over a user's task collection
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All tasks, newest first
    async fn list(&self) -> Result<Vec<Task>>;

    /// Task by identifier
    async fn get(&self, id: &str) -> Result<Task>;

    /// Create a task from a draft
    async fn create(&self, draft: TaskDraft) -> Result<Task>;

    /// Replace a task in full
    async fn update(&self, task: Task) -> Result<Task>;

    /// Delete a task
    async fn remove(&self, id: &str) -> Result<()>;

    /// Flip a task's completion flag
    async fn toggle(&self, id: &str) -> Result<Task>;

    /// Mark every incomplete task completed; sequential, no rollback
    async fn complete_all(&self) -> Result<Vec<Task>>;
}

/// In-memory repository wrapping the todo state container
///
/// An optional artificial latency simulates network round trips so this
/// path exercises the same suspension points as the remote one.
pub struct MemoryRepository {
    store: RwLock<TodoStore>,
    latency: Duration,
}

impl MemoryRepository {
    /// Create an empty in-memory repository
    pub fn new(store: TodoStore) -> Self {
        Self {
            store: RwLock::new(store),
            latency: Duration::ZERO,
        }
    }

    /// Set the simulated per-operation latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Drain the container's accumulated notices for rendering
    pub async fn drain_notices(&self) -> Vec<Notice> {
        let mut store = self.store.write().await;
        let drained = store
            .notices()
            .active()
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        store.notices_mut().drain_expired();
        for notice in &drained {
            store.notices_mut().dismiss(notice.id);
        }
        drained
    }
}

#[async_trait]
impl TodoRepository for MemoryRepository {
    async fn list(&self) -> Result<Vec<Task>> {
        self.simulate_latency().await;
        Ok(self.store.read().await.tasks().to_vec())
    }

    async fn get(&self, id: &str) -> Result<Task> {
        self.simulate_latency().await;
        self.store
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| TaskoraError::TaskNotFound(id.to_string()).into())
    }

    async fn create(&self, draft: TaskDraft) -> Result<Task> {
        self.simulate_latency().await;

        let errors = validate_draft(&draft);
        if let Some(message) = errors.values().next() {
            return Err(TaskoraError::Repository(message.clone()).into());
        }

        let mut store = self.store.write().await;
        let id = store
            .add(draft)
            .ok_or_else(|| TaskoraError::Repository("Task was rejected".to_string()))?;
        store
            .get(&id)
            .cloned()
            .ok_or_else(|| TaskoraError::TaskNotFound(id).into())
    }

    async fn update(&self, task: Task) -> Result<Task> {
        self.simulate_latency().await;

        let id = task.id.clone();
        let mut store = self.store.write().await;
        if store.get(&id).is_none() {
            return Err(TaskoraError::TaskNotFound(id).into());
        }
        if !store.update(task) {
            let message = format!("Task {} failed validation", id);
            return Err(TaskoraError::Repository(message).into());
        }
        store
            .get(&id)
            .cloned()
            .ok_or_else(|| TaskoraError::TaskNotFound(id).into())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.simulate_latency().await;
        // Container semantics: deleting an unknown id is a silent no-op
        self.store.write().await.remove(id);
        Ok(())
    }

    async fn toggle(&self, id: &str) -> Result<Task> {
        self.simulate_latency().await;
        let mut store = self.store.write().await;
        store
            .toggle(id)
            .ok_or_else(|| TaskoraError::TaskNotFound(id.to_string()))?;
        store
            .get(id)
            .cloned()
            .ok_or_else(|| TaskoraError::TaskNotFound(id.to_string()).into())
    }

    async fn complete_all(&self) -> Result<Vec<Task>> {
        self.simulate_latency().await;
        let mut store = self.store.write().await;

        let pending: Vec<Task> = store
            .tasks()
            .iter()
            .filter(|t| !t.completed)
            .cloned()
            .collect();

        let mut completed = Vec::new();
        for mut task in pending {
            task.completed = true;
            let id = task.id.clone();
            store.update(task);
            if let Some(task) = store.get(&id).cloned() {
                completed.push(task);
            }
        }
        Ok(completed)
    }
}

/// Remote repository delegating to the todo domain service
pub struct RemoteRepository {
    service: TodoService,
    user_id: String,
}

impl RemoteRepository {
    /// Create a repository bound to one user's resource path
    pub fn new(service: TodoService, user_id: impl Into<String>) -> Self {
        Self {
            service,
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl TodoRepository for RemoteRepository {
    async fn list(&self) -> Result<Vec<Task>> {
        self.service.list(&self.user_id).await
    }

    async fn get(&self, id: &str) -> Result<Task> {
        self.service.get(&self.user_id, id).await
    }

    async fn create(&self, draft: TaskDraft) -> Result<Task> {
        self.service.create(&self.user_id, &draft).await
    }

    async fn update(&self, task: Task) -> Result<Task> {
        self.service.update(&self.user_id, &task).await
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.service.remove(&self.user_id, id).await
    }

    async fn toggle(&self, id: &str) -> Result<Task> {
        self.service.toggle(&self.user_id, id).await
    }

    async fn complete_all(&self) -> Result<Vec<Task>> {
        self.service.complete_all(&self.user_id).await
    }
}

/// Create a repository instance based on configuration
///
/// # Arguments
///
/// * `config` - Full configuration; `repository.kind` selects the path
/// * `api` - API client used by the remote repository
/// * `user_id` - Owning user for the remote resource path
/// * `seed` - Initial tasks for the in-memory path (ignored by remote)
///
/// # Errors
///
/// Returns error if the repository kind is unknown, or if the remote
/// kind is requested without a user identifier
pub fn create_repository(
    config: &Config,
    api: std::sync::Arc<crate::api::ApiClient>,
    user_id: Option<&str>,
    seed: Vec<Task>,
) -> Result<Box<dyn TodoRepository>> {
    match config.repository.kind.as_str() {
        "memory" => {
            let store = TodoStore::with_tasks(crate::notify::NoticeCenter::new(), seed);
            let repo = MemoryRepository::new(store)
                .with_latency(Duration::from_millis(config.repository.mock_latency_ms));
            Ok(Box::new(repo))
        }
        "remote" => {
            let user_id = user_id.ok_or_else(|| {
                TaskoraError::Session("The remote repository requires a logged-in user".into())
            })?;
            Ok(Box::new(RemoteRepository::new(
                TodoService::new(api),
                user_id,
            )))
        }
        other => Err(TaskoraError::Repository(format!(
            "Unknown repository kind: {}",
            other
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todos::model::Priority;

    fn memory_repo() -> MemoryRepository {
        MemoryRepository::new(TodoStore::default())
    }

    #[tokio::test]
    async fn test_create_then_list_newest_first() {
        let repo = memory_repo();
        repo.create(TaskDraft::titled("older")).await.unwrap();
        let newer = repo.create(TaskDraft::titled("newer")).await.unwrap();

        let tasks = repo.list().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, newer.id);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let repo = memory_repo();
        let err = repo.create(TaskDraft::titled("  ")).await.unwrap_err();
        assert!(err.to_string().contains("Title is required"));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_unknown_id_errors() {
        let repo = memory_repo();
        let err = repo.get("missing").await.unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn test_toggle_round_trip() {
        let repo = memory_repo();
        let task = repo.create(TaskDraft::titled("flip")).await.unwrap();

        let on = repo.toggle(&task.id).await.unwrap();
        assert!(on.completed);
        let off = repo.toggle(&task.id).await.unwrap();
        assert!(!off.completed);
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_silent() {
        let repo = memory_repo();
        repo.create(TaskDraft::titled("keep")).await.unwrap();
        repo.remove("ghost").await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_complete_all_completes_only_pending() {
        let repo = memory_repo();
        let a = repo.create(TaskDraft::titled("a")).await.unwrap();
        let b = repo
            .create(TaskDraft {
                title: "b".to_string(),
                priority: Priority::High,
                ..Default::default()
            })
            .await
            .unwrap();
        repo.toggle(&a.id).await.unwrap();

        let completed = repo.complete_all().await.unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, b.id);

        let tasks = repo.list().await.unwrap();
        assert!(tasks.iter().all(|t| t.completed));
    }

    #[tokio::test]
    async fn test_update_preserves_position() {
        let repo = memory_repo();
        let first = repo.create(TaskDraft::titled("first")).await.unwrap();
        let second = repo.create(TaskDraft::titled("second")).await.unwrap();

        let mut edited = first.clone();
        edited.title = "first, renamed".to_string();
        repo.update(edited).await.unwrap();

        let tasks = repo.list().await.unwrap();
        assert_eq!(tasks[0].id, second.id);
        assert_eq!(tasks[1].title, "first, renamed");
    }

    fn factory_fixtures() -> (tempfile::TempDir, Config, std::sync::Arc<crate::api::ApiClient>) {
        let dir = tempfile::TempDir::new().unwrap();
        let sessions = std::sync::Arc::new(crate::session::SessionStore::new(
            crate::storage::LocalStore::with_dir(dir.path()).unwrap(),
        ));
        let config = Config::default();
        let api = std::sync::Arc::new(crate::api::ApiClient::new(&config.api, sessions).unwrap());
        (dir, config, api)
    }

    #[tokio::test]
    async fn test_factory_builds_seeded_memory_repository() {
        let (_dir, config, api) = factory_fixtures();
        let seed = vec![Task::from_draft(
            TaskDraft::titled("seeded"),
            "seed-1".to_string(),
        )];

        let repo = create_repository(&config, api, None, seed).unwrap();
        let tasks = repo.list().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "seeded");
    }

    #[test]
    fn test_factory_remote_requires_user() {
        let (_dir, mut config, api) = factory_fixtures();
        config.repository.kind = "remote".to_string();

        assert!(create_repository(&config, api.clone(), None, Vec::new()).is_err());
        assert!(create_repository(&config, api, Some("u1"), Vec::new()).is_ok());
    }

    #[test]
    fn test_factory_rejects_unknown_kind() {
        let (_dir, mut config, api) = factory_fixtures();
        config.repository.kind = "carrier-pigeon".to_string();
        assert!(create_repository(&config, api, None, Vec::new()).is_err());
    }

    #[tokio::test]
    async fn test_drain_notices_reports_mutations() {
        let repo = memory_repo();
        repo.create(TaskDraft::titled("observable")).await.unwrap();

        let notices = repo.drain_notices().await;
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Task created successfully!");

        // Draining is destructive
        assert!(repo.drain_notices().await.is_empty());
    }
}
