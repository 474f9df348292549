//! Todo domain service
//!
//! One function per remote operation, each scoped by user identifier and
//! delegating to the API gateway wrapper. Every function logs failures
//! and re-throws them unchanged; there are no retries here.

use crate::api::ApiClient;
use crate::error::Result;
use crate::todos::model::{Task, TaskDraft};
use std::sync::Arc;

/// Remote CRUD operations over the per-user todos resource
pub struct TodoService {
    api: Arc<ApiClient>,
}

impl TodoService {
    /// Create a service over the given API client
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    fn todos_path(user_id: &str) -> String {
        format!("/api/{}/todos", user_id)
    }

    fn todo_path(user_id: &str, todo_id: &str) -> String {
        format!("/api/{}/todos/{}", user_id, todo_id)
    }

    /// Fetch all tasks for a user
    pub async fn list(&self, user_id: &str) -> Result<Vec<Task>> {
        self.api
            .get(&Self::todos_path(user_id), None)
            .await
            .map_err(|e| {
                tracing::error!("Error fetching todos: {}", e);
                e
            })
    }

    /// Fetch a specific task
    pub async fn get(&self, user_id: &str, todo_id: &str) -> Result<Task> {
        self.api
            .get(&Self::todo_path(user_id, todo_id), None)
            .await
            .map_err(|e| {
                tracing::error!("Error fetching todo {}: {}", todo_id, e);
                e
            })
    }

    /// Create a new task from a draft
    pub async fn create(&self, user_id: &str, draft: &TaskDraft) -> Result<Task> {
        self.api
            .post(&Self::todos_path(user_id), Some(draft))
            .await
            .map_err(|e| {
                tracing::error!("Error creating todo: {}", e);
                e
            })
    }

    /// Update an existing task in full
    pub async fn update(&self, user_id: &str, task: &Task) -> Result<Task> {
        self.api
            .put(&Self::todo_path(user_id, &task.id), Some(task))
            .await
            .map_err(|e| {
                tracing::error!("Error updating todo {}: {}", task.id, e);
                e
            })
    }

    /// Delete a task
    pub async fn remove(&self, user_id: &str, todo_id: &str) -> Result<()> {
        self.api
            .delete(&Self::todo_path(user_id, todo_id))
            .await
            .map(|_| ())
            .map_err(|e| {
                tracing::error!("Error deleting todo {}: {}", todo_id, e);
                e
            })
    }

    /// Toggle a task's completion flag server-side
    pub async fn toggle(&self, user_id: &str, todo_id: &str) -> Result<Task> {
        self.api
            .patch::<Task, ()>(
                &format!("{}/complete", Self::todo_path(user_id, todo_id)),
                None,
            )
            .await
            .map_err(|e| {
                tracing::error!("Error toggling completion for todo {}: {}", todo_id, e);
                e
            })
    }

    /// Mark every incomplete task completed
    ///
    /// There is no bulk endpoint: this fetches the collection, then issues
    /// one update per incomplete task, in order. The first failing update
    /// aborts the remaining batch and propagates; tasks already updated
    /// stay updated (no rollback).
    pub async fn complete_all(&self, user_id: &str) -> Result<Vec<Task>> {
        let todos = self.list(user_id).await?;
        let mut completed = Vec::new();

        for todo in todos {
            if todo.completed {
                continue;
            }
            let mut update = todo;
            update.completed = true;
            let updated = self.update(user_id, &update).await.map_err(|e| {
                tracing::error!("Error marking all todos as completed: {}", e);
                e
            })?;
            completed.push(updated);
        }

        Ok(completed)
    }
}
