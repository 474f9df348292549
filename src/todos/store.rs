//! In-memory todo state container
//!
//! Holds the working collection for a single run, newest first. Mutations
//! validate first and report failures through the notice center rather
//! than returning errors, so input handling never has to unwind.

use crate::notify::NoticeCenter;
use crate::todos::model::{generate_id, validate_draft, Task, TaskDraft};
use std::collections::HashSet;

/// Ordered in-memory collection of tasks with mutation notices
///
/// # Examples
///
/// ```
/// use taskora::notify::NoticeCenter;
/// use taskora::todos::{TaskDraft, TodoStore};
///
/// let mut store = TodoStore::new(NoticeCenter::new());
/// let id = store.add(TaskDraft::titled("Buy milk")).unwrap();
/// assert_eq!(store.len(), 1);
/// assert!(store.get(&id).is_some());
/// ```
pub struct TodoStore {
    tasks: Vec<Task>,
    issued_ids: HashSet<String>,
    notices: NoticeCenter,
}

impl TodoStore {
    /// Create an empty store reporting through the given notice center
    pub fn new(notices: NoticeCenter) -> Self {
        Self {
            tasks: Vec::new(),
            issued_ids: HashSet::new(),
            notices,
        }
    }

    /// Create a store pre-populated with tasks (newest first)
    pub fn with_tasks(notices: NoticeCenter, tasks: Vec<Task>) -> Self {
        let issued_ids = tasks.iter().map(|t| t.id.clone()).collect();
        Self {
            tasks,
            issued_ids,
            notices,
        }
    }

    /// Add a task from a draft
    ///
    /// Validation failure pushes an error notice and leaves the
    /// collection untouched; no identifier is assigned. On success the
    /// task gets a fresh unique identifier and is prepended (newest
    /// first); the new identifier is returned.
    pub fn add(&mut self, draft: TaskDraft) -> Option<String> {
        let errors = validate_draft(&draft);
        if !errors.is_empty() {
            for message in errors.values() {
                self.notices.error(message.clone());
            }
            return None;
        }

        let id = self.fresh_id();
        let task = Task::from_draft(draft, id.clone());
        self.tasks.insert(0, task);

        self.notices.success("Task created successfully!");
        Some(id)
    }

    /// Replace the task with a matching identifier, keeping its position
    ///
    /// Validation failure pushes an error notice and mutates nothing.
    /// Unknown identifiers are a silent no-op; returns whether a task was
    /// replaced.
    pub fn update(&mut self, task: Task) -> bool {
        let draft = TaskDraft {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            due_date: task.due_date,
            category: task.category.clone(),
            tags: task.tags.clone(),
            subtasks: task.subtasks.clone(),
        };
        let errors = validate_draft(&draft);
        if !errors.is_empty() {
            for message in errors.values() {
                self.notices.error(message.clone());
            }
            return false;
        }

        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                self.notices.info("Task updated successfully!");
                true
            }
            None => false,
        }
    }

    /// Flip the completed flag of the task with a matching identifier
    ///
    /// Returns the new completed state, or `None` when the identifier is
    /// unknown (a no-op).
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;

        let (title, completed) = (task.title.clone(), task.completed);
        if completed {
            self.notices.success(format!("Completed task: {}", title));
        } else {
            self.notices.info(format!("Reopened task: {}", title));
        }
        Some(completed)
    }

    /// Remove the task with a matching identifier
    ///
    /// Unknown identifiers leave the collection unchanged; returns
    /// whether a task was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        let removed_title = self
            .tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.title.clone());
        self.tasks.retain(|t| t.id != id);

        if let Some(title) = removed_title {
            self.notices.error(format!("Deleted task: {}", title));
        }
        self.tasks.len() != before
    }

    /// Tasks in display order (newest first)
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Task by identifier
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Number of tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The notice side channel
    pub fn notices(&self) -> &NoticeCenter {
        &self.notices
    }

    /// Mutable access to the notice side channel (dismissal, draining)
    pub fn notices_mut(&mut self) -> &mut NoticeCenter {
        &mut self.notices
    }

    /// Generate an identifier never issued by this store, even for
    /// identifiers whose task has since been deleted
    fn fresh_id(&mut self) -> String {
        loop {
            let id = generate_id();
            if self.issued_ids.insert(id.clone()) {
                return id;
            }
        }
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new(NoticeCenter::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;
    use crate::todos::model::Priority;

    #[test]
    fn test_add_prepends_incomplete_task() {
        let mut store = TodoStore::default();
        store.add(TaskDraft::titled("first")).unwrap();

        let draft = TaskDraft {
            title: "Buy milk".to_string(),
            priority: Priority::Low,
            ..Default::default()
        };
        let before = store.len();
        let id = store.add(draft).unwrap();

        assert_eq!(store.len(), before + 1);
        let newest = &store.tasks()[0];
        assert_eq!(newest.id, id);
        assert_eq!(newest.title, "Buy milk");
        assert_eq!(newest.priority, Priority::Low);
        assert!(!newest.completed);
    }

    #[test]
    fn test_add_empty_title_mutates_nothing() {
        let mut store = TodoStore::default();
        assert!(store.add(TaskDraft::titled("   ")).is_none());
        assert!(store.is_empty());

        // The failure is observable through the notice side channel
        let active = store.notices().active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].severity, Severity::Error);
        assert_eq!(active[0].message, "Title is required");
    }

    #[test]
    fn test_add_issues_unique_ids_even_after_delete() {
        let mut store = TodoStore::default();
        let mut seen = std::collections::HashSet::new();
        for i in 0..50 {
            let id = store.add(TaskDraft::titled(format!("task {}", i))).unwrap();
            assert!(seen.insert(id.clone()));
            if i % 2 == 0 {
                store.remove(&id);
            }
        }
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        let mut store = TodoStore::default();
        let id = store.add(TaskDraft::titled("flip me")).unwrap();

        assert_eq!(store.toggle(&id), Some(true));
        assert_eq!(store.toggle(&id), Some(false));
        assert!(!store.get(&id).unwrap().completed);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut store = TodoStore::default();
        store.add(TaskDraft::titled("only")).unwrap();
        assert_eq!(store.toggle("nope"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = TodoStore::default();
        store.add(TaskDraft::titled("keep")).unwrap();
        assert!(!store.remove("nope"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut store = TodoStore::default();
        let first = store.add(TaskDraft::titled("one")).unwrap();
        let second = store.add(TaskDraft::titled("two")).unwrap();

        let mut edited = store.get(&first).unwrap().clone();
        edited.title = "one, edited".to_string();
        assert!(store.update(edited));

        // Position unchanged: "two" is still newest
        assert_eq!(store.tasks()[0].id, second);
        assert_eq!(store.tasks()[1].title, "one, edited");
    }

    #[test]
    fn test_update_empty_title_rejected() {
        let mut store = TodoStore::default();
        let id = store.add(TaskDraft::titled("valid")).unwrap();

        let mut edited = store.get(&id).unwrap().clone();
        edited.title = "  ".to_string();
        assert!(!store.update(edited));
        assert_eq!(store.get(&id).unwrap().title, "valid");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = TodoStore::default();
        store.add(TaskDraft::titled("present")).unwrap();

        let ghost = Task::from_draft(TaskDraft::titled("ghost"), "missing-id".to_string());
        assert!(!store.update(ghost));
        assert_eq!(store.len(), 1);
    }
}
