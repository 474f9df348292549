//! Task data model and validation
//!
//! The canonical task shape carries priority, optional due date and
//! category, a tag set, and ordered subtasks. Form input arrives as a
//! [`TaskDraft`] and is validated by pure functions returning a structured
//! field-to-message map; nothing in this module throws for bad input.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Task priority levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Priority name as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nested unit of work owned by its parent task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    /// Identifier, unique within the parent task
    pub id: String,
    /// Subtask title
    pub title: String,
    /// Completion flag
    pub completed: bool,
}

impl Subtask {
    /// Create an incomplete subtask with a fresh identifier
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            completed: false,
        }
    }
}

/// A user-created unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier, unique within the collection, immutable once assigned
    pub id: String,
    /// Title (non-empty)
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Completion flag
    pub completed: bool,
    /// Priority
    #[serde(default)]
    pub priority: Priority,
    /// Optional due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Optional category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Tags; entries are unique, order carries no meaning
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Ordered subtasks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Subtask>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Materialize a draft into a task with the given identifier
    ///
    /// Sets `completed = false` and `created_at = now`; tags are
    /// deduplicated and subtasks receive fresh identifiers where the
    /// draft left them blank.
    pub fn from_draft(draft: TaskDraft, id: String) -> Self {
        let mut subtasks = draft.subtasks;
        dedupe_subtask_ids(&mut subtasks);

        Self {
            id,
            title: draft.title.trim().to_string(),
            description: draft.description,
            completed: false,
            priority: draft.priority,
            due_date: draft.due_date,
            category: draft.category,
            tags: dedupe_tags(draft.tags),
            subtasks,
            created_at: Utc::now(),
        }
    }
}

/// Form input for creating or editing a task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Title (required, non-empty)
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Priority
    #[serde(default)]
    pub priority: Priority,
    /// Optional due date
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Optional category
    #[serde(default)]
    pub category: Option<String>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Subtasks
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl TaskDraft {
    /// Draft with just a title, everything else defaulted
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Maximum accepted title length
const MAX_TITLE_LEN: usize = 255;

/// Validate a draft, returning a field-to-message error map
///
/// An empty map means the draft is acceptable. Never panics or throws;
/// callers surface the map through the notice side channel.
///
/// # Examples
///
/// ```
/// use taskora::todos::{validate_draft, TaskDraft};
///
/// let errors = validate_draft(&TaskDraft::titled("   "));
/// assert_eq!(errors.get("title").unwrap(), "Title is required");
/// assert!(validate_draft(&TaskDraft::titled("Buy milk")).is_empty());
/// ```
pub fn validate_draft(draft: &TaskDraft) -> BTreeMap<&'static str, String> {
    let mut errors = BTreeMap::new();

    if draft.title.trim().is_empty() {
        errors.insert("title", "Title is required".to_string());
    } else if draft.title.trim().len() > MAX_TITLE_LEN {
        errors.insert(
            "title",
            format!("Title must be at most {} characters", MAX_TITLE_LEN),
        );
    }

    for subtask in &draft.subtasks {
        if subtask.title.trim().is_empty() {
            errors.insert("subtasks", "Subtask titles must not be empty".to_string());
            break;
        }
    }

    errors
}

/// Generate a collection-unique identifier
///
/// Combines the millisecond clock with a random component so two tasks
/// created within the same millisecond still get distinct identifiers.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let salt: u32 = rand::random();
    format!("{}-{:08x}", millis, salt)
}

fn dedupe_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

fn dedupe_subtask_ids(subtasks: &mut [Subtask]) {
    let mut seen = std::collections::HashSet::new();
    for subtask in subtasks.iter_mut() {
        if subtask.id.is_empty() || !seen.insert(subtask.id.clone()) {
            subtask.id = generate_id();
            seen.insert(subtask.id.clone());
        }
    }
}
