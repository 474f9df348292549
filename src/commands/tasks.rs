//! Task commands for Taskora
//!
//! All handlers drive the repository seam, so the same code paths serve
//! the in-memory mock and the remote service. Domain failures become
//! notices; the handler itself only errors on composition problems.

use crate::error::Result;
use crate::notify::NoticeCenter;
use crate::theme::Palette;
use crate::todos::{Priority, Subtask, Task, TaskDraft, TodoRepository};
use chrono::NaiveDate;
use colored::Colorize;
use prettytable::{row, Table};

/// Parse a priority name from the CLI
fn parse_priority(name: &str) -> Option<Priority> {
    match name.to_lowercase().as_str() {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}

/// Sample tasks seeding the in-memory path
///
/// The mock path starts from the same canned collection the original
/// client's dashboard shipped with, so a fresh run has something to show.
pub fn sample_tasks() -> Vec<Task> {
    let learn = Task::from_draft(
        TaskDraft {
            title: "Learn the task service API".to_string(),
            description: "Walk through the per-user todos endpoints".to_string(),
            priority: Priority::Medium,
            category: Some("work".to_string()),
            tags: vec!["learning".to_string(), "api".to_string()],
            subtasks: vec![
                Subtask::new("Read the endpoint list"),
                Subtask::new("Try a request with curl"),
            ],
            ..Default::default()
        },
        crate::todos::generate_id(),
    );

    let mut build = Task::from_draft(
        TaskDraft {
            title: "Build the todo client".to_string(),
            description: "A functional task-management client".to_string(),
            priority: Priority::High,
            category: Some("personal".to_string()),
            tags: vec!["project".to_string()],
            ..Default::default()
        },
        crate::todos::generate_id(),
    );
    build.completed = true;

    let deploy = Task::from_draft(
        TaskDraft {
            title: "Deploy the service".to_string(),
            description: "Ship it to production".to_string(),
            priority: Priority::High,
            due_date: Some(chrono::Utc::now().date_naive() + chrono::Duration::days(7)),
            category: Some("work".to_string()),
            tags: vec!["deployment".to_string(), "production".to_string()],
            ..Default::default()
        },
        crate::todos::generate_id(),
    );

    vec![deploy, build, learn]
}

/// Add a task built from CLI arguments
#[allow(clippy::too_many_arguments)]
pub async fn run_add(
    repo: &dyn TodoRepository,
    palette: &Palette,
    title: String,
    description: String,
    priority: String,
    due: Option<String>,
    category: Option<String>,
    tags: Vec<String>,
    subtasks: Vec<String>,
) -> Result<()> {
    let mut notices = NoticeCenter::new();

    let Some(priority) = parse_priority(&priority) else {
        notices.error(format!("Unknown priority: {}", priority));
        super::render_notices(&notices.snapshot(), palette);
        return Ok(());
    };

    let due_date = match due.as_deref().map(parse_due_date).transpose() {
        Ok(date) => date,
        Err(message) => {
            notices.error(message);
            super::render_notices(&notices.snapshot(), palette);
            return Ok(());
        }
    };

    let draft = TaskDraft {
        title,
        description,
        priority,
        due_date,
        category,
        tags,
        subtasks: subtasks.into_iter().map(Subtask::new).collect(),
    };

    match repo.create(draft).await {
        Ok(task) => {
            notices.success("Task created successfully!");
            println!("{} {}", task.id.color(palette.muted), task.title);
        }
        Err(e) => {
            notices.error(super::user_message(&e));
        }
    }

    super::render_notices(&notices.snapshot(), palette);
    Ok(())
}

fn parse_due_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("Invalid due date (expected YYYY-MM-DD): {}", raw))
}

/// List tasks as a table or JSON
pub async fn run_list(
    repo: &dyn TodoRepository,
    palette: &Palette,
    pending: bool,
    json: bool,
) -> Result<()> {
    let mut notices = NoticeCenter::new();

    let tasks = match repo.list().await {
        Ok(tasks) => tasks,
        Err(e) => {
            notices.error(super::user_message(&e));
            super::render_notices(&notices.snapshot(), palette);
            return Ok(());
        }
    };

    let tasks: Vec<Task> = if pending {
        tasks.into_iter().filter(|t| !t.completed).collect()
    } else {
        tasks
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("{}", "No tasks yet. Add one with `taskora add`.".color(palette.muted));
        return Ok(());
    }

    println!("{}", "My Tasks".color(palette.accent).bold());

    let mut table = Table::new();
    table.add_row(row!["", "ID", "Title", "Priority", "Due", "Tags"]);
    for task in &tasks {
        let mark = if task.completed { "✓" } else { " " };
        let due = task
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(row![
            mark,
            task.id,
            task.title,
            task.priority.as_str(),
            due,
            task.tags.join(", ")
        ]);
    }
    table.printstd();
    Ok(())
}

/// Show one task in full
pub async fn run_show(repo: &dyn TodoRepository, palette: &Palette, id: String) -> Result<()> {
    let mut notices = NoticeCenter::new();

    match repo.get(&id).await {
        Ok(task) => print_task(&task, palette),
        Err(e) => {
            notices.error(super::user_message(&e));
            super::render_notices(&notices.snapshot(), palette);
        }
    }
    Ok(())
}

fn print_task(task: &Task, palette: &Palette) {
    let state = if task.completed { "completed" } else { "pending" };
    println!("{}", task.title.color(palette.emphasis).bold());
    println!("{} {}", "id:".color(palette.muted), task.id);
    println!("{} {}", "state:".color(palette.muted), state);
    println!("{} {}", "priority:".color(palette.muted), task.priority);
    if !task.description.is_empty() {
        println!("{} {}", "description:".color(palette.muted), task.description);
    }
    if let Some(due) = task.due_date {
        println!("{} {}", "due:".color(palette.muted), due);
    }
    if let Some(category) = &task.category {
        println!("{} {}", "category:".color(palette.muted), category);
    }
    if !task.tags.is_empty() {
        println!("{} {}", "tags:".color(palette.muted), task.tags.join(", "));
    }
    for subtask in &task.subtasks {
        let mark = if subtask.completed { "✓" } else { "·" };
        println!("  {} {}", mark.color(palette.accent), subtask.title);
    }
    println!(
        "{} {}",
        "created:".color(palette.muted),
        task.created_at.to_rfc3339()
    );
}

/// Edit fields of an existing task
pub async fn run_edit(
    repo: &dyn TodoRepository,
    palette: &Palette,
    id: String,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
) -> Result<()> {
    let mut notices = NoticeCenter::new();

    let priority = match priority.as_deref().map(parse_priority) {
        Some(None) => {
            notices.error("Unknown priority");
            super::render_notices(&notices.snapshot(), palette);
            return Ok(());
        }
        Some(parsed) => parsed,
        None => None,
    };

    let mut task = match repo.get(&id).await {
        Ok(task) => task,
        Err(e) => {
            notices.error(super::user_message(&e));
            super::render_notices(&notices.snapshot(), palette);
            return Ok(());
        }
    };

    if let Some(title) = title {
        task.title = title;
    }
    if let Some(description) = description {
        task.description = description;
    }
    if let Some(priority) = priority {
        task.priority = priority;
    }

    match repo.update(task).await {
        Ok(_) => {
            notices.info("Task updated successfully!");
        }
        Err(e) => {
            notices.error(super::user_message(&e));
        }
    }

    super::render_notices(&notices.snapshot(), palette);
    Ok(())
}

/// Toggle a task's completion flag
pub async fn run_done(repo: &dyn TodoRepository, palette: &Palette, id: String) -> Result<()> {
    let mut notices = NoticeCenter::new();

    match repo.toggle(&id).await {
        Ok(task) if task.completed => {
            notices.success(format!("Completed task: {}", task.title));
        }
        Ok(task) => {
            notices.info(format!("Reopened task: {}", task.title));
        }
        Err(e) => {
            notices.error(super::user_message(&e));
        }
    }

    super::render_notices(&notices.snapshot(), palette);
    Ok(())
}

/// Delete a task
pub async fn run_rm(repo: &dyn TodoRepository, palette: &Palette, id: String) -> Result<()> {
    let mut notices = NoticeCenter::new();

    match repo.remove(&id).await {
        Ok(()) => {
            notices.error(format!("Deleted task: {}", id));
        }
        Err(e) => {
            notices.error(super::user_message(&e));
        }
    }

    super::render_notices(&notices.snapshot(), palette);
    Ok(())
}

/// Mark every incomplete task completed
pub async fn run_complete_all(repo: &dyn TodoRepository, palette: &Palette) -> Result<()> {
    let mut notices = NoticeCenter::new();

    match repo.complete_all().await {
        Ok(completed) if completed.is_empty() => {
            notices.info("Nothing to complete");
        }
        Ok(completed) => {
            notices.success(format!("Completed {} task(s)", completed.len()));
        }
        Err(e) => {
            notices.error(super::user_message(&e));
        }
    }

    super::render_notices(&notices.snapshot(), palette);
    Ok(())
}
