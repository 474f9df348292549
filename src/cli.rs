//! Command-line interface definition for Taskora
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for authentication, task management, and theming.

use clap::{Parser, Subcommand};

/// Taskora - task-management client CLI
///
/// Manage tasks against a remote service or a local in-memory mock,
/// with a persisted session and selectable themes.
#[derive(Parser, Debug, Clone)]
#[command(name = "taskora")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the API base URL from config
    #[arg(long, env = "TASKORA_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Override the repository kind from config (memory, remote)
    #[arg(long)]
    pub repository: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Taskora
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in and cache a session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Create an account and cache a session
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Password confirmation (defaults to the password)
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Log out, clearing the cached session
    Logout,

    /// Show the cached session, if any
    Whoami,

    /// Add a task
    Add {
        /// Task title
        title: String,

        /// Free-form description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Priority (low, medium, high)
        #[arg(short, long, default_value = "medium")]
        priority: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Category
        #[arg(long)]
        category: Option<String>,

        /// Tags (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,

        /// Subtask titles (repeatable)
        #[arg(short, long)]
        subtask: Vec<String>,
    },

    /// List tasks
    List {
        /// Only show incomplete tasks
        #[arg(long)]
        pending: bool,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one task in full
    Show {
        /// Task identifier
        id: String,
    },

    /// Edit a task's fields
    Edit {
        /// Task identifier
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New priority (low, medium, high)
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Toggle a task's completion flag
    Done {
        /// Task identifier
        id: String,
    },

    /// Delete a task
    Rm {
        /// Task identifier
        id: String,
    },

    /// Mark every incomplete task completed
    CompleteAll,

    /// Manage the selected theme
    Theme {
        /// Theme subcommand
        #[command(subcommand)]
        command: ThemeCommand,
    },
}

/// Theme subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ThemeCommand {
    /// Show the current theme and the available set
    Show,

    /// Select a theme by name
    Set {
        /// Theme name (e.g. midnight-professional)
        name: String,
    },

    /// Advance to the next theme in the rotation
    Next,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
