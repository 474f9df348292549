//! Taskora - task-management client library
//!
//! This library provides the building blocks of the Taskora client:
//! a persisted session store, an API gateway wrapper, a todo domain
//! service, an in-memory todo state container, and a theme store.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: session/token lifecycle over a local storage slot
//! - `api`: HTTP gateway wrapper attaching the bearer token
//! - `todos`: task model, state container, domain service, repository seam
//! - `auth`: mocked client-side login/signup flow
//! - `theme`: selected theme and its terminal palette
//! - `notify`: dismissible auto-expiring notices
//! - `storage`: JSON slot files backing the persisted stores
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use taskora::notify::NoticeCenter;
//! use taskora::todos::{TaskDraft, TodoStore};
//!
//! let mut store = TodoStore::new(NoticeCenter::new());
//! store.add(TaskDraft::titled("Buy milk"));
//! assert_eq!(store.len(), 1);
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod notify;
pub mod session;
pub mod storage;
pub mod theme;
pub mod todos;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use error::{Result, TaskoraError};
pub use session::{SessionStore, UserSession};
pub use theme::{Theme, ThemeStore};
pub use todos::{Task, TaskDraft, TodoRepository, TodoStore};
