//! Transient user notifications
//!
//! The notice center is the side channel for everything the user should
//! see without anything being thrown: validation failures, completed
//! mutations, caught API errors. Notices auto-expire on a deadline rather
//! than a spawned timer, so nothing can fire after the owner is gone.

use std::time::{Duration, Instant};

/// Default lifetime of a notice before it expires on its own
const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(5);

/// Severity of a notice, ordered from benign to alarming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A mutation succeeded
    Success,
    /// Neutral status information
    Info,
    /// Something odd but recoverable
    Warning,
    /// A failure the user should act on
    Error,
}

impl Severity {
    /// Short label used by renderers
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A single dismissible, auto-expiring notification
#[derive(Debug, Clone)]
pub struct Notice {
    /// Identifier for dismissal
    pub id: u64,
    /// User-visible message
    pub message: String,
    /// Severity category
    pub severity: Severity,
    created_at: Instant,
    expires_at: Instant,
    dismissed: bool,
}

impl Notice {
    /// Whether the notice has been dismissed or has outlived its deadline
    pub fn is_expired(&self) -> bool {
        self.dismissed || Instant::now() >= self.expires_at
    }

    /// Age of the notice
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

/// Collects notices and expires them on deadlines
///
/// # Examples
///
/// ```
/// use taskora::notify::{NoticeCenter, Severity};
///
/// let mut notices = NoticeCenter::new();
/// notices.push("Task created successfully!", Severity::Success);
/// assert_eq!(notices.active().len(), 1);
/// ```
#[derive(Debug)]
pub struct NoticeCenter {
    notices: Vec<Notice>,
    next_id: u64,
    ttl: Duration,
}

impl Default for NoticeCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeCenter {
    /// Create an empty notice center with the default lifetime
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_NOTICE_TTL)
    }

    /// Create a notice center with a custom lifetime
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            notices: Vec::new(),
            next_id: 0,
            ttl,
        }
    }

    /// Push a notice; returns its id for later dismissal
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let now = Instant::now();
        self.notices.push(Notice {
            id,
            message: message.into(),
            severity,
            created_at: now,
            expires_at: now + self.ttl,
            dismissed: false,
        });

        id
    }

    /// Convenience for [`Severity::Success`]
    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, Severity::Success)
    }

    /// Convenience for [`Severity::Info`]
    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, Severity::Info)
    }

    /// Convenience for [`Severity::Warning`]
    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, Severity::Warning)
    }

    /// Convenience for [`Severity::Error`]
    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, Severity::Error)
    }

    /// Dismiss a notice by id; unknown ids are a no-op
    pub fn dismiss(&mut self, id: u64) {
        if let Some(notice) = self.notices.iter_mut().find(|n| n.id == id) {
            notice.dismissed = true;
        }
    }

    /// Undismissed, unexpired notices in insertion order
    pub fn active(&self) -> Vec<&Notice> {
        self.notices.iter().filter(|n| !n.is_expired()).collect()
    }

    /// Owned copies of the active notices, for handing to renderers
    pub fn snapshot(&self) -> Vec<Notice> {
        self.notices
            .iter()
            .filter(|n| !n.is_expired())
            .cloned()
            .collect()
    }

    /// Drop expired and dismissed notices
    pub fn drain_expired(&mut self) {
        self.notices.retain(|n| !n.is_expired());
    }

    /// Total notices pushed since creation
    pub fn pushed(&self) -> u64 {
        self.next_id
    }
}
