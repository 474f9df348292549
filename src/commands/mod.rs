//! Command handlers for the Taskora CLI
//!
//! Each submodule implements one family of subcommands. Handlers catch
//! domain failures and convert them to user-visible notices; only
//! composition problems (bad config, broken storage) propagate as errors.

pub mod auth;
pub mod tasks;
pub mod theme;

use crate::error::TaskoraError;
use crate::notify::{Notice, Severity};
use crate::theme::Palette;
use colored::Colorize;

/// Render notices the way the original client rendered its toasts
pub fn render_notices(notices: &[Notice], palette: &Palette) {
    for notice in notices {
        let (symbol, colored_message) = match notice.severity {
            Severity::Success => ("✓", notice.message.green()),
            Severity::Info => ("i", notice.message.color(palette.accent)),
            Severity::Warning => ("!", notice.message.yellow()),
            Severity::Error => ("✗", notice.message.red()),
        };
        println!("{} {}", symbol, colored_message);
    }
}

/// User-facing message for a caught error
///
/// Keeps the transport/server distinction visible: an unavailable
/// service reads differently from a rejection with a status code.
pub fn user_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<TaskoraError>() {
        Some(TaskoraError::Unavailable(_)) => {
            "Network error or server unavailable".to_string()
        }
        Some(TaskoraError::Api {
            status, message, ..
        }) => format!("{} (status {})", message, status),
        Some(other) => other.to_string(),
        None => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_for_unavailable() {
        let err: anyhow::Error = TaskoraError::Unavailable("refused".to_string()).into();
        assert_eq!(user_message(&err), "Network error or server unavailable");
    }

    #[test]
    fn test_user_message_for_api_rejection() {
        let err: anyhow::Error = TaskoraError::Api {
            status: 404,
            message: "not found".to_string(),
            payload: None,
        }
        .into();
        assert_eq!(user_message(&err), "not found (status 404)");
    }

    #[test]
    fn test_user_message_for_plain_error() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(user_message(&err), "something else");
    }
}
