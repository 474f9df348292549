//! Authentication commands for Taskora
//!
//! Login, signup, logout, and session inspection. Validation failures
//! surface as notices, mirroring the inline form errors of the original
//! client.

use crate::auth::{AuthOutcome, AuthService, LoginCredentials, SignupData};
use crate::error::Result;
use crate::notify::NoticeCenter;
use crate::session::SessionStore;
use crate::theme::Palette;
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;

/// Simulated network latency for the mocked auth flow
const AUTH_LATENCY: Duration = Duration::from_millis(300);

/// Log in and cache the resulting session
pub async fn run_login(
    sessions: Arc<SessionStore>,
    palette: &Palette,
    email: String,
    password: String,
) -> Result<()> {
    let auth = AuthService::new(sessions).with_latency(AUTH_LATENCY);
    let credentials = LoginCredentials {
        email,
        password,
        remember_me: false,
    };

    let mut notices = NoticeCenter::new();
    match auth.login(&credentials).await {
        AuthOutcome::Authenticated(session) => {
            notices.success(format!("Signed in as {}", session.email));
        }
        AuthOutcome::Rejected(errors) => {
            for message in errors.values() {
                notices.error(message.clone());
            }
        }
    }

    super::render_notices(&notices.snapshot(), palette);
    Ok(())
}

/// Create an account and cache the resulting session
pub async fn run_signup(
    sessions: Arc<SessionStore>,
    palette: &Palette,
    name: String,
    email: String,
    password: String,
    confirm_password: Option<String>,
) -> Result<()> {
    let auth = AuthService::new(sessions).with_latency(AUTH_LATENCY);
    let data = SignupData {
        name,
        email,
        confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
        password,
    };

    let mut notices = NoticeCenter::new();
    match auth.signup(&data).await {
        AuthOutcome::Authenticated(session) => {
            notices.success(format!("Account created for {}", session.email));
        }
        AuthOutcome::Rejected(errors) => {
            for message in errors.values() {
                notices.error(message.clone());
            }
        }
    }

    super::render_notices(&notices.snapshot(), palette);
    Ok(())
}

/// Log out, clearing the cached session
pub fn run_logout(sessions: Arc<SessionStore>, palette: &Palette) -> Result<()> {
    let auth = AuthService::new(sessions);
    auth.logout();

    let mut notices = NoticeCenter::new();
    notices.info("Signed out");
    super::render_notices(&notices.snapshot(), palette);
    Ok(())
}

/// Show the cached session, if a live one exists
pub fn run_whoami(sessions: Arc<SessionStore>, palette: &Palette) -> Result<()> {
    match sessions.get() {
        Some(session) if !session.is_expired() => {
            println!(
                "{} {} <{}>",
                "Signed in:".color(palette.accent),
                session.name.color(palette.emphasis),
                session.email
            );
            println!(
                "{} {}",
                "Session expires:".color(palette.muted),
                session.expires_at.to_rfc3339()
            );
        }
        Some(_) | None => {
            println!("{}", "Not signed in".color(palette.muted));
        }
    }
    Ok(())
}
