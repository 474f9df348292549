//! Authentication service for Taskora
//!
//! The canonical auth flow is client-side and mocked: credentials are
//! validated locally, a session is fabricated (uuid token, 24-hour
//! expiry) and written through the session store. Validation failures
//! come back as a structured field-to-message map, never as errors.

use crate::session::{SessionStore, UserSession};
use chrono::{Duration as ChronoDuration, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use uuid::Uuid;

/// Field-to-message validation error map
pub type FieldErrors = BTreeMap<&'static str, String>;

/// How long a fabricated session stays valid
const SESSION_LIFETIME_HOURS: i64 = 24;

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 8;

/// Login form input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// Signup form input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Outcome of a login or signup attempt
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// A session was created and saved
    Authenticated(UserSession),
    /// The form was rejected; nothing was saved
    Rejected(FieldErrors),
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap())
}

/// Validate login form input
pub fn validate_login(credentials: &LoginCredentials) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if credentials.email.trim().is_empty() {
        errors.insert("email", "Email is required".to_string());
    } else if !email_regex().is_match(credentials.email.trim()) {
        errors.insert("email", "Email is invalid".to_string());
    }

    if credentials.password.is_empty() {
        errors.insert("password", "Password is required".to_string());
    }

    errors
}

/// Validate signup form input
pub fn validate_signup(data: &SignupData) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if data.name.trim().is_empty() {
        errors.insert("name", "Full name is required".to_string());
    }

    if data.email.trim().is_empty() {
        errors.insert("email", "Email is required".to_string());
    } else if !email_regex().is_match(data.email.trim()) {
        errors.insert("email", "Email is invalid".to_string());
    }

    if data.password.is_empty() {
        errors.insert("password", "Password is required".to_string());
    } else if data.password.len() < MIN_PASSWORD_LEN {
        errors.insert(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }

    if data.password != data.confirm_password {
        errors.insert("confirm_password", "Passwords do not match".to_string());
    }

    errors
}

/// Mocked client-side auth flow over the session store
pub struct AuthService {
    sessions: Arc<SessionStore>,
    latency: Duration,
}

impl AuthService {
    /// Create an auth service over the given session store
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self {
            sessions,
            latency: Duration::ZERO,
        }
    }

    /// Set the simulated network latency for login/signup
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Attempt a login
    ///
    /// Validates the form; on success fabricates a session whose display
    /// name is the email's local part and saves it, overwriting any prior
    /// session.
    pub async fn login(&self, credentials: &LoginCredentials) -> AuthOutcome {
        let errors = validate_login(credentials);
        if !errors.is_empty() {
            return AuthOutcome::Rejected(errors);
        }

        self.simulate_latency().await;

        let email = credentials.email.trim().to_string();
        let name = email.split('@').next().unwrap_or_default().to_string();
        let session = self.fabricate_session(email, name);

        tracing::info!("Logged in as {}", session.email);
        self.sessions.save(&session);
        AuthOutcome::Authenticated(session)
    }

    /// Attempt a signup
    ///
    /// Validates the form (including password length and confirmation
    /// match); on success behaves like login with the supplied name.
    pub async fn signup(&self, data: &SignupData) -> AuthOutcome {
        let errors = validate_signup(data);
        if !errors.is_empty() {
            return AuthOutcome::Rejected(errors);
        }

        self.simulate_latency().await;

        let session =
            self.fabricate_session(data.email.trim().to_string(), data.name.trim().to_string());

        tracing::info!("Signed up as {}", session.email);
        self.sessions.save(&session);
        AuthOutcome::Authenticated(session)
    }

    /// Log out, clearing the stored session
    pub fn logout(&self) {
        tracing::info!("Logging out");
        self.sessions.clear();
    }

    fn fabricate_session(&self, email: String, name: String) -> UserSession {
        UserSession {
            id: Uuid::new_v4().to_string(),
            email,
            name,
            authenticated: true,
            token: format!("tok_{}", Uuid::new_v4().simple()),
            expires_at: Utc::now() + ChronoDuration::hours(SESSION_LIFETIME_HOURS),
        }
    }
}
