//! Session store for Taskora
//!
//! Caches the logged-in user's credentials (bearer token plus expiry) in a
//! single storage slot. A session whose expiry has passed is treated as
//! absent and lazily evicted on the next read; nothing here returns an
//! error to callers.

use crate::storage::LocalStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage slot holding the serialized session record
const SESSION_SLOT: &str = "session";

/// Cached proof of login held client-side
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSession {
    /// User identifier
    pub id: String,
    /// Account email
    pub email: String,
    /// Display name
    pub name: String,
    /// Authenticated flag
    pub authenticated: bool,
    /// Opaque bearer token asserted to the server
    pub token: String,
    /// Token expiry (ISO-8601 on disk)
    pub expires_at: DateTime<Utc>,
}

impl UserSession {
    /// Whether the session's expiry has passed
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Reads and writes the session record in its storage slot
///
/// # Examples
///
/// ```
/// use taskora::session::SessionStore;
/// use taskora::storage::LocalStore;
///
/// let store = LocalStore::with_dir("/tmp/taskora_session_doc").unwrap();
/// let sessions = SessionStore::new(store);
/// assert!(!sessions.is_authenticated());
/// ```
pub struct SessionStore {
    store: LocalStore,
}

impl SessionStore {
    /// Create a session store over the given slot storage
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Current bearer token, if a live session exists
    ///
    /// An absent or expired record yields `None`; expired records are
    /// evicted so later reads stay cheap.
    pub fn token(&self) -> Option<String> {
        let session: UserSession = self.store.read_slot(SESSION_SLOT)?;

        if session.is_expired() {
            tracing::debug!("Stored session expired at {}; evicting", session.expires_at);
            self.store.clear_slot(SESSION_SLOT);
            return None;
        }

        Some(session.token)
    }

    /// Full session record, if one is stored
    ///
    /// Unlike [`SessionStore::token`] this does not check expiry; it is
    /// the raw slot read the original client exposed alongside the token
    /// accessor.
    pub fn get(&self) -> Option<UserSession> {
        self.store.read_slot(SESSION_SLOT)
    }

    /// Serialize and write the full session record, overwriting any prior
    /// value
    pub fn save(&self, session: &UserSession) {
        if let Err(e) = self.store.write_slot(SESSION_SLOT, session) {
            tracing::warn!("Failed to save session: {}", e);
        }
    }

    /// Remove the stored session (logout)
    pub fn clear(&self) {
        self.store.clear_slot(SESSION_SLOT);
    }

    /// True iff a live token is available
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}
