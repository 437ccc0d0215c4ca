//! Shared authentication state: bearer token plus the fetched profile.
//!
//! A [`Session`] is a cheap handle; clones observe the same state. The API
//! client reads the token for every request and clears the session when the
//! server answers 401, so the user store and the client always agree.

use std::sync::Arc;

use parking_lot::RwLock;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use tomato_core::UserId;

use crate::models::User;
use crate::storage::{MemoryTokenStorage, TokenStorage};

struct SessionInner {
    token: RwLock<Option<SecretString>>,
    user: RwLock<Option<User>>,
    storage: Arc<dyn TokenStorage>,
}

/// Authentication state shared by the client and the stores.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Create a session, restoring any token kept in `storage`.
    ///
    /// An unreadable store is logged and treated as empty.
    #[must_use]
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        let token = match storage.load() {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted token");
                None
            }
        };
        if token.is_some() {
            debug!("Restored persisted session token");
        }

        Self {
            inner: Arc::new(SessionInner {
                token: RwLock::new(token.map(SecretString::from)),
                user: RwLock::new(None),
                storage,
            }),
        }
    }

    /// A session backed by in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStorage::new()))
    }

    /// Whether a non-empty token is held.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.inner.token.read().is_some()
    }

    /// Whether the fetched profile has the admin role. `false` until the
    /// profile has been fetched.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.inner.user.read().as_ref().is_some_and(User::is_admin)
    }

    /// The fetched profile.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.inner.user.read().clone()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.inner.user.read().as_ref().map(|u| u.id)
    }

    /// Username of the fetched profile, or an empty string.
    #[must_use]
    pub fn username(&self) -> String {
        self.inner
            .user
            .read()
            .as_ref()
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }

    /// A copy of the token for the `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> Option<SecretString> {
        self.inner
            .token
            .read()
            .as_ref()
            .map(|t| SecretString::from(t.expose_secret().to_string()))
    }

    /// Store a new token in memory and in durable storage. An empty token
    /// clears the session instead.
    pub fn set_token(&self, token: &str) {
        if token.is_empty() {
            self.clear();
            return;
        }

        *self.inner.token.write() = Some(SecretString::from(token.to_string()));
        if let Err(e) = self.inner.storage.save(token) {
            warn!(error = %e, "Failed to persist session token");
        }
    }

    pub fn set_user(&self, user: Option<User>) {
        *self.inner.user.write() = user;
    }

    /// Drop token and profile and remove the persisted token.
    pub fn clear(&self) {
        *self.inner.token.write() = None;
        *self.inner.user.write() = None;
        if let Err(e) = self.inner.storage.remove() {
            warn!(error = %e, "Failed to remove persisted session token");
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.is_logged_in().then_some("[REDACTED]"))
            .field("user", &self.inner.user.read())
            .finish()
    }
}
