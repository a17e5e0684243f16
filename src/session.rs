use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;

use crate::storage::Storage;

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub username: Option<String>,
}

/// Sole owner of the authentication token and username.
///
/// Memory is the source of truth for the running process; storage mirrors it
/// so the session survives restarts. A failed storage write is logged and the
/// in-memory state is still updated.
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    state: RwLock<Session>,
}

impl SessionStore {
    /// Build a store and load whatever session was persisted previously.
    pub fn init(storage: Arc<dyn Storage>) -> Self {
        let state = Session {
            token: storage.get_item(TOKEN_KEY),
            username: storage.get_item(USERNAME_KEY),
        };
        Self {
            storage,
            state: RwLock::new(state),
        }
    }

    pub fn set_token(&self, token: &str, username: &str) {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.token = Some(token.to_string());
            state.username = Some(username.to_string());
        }

        if let Err(err) = self
            .storage
            .set_item(TOKEN_KEY, token)
            .and_then(|_| self.storage.set_item(USERNAME_KEY, username))
        {
            warn!(?err, "failed to persist session; keeping it in memory only");
        }
    }

    pub fn clear_token(&self) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Session::default();

        if let Err(err) = self
            .storage
            .remove_item(TOKEN_KEY)
            .and_then(|_| self.storage.remove_item(USERNAME_KEY))
        {
            warn!(?err, "failed to remove persisted session");
        }
    }

    // Only the dispatcher reads the token.
    pub(crate) fn token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    pub fn username(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .username
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .is_some()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("username", &self.username())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
