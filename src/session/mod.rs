//! Session persistence: restore at startup, write on login, clear on logout.

mod kv;
mod secret;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use secret::SecureString;

use std::path::PathBuf;

use thiserror::Error;

use crate::action::Action;
use crate::slices::login::LoginState;
use crate::store::Store;

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "accessJWT";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read session file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write session file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed session file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode session for '{path}': {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Rebuild the login slice from durable storage.
///
/// Both keys must be present and non-empty; a half-written session is
/// treated as logged out.
pub fn restore(kv: &dyn KeyValueStore) -> LoginState {
    let user = kv.get(USER_KEY).filter(|u| !u.is_empty());
    let token = kv.get(TOKEN_KEY).filter(|t| !t.is_empty());

    match (user, token) {
        (Some(user), Some(token)) => {
            tracing::info!(user = %user, "Session restored");
            LoginState::logged_in(user, SecureString::new(token))
        }
        _ => LoginState::default(),
    }
}

/// Persist a freshly issued token and publish it to the store.
pub fn persist_login(
    kv: &dyn KeyValueStore,
    store: &Store,
    user: &str,
    token: SecureString,
) -> Result<(), SessionError> {
    kv.set(USER_KEY, user)?;
    kv.set(TOKEN_KEY, token.expose())?;
    store.dispatch(Action::LoginSuccess {
        user: user.to_string(),
        token,
    });
    Ok(())
}

/// Clear the durable session and reset session-scoped slices.
///
/// The store is reset even when the storage cannot be cleared; the
/// storage error is still returned.
pub fn logout(kv: &dyn KeyValueStore, store: &Store) -> Result<(), SessionError> {
    let cleared = kv.remove(USER_KEY).and_then(|()| kv.remove(TOKEN_KEY));
    if let Err(e) = &cleared {
        tracing::warn!(error = %e, "Failed to clear persisted session");
    }

    store.dispatch(Action::Logout);
    store.dispatch(Action::RegisterReset);
    cleared
}
