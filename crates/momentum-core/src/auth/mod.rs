//! Identity service port and session persistence.
//!
//! Sign-in state is optional: the tracker works fully offline, and the
//! identity port only exists so a remote service can own the account. The
//! port is injected by the caller; nothing in this crate holds a global
//! client.

pub mod client;

pub use client::RemoteIdentity;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// An authenticated user as reported by the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A signed-in session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

/// Identity port. Implementations talk to a remote service; tests can
/// substitute their own.
pub trait IdentityService {
    /// Create an account. Services with email confirmation disabled return
    /// a usable session immediately.
    fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Exchange credentials for a session.
    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Invalidate the session on the service side.
    fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;

    /// Fetch the user behind an access token.
    fn current_user(&self, access_token: &str) -> Result<User, AuthError>;
}

/// Thin wrapper around the OS keyring for session storage.
pub mod session_store {
    use super::Session;
    use crate::error::AuthError;

    const SERVICE: &str = "momentum";
    const KEY: &str = "session";

    pub fn save(session: &Session) -> Result<(), AuthError> {
        let json = serde_json::to_string(session)
            .map_err(|e| AuthError::Keyring(e.to_string()))?;
        let entry = keyring::Entry::new(SERVICE, KEY)
            .map_err(|e| AuthError::Keyring(e.to_string()))?;
        entry
            .set_password(&json)
            .map_err(|e| AuthError::Keyring(e.to_string()))
    }

    pub fn load() -> Result<Option<Session>, AuthError> {
        let entry = keyring::Entry::new(SERVICE, KEY)
            .map_err(|e| AuthError::Keyring(e.to_string()))?;
        match entry.get_password() {
            Ok(json) => {
                let session =
                    serde_json::from_str(&json).map_err(|e| AuthError::Keyring(e.to_string()))?;
                Ok(Some(session))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AuthError::Keyring(e.to_string())),
        }
    }

    pub fn clear() -> Result<(), AuthError> {
        let entry = keyring::Entry::new(SERVICE, KEY)
            .map_err(|e| AuthError::Keyring(e.to_string()))?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AuthError::Keyring(e.to_string())),
        }
    }
}
