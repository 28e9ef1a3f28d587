//! Authenticated session context.
//!
//! The session is loaded from a key/value store on boot, written on login,
//! and torn down on sign-out. Keys follow the names the web client stores.

use parking_lot::Mutex;
use secrecy::{ExposeSecret, Secret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::error::{VoiceError, VoiceResult};

pub const KEY_IS_AUTHENTICATED: &str = "isAuthenticated";
pub const KEY_ACCESS_TOKEN: &str = "accessToken";
pub const KEY_USER_NAME: &str = "userName";
pub const KEY_USER_ROLE: &str = "userRole";

// Written by older clients; read as fallbacks and cleared on sign-out
pub const LEGACY_KEY_ACCESS_TOKEN: &str = "access_token";
pub const LEGACY_KEY_USER_NAME: &str = "username";
pub const LEGACY_KEY_VERIFICATION_STATUS: &str = "verificationStatus";

pub const ALL_SESSION_KEYS: [&str; 7] = [
    KEY_IS_AUTHENTICATED,
    KEY_ACCESS_TOKEN,
    LEGACY_KEY_ACCESS_TOKEN,
    KEY_USER_NAME,
    LEGACY_KEY_USER_NAME,
    KEY_USER_ROLE,
    LEGACY_KEY_VERIFICATION_STATUS,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = VoiceError;

    fn from_str(s: &str) -> VoiceResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            "admin" => Ok(Role::Admin),
            other => Err(VoiceError::InvalidRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated user. The token is never printed.
#[derive(Debug)]
pub struct Session {
    pub user_name: String,
    /// `None` when the stored role is missing or unrecognized
    pub role: Option<Role>,
    pub access_token: SecretString,
}

/// Persistent key/value storage backing the session
pub trait SessionStore: Send {
    /// # Errors
    ///
    /// Storage backend failures.
    fn get(&self, key: &str) -> VoiceResult<Option<String>>;

    /// # Errors
    ///
    /// Storage backend failures.
    fn set(&mut self, key: &str, value: &str) -> VoiceResult<()>;

    /// # Errors
    ///
    /// Storage backend failures.
    fn remove(&mut self, key: &str) -> VoiceResult<()>;
}

/// In-memory store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    /// True when no key is stored
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> VoiceResult<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> VoiceResult<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> VoiceResult<()> {
        self.values.lock().remove(key);
        Ok(())
    }
}

pub struct SessionContext {
    store: Box<dyn SessionStore>,
    current: Option<Session>,
}

impl SessionContext {
    /// Read the session left in `store` by a previous run. Authenticated
    /// only when the flag is `"true"` and both token and user name exist.
    ///
    /// # Errors
    ///
    /// Storage failures.
    pub fn load(store: Box<dyn SessionStore>) -> VoiceResult<Self> {
        let current = Self::read(store.as_ref())?;
        if let Some(session) = &current {
            info!(role = ?session.role, "session restored");
        }
        Ok(Self { store, current })
    }

    fn read(store: &dyn SessionStore) -> VoiceResult<Option<Session>> {
        if store.get(KEY_IS_AUTHENTICATED)?.as_deref() != Some("true") {
            return Ok(None);
        }
        let token = first_present(store, &[KEY_ACCESS_TOKEN, LEGACY_KEY_ACCESS_TOKEN])?;
        let user_name = first_present(store, &[KEY_USER_NAME, LEGACY_KEY_USER_NAME])?;
        let (Some(token), Some(user_name)) = (token, user_name) else {
            return Ok(None);
        };
        let role = store.get(KEY_USER_ROLE)?.and_then(|r| r.parse().ok());

        Ok(Some(Session {
            user_name,
            role,
            access_token: Secret::new(token),
        }))
    }

    /// # Errors
    ///
    /// Storage failures; the in-memory session is only replaced once every
    /// key is written.
    pub fn login(&mut self, user_name: &str, role: Role, access_token: SecretString) -> VoiceResult<()> {
        self.store.set(KEY_IS_AUTHENTICATED, "true")?;
        self.store.set(KEY_ACCESS_TOKEN, access_token.expose_secret())?;
        self.store.set(KEY_USER_NAME, user_name)?;
        self.store.set(KEY_USER_ROLE, role.as_str())?;

        info!(role = %role, "signed in");
        self.current = Some(Session {
            user_name: user_name.to_string(),
            role: Some(role),
            access_token,
        });
        Ok(())
    }

    /// Remove every session key. Returns whether a session was active.
    ///
    /// # Errors
    ///
    /// Storage failures.
    pub fn sign_out(&mut self) -> VoiceResult<bool> {
        for key in ALL_SESSION_KEYS {
            self.store.remove(key)?;
        }
        let was_active = self.current.take().is_some();
        info!(was_active, "signed out");
        Ok(was_active)
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

fn first_present(store: &dyn SessionStore, keys: &[&str]) -> VoiceResult<Option<String>> {
    for key in keys {
        if let Some(value) = store.get(key)?.filter(|v| !v.is_empty()) {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_empty_store() {
        let context = SessionContext::load(Box::new(MemorySessionStore::new())).unwrap();
        assert!(!context.is_authenticated());
    }

    #[test]
    fn test_load_legacy_keys() {
        let mut store = MemorySessionStore::new();
        store.set(KEY_IS_AUTHENTICATED, "true").unwrap();
        store.set(LEGACY_KEY_ACCESS_TOKEN, "tok-123").unwrap();
        store.set(LEGACY_KEY_USER_NAME, "asha").unwrap();
        store.set(KEY_USER_ROLE, "doctor").unwrap();

        let context = SessionContext::load(Box::new(store)).unwrap();
        let session = context.current().unwrap();
        assert_eq!(session.user_name, "asha");
        assert_eq!(session.role, Some(Role::Doctor));
        assert_eq!(session.access_token.expose_secret(), "tok-123");
    }

    #[test]
    fn test_load_requires_token_and_name() {
        let mut store = MemorySessionStore::new();
        store.set(KEY_IS_AUTHENTICATED, "true").unwrap();
        store.set(KEY_USER_NAME, "asha").unwrap();
        let context = SessionContext::load(Box::new(store)).unwrap();
        assert!(!context.is_authenticated());
    }

    #[test]
    fn test_login_then_sign_out_clears_store() {
        let store = MemorySessionStore::new();
        let mut context = SessionContext::load(Box::new(store.clone())).unwrap();

        context
            .login("asha", Role::Patient, Secret::new("tok-456".to_string()))
            .unwrap();
        assert!(context.is_authenticated());
        assert_eq!(store.get(KEY_USER_ROLE).unwrap().as_deref(), Some("patient"));

        let mut handle = store.clone();
        handle.set(LEGACY_KEY_VERIFICATION_STATUS, "verified").unwrap();

        assert!(context.sign_out().unwrap());
        assert!(!context.is_authenticated());
        assert!(store.is_empty());
        assert!(!context.sign_out().unwrap());
    }

    #[test]
    fn test_token_is_not_printed() {
        let session = Session {
            user_name: "asha".into(),
            role: None,
            access_token: Secret::new("tok-789".to_string()),
        };
        assert!(!format!("{session:?}").contains("tok-789"));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert!(matches!("nurse".parse::<Role>(), Err(VoiceError::InvalidRole(r)) if r == "nurse"));
    }

    /// Reads succeed, writes are rejected
    struct ReadOnlyStore;

    impl SessionStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> VoiceResult<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> VoiceResult<()> {
            Err(VoiceError::Session(format!("cannot write {key}")))
        }

        fn remove(&mut self, key: &str) -> VoiceResult<()> {
            Err(VoiceError::Session(format!("cannot remove {key}")))
        }
    }

    #[test]
    fn test_storage_failure_keeps_previous_state() {
        let mut context = SessionContext::load(Box::new(ReadOnlyStore)).unwrap();

        let err = context
            .login("asha", Role::Patient, Secret::new("tok-000".to_string()))
            .unwrap_err();
        assert_eq!(err.code(), error_common::codes::session::STORAGE_FAILED);
        assert!(err.to_string().contains(KEY_IS_AUTHENTICATED));
        assert!(!context.is_authenticated());

        assert!(matches!(context.sign_out(), Err(VoiceError::Session(_))));
    }
}
