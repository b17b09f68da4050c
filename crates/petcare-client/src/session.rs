//! Client-side session persistence.
//!
//! Stands in for the browser's local storage: a small JSON file holding
//! three independent entries (session token, serialized user profile, and
//! the tutor's patient id). Each entry is read and written on its own;
//! logout clears all three.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use petcare_core::models::Role;

const TOKEN_KEY: &str = "petlover_token";
const USER_KEY: &str = "petlover_user";
const PET_ID_KEY: &str = "petlover_pet_id";

/// Session store errors.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Logged-in user profile, as returned by the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(rename = "nome")]
    pub name: String,
    pub role: Role,
    #[serde(rename = "pet_id", default)]
    pub pet_id: Option<String>,
}

/// Persistent key-value session store.
pub struct SessionStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl SessionStore {
    /// Open the store, loading any persisted entries. An unreadable or
    /// corrupt file starts the session empty rather than failing.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    fn persist(&self) -> SessionResult<()> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Store the session token.
    pub fn save_token(&mut self, token: &str) -> SessionResult<()> {
        self.entries.insert(TOKEN_KEY.into(), token.into());
        self.persist()
    }

    /// Current session token, if any.
    pub fn token(&self) -> Option<&str> {
        self.entries.get(TOKEN_KEY).map(String::as_str)
    }

    /// Store the user profile.
    pub fn save_user(&mut self, profile: &UserProfile) -> SessionResult<()> {
        let raw = serde_json::to_string(profile)?;
        self.entries.insert(USER_KEY.into(), raw);
        self.persist()
    }

    /// Current user profile, if present and readable.
    pub fn user(&self) -> Option<UserProfile> {
        self.entries
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str(raw).ok())
    }

    /// Store the patient id.
    pub fn save_pet_id(&mut self, pet_id: &str) -> SessionResult<()> {
        self.entries.insert(PET_ID_KEY.into(), pet_id.into());
        self.persist()
    }

    /// Current patient id, if any.
    pub fn pet_id(&self) -> Option<&str> {
        self.entries.get(PET_ID_KEY).map(String::as_str)
    }

    /// A session counts as authenticated when a user profile is present.
    /// Token expiry is not modeled here.
    pub fn is_authenticated(&self) -> bool {
        self.entries.contains_key(USER_KEY)
    }

    /// Clear all three entries.
    pub fn logout(&mut self) -> SessionResult<()> {
        self.entries.remove(TOKEN_KEY);
        self.entries.remove(USER_KEY);
        self.entries.remove(PET_ID_KEY);
        self.persist()
    }
}
