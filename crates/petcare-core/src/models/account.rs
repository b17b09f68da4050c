//! User account models.

use serde::{Deserialize, Serialize};

use super::Role;

/// A stored user account.
///
/// Immutable after signup except for the password; accounts are never
/// deleted in this core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAccount {
    /// Stable account id (UUID)
    pub account_id: String,
    /// Login email, unique across accounts
    pub email: String,
    /// Hex SHA-256 of salt + password
    pub password_hash: String,
    /// Per-account salt
    pub salt: String,
    /// Name shown after login
    pub display_name: String,
    /// Access role
    pub role: Role,
    /// Creation timestamp
    pub created_at: String,
}

impl UserAccount {
    /// Create a new account from already-hashed credentials.
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
        password_hash: impl Into<String>,
        salt: impl Into<String>,
    ) -> Self {
        Self {
            account_id: uuid::Uuid::new_v4().to_string(),
            email: email.into(),
            password_hash: password_hash.into(),
            salt: salt.into(),
            display_name: display_name.into(),
            role,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Result of a successful credential check.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub account_id: String,
    pub display_name: String,
    pub role: Role,
}

/// Caller identity for one request, derived from a verified token.
///
/// Passed explicitly into every handler and pipeline call; there is no
/// process-wide session singleton.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub account_id: String,
    pub display_name: String,
    pub role: Role,
}
