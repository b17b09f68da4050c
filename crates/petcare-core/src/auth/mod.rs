//! Authentication and authorization.

mod gate;
mod password;
mod token;

pub use gate::*;
pub use password::*;
pub use token::*;

use thiserror::Error;

use crate::db::{Database, DbError};
use crate::models::{AuthenticatedUser, Role, UserAccount};

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown email and wrong password collapse into this one variant, so
    /// a caller cannot probe which accounts exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Check credentials against the relational store.
///
/// One lookup per call: the email query joins the role table, and the
/// submitted password is hashed with the stored salt and compared in
/// process. No session state is persisted server-side.
pub fn authenticate(db: &Database, email: &str, password: &str) -> AuthResult<AuthenticatedUser> {
    let stored = match db.credentials_for_email(email)? {
        Some(stored) => stored,
        None => return Err(AuthError::InvalidCredentials),
    };

    if !verify_password(&stored.salt, &stored.password_hash, password) {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(AuthenticatedUser {
        account_id: stored.account_id,
        display_name: stored.display_name,
        role: stored.role,
    })
}

/// Build a new account with freshly salted credentials.
pub fn create_account(
    email: impl Into<String>,
    display_name: impl Into<String>,
    role: Role,
    password: &str,
) -> UserAccount {
    let salt = generate_salt();
    let password_hash = hash_password(&salt, password);
    UserAccount::new(email, display_name, role, password_hash, salt)
}
