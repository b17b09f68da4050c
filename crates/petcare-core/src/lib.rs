//! PetCare Core Library
//!
//! Server-side core for the clinic's authenticated cross-store write path.
//!
//! # Architecture
//!
//! ```text
//! POST /login ──► authenticate (one SQL lookup, role join)
//!                      │
//!                      ▼
//!              HS256 session token (role claim)
//!
//! POST /nova-prescricao
//!   token ──► Role Gate ──► validation ──► tax id → patient key (SQL)
//!                                                 │
//!                                                 ▼
//!                              PrescriptionStore (atomic create-or-append)
//! ```
//!
//! # Core Principle
//!
//! **The role gate runs before any store work**, and the server derives the
//! role claim from its own verified token, never from client-supplied
//! fields. The relational store and the record store are not joined by a
//! transaction; the resolved patient key is a per-request snapshot.
//!
//! # Modules
//!
//! - [`db`]: relational store (accounts, role groups, client links)
//! - [`records`]: per-patient prescription documents (atomic upsert-append)
//! - [`auth`]: credential check, password hashing, tokens, role gate
//! - [`models`]: domain types (Role, TaxId, PrescriptionEntry, etc.)
//! - [`prescribe`]: the write-path pipeline

pub mod auth;
pub mod db;
pub mod models;
pub mod prescribe;
pub mod records;

// Re-export commonly used types
pub use db::Database;
pub use models::{
    AuthenticatedUser, Capability, ClientLink, Medication, PrescriptionEntry,
    PrescriptionHistory, PrescriptionRequest, Role, SessionContext, TaxId,
};
pub use prescribe::{submit_prescription, ClientDirectory, RecordSink};
pub use records::PrescriptionStore;

use thiserror::Error;

/// Unified error taxonomy for the write path.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Credentials did not match; no-account and bad-password are the same
    /// value on purpose.
    #[error("invalid credentials")]
    Authentication,

    /// Caller's role lacks the required capability.
    #[error("access denied: {0}")]
    Authorization(String),

    /// External identifier did not resolve to a patient.
    #[error("client/pet not found")]
    NotFound,

    /// Request failed server-side validation.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Store-level failure; nothing was appended.
    #[error("store failure: {0}")]
    Store(String),
}

impl From<db::DbError> for CoreError {
    fn from(e: db::DbError) -> Self {
        CoreError::Store(e.to_string())
    }
}

impl From<records::RecordError> for CoreError {
    fn from(e: records::RecordError) -> Self {
        CoreError::Store(e.to_string())
    }
}

impl From<auth::AuthError> for CoreError {
    fn from(e: auth::AuthError) -> Self {
        match e {
            auth::AuthError::InvalidCredentials => CoreError::Authentication,
            auth::AuthError::Database(db) => CoreError::Store(db.to_string()),
        }
    }
}

impl From<auth::TokenError> for CoreError {
    fn from(_: auth::TokenError) -> Self {
        CoreError::Authentication
    }
}

impl From<auth::AccessDenied> for CoreError {
    fn from(e: auth::AccessDenied) -> Self {
        CoreError::Authorization(e.to_string())
    }
}

impl From<models::InvalidTaxId> for CoreError {
    fn from(e: models::InvalidTaxId) -> Self {
        CoreError::Validation(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for CoreError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        CoreError::Store(format!("Lock poisoned: {}", e))
    }
}
