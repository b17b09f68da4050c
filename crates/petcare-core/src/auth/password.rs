//! Password hashing.

use sha2::{Digest, Sha256};

/// Generate a random per-account salt.
pub fn generate_salt() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Hash a password with the account salt (hex-encoded SHA-256).
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a submitted password against stored credentials.
pub fn verify_password(salt: &str, stored_hash: &str, submitted: &str) -> bool {
    hash_password(salt, submitted) == stored_hash
}
