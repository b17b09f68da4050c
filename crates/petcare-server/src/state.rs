//! Shared application state.

use std::sync::{Arc, Mutex};

use petcare_core::auth::TokenService;
use petcare_core::{Database, PrescriptionStore};

use crate::config::Config;

/// State shared by all request handlers.
///
/// The two stores are the only shared mutable resources; both sit behind a
/// mutex with short critical sections. No other state crosses requests.
pub struct AppState {
    pub db: Mutex<Database>,
    pub records: Mutex<PrescriptionStore>,
    pub tokens: TokenService,
}

impl AppState {
    /// Open the stores configured in the environment.
    pub fn from_config(config: &Config) -> anyhow::Result<Arc<Self>> {
        let db = Database::open(&config.database_path)?;
        let records = PrescriptionStore::open(&config.records_path)?;
        Ok(Arc::new(Self {
            db: Mutex::new(db),
            records: Mutex::new(records),
            tokens: TokenService::new(config.token_secret.as_bytes().to_vec(), config.token_ttl_hours),
        }))
    }

    /// Fully in-memory state (for testing).
    pub fn in_memory(token_secret: &str) -> anyhow::Result<Arc<Self>> {
        let db = Database::open_in_memory()?;
        let records = PrescriptionStore::open_in_memory()?;
        Ok(Arc::new(Self {
            db: Mutex::new(db),
            records: Mutex::new(records),
            tokens: TokenService::new(token_secret.as_bytes().to_vec(), 24),
        }))
    }
}
