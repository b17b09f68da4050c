//! Server configuration from environment variables.

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub records_path: String,
    pub token_secret: String,
    pub token_ttl_hours: i64,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PETCARE_PORT", "5000"),
            database_path: try_load("PETCARE_DB", "petcare.db"),
            records_path: try_load("PETCARE_RECORDS_DB", "records.db"),
            token_secret: try_load("PETCARE_TOKEN_SECRET", "dev-secret-change-in-production"),
            token_ttl_hours: try_load("PETCARE_TOKEN_TTL_HOURS", "24"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
