//! Client/patient link models.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected tax id input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("tax id must contain exactly 11 digits")]
pub struct InvalidTaxId;

/// Normalized 11-digit client tax identifier (CPF).
///
/// Parsing strips punctuation ("100.000.000-02" and "10000000002" are the
/// same id) and rejects any other digit count.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TaxId(String);

impl TaxId {
    /// Normalize raw input to the canonical 11-digit form.
    pub fn parse(input: &str) -> Result<Self, InvalidTaxId> {
        let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != 11 {
            return Err(InvalidTaxId);
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Link between an external tax id and the internal patient key.
///
/// Created at tutor signup; read-only afterwards in this core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientLink {
    /// External-facing tax id (unique)
    pub tax_id: TaxId,
    /// Stable internal patient key (UUID)
    pub patient_id: String,
    /// Pet name
    pub pet_name: String,
    /// Owning tutor account, if registered through signup
    pub account_id: Option<String>,
    /// Creation timestamp
    pub created_at: String,
}

impl ClientLink {
    /// Create a new link with a fresh internal patient key.
    pub fn new(tax_id: TaxId, pet_name: impl Into<String>) -> Self {
        Self {
            tax_id,
            patient_id: uuid::Uuid::new_v4().to_string(),
            pet_name: pet_name.into(),
            account_id: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl<'de> Deserialize<'de> for TaxId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Legacy clients send the CPF as either a string or a bare number.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        let raw = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(number) => number.to_string(),
        };
        TaxId::parse(&raw).map_err(serde::de::Error::custom)
    }
}
