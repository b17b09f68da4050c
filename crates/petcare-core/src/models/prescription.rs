//! Prescription models.

use serde::{Deserialize, Serialize};

/// A prescribed medication line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "dosagem")]
    pub dosage: String,
    #[serde(rename = "frequencia")]
    pub frequency: String,
}

/// One issued prescription.
///
/// Immutable once appended to a history; corrections are new entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrescriptionEntry {
    /// Issuing veterinarian's license id (CRMV)
    #[serde(rename = "veterinario_crmv")]
    pub veterinarian_license: u32,
    #[serde(rename = "diagnostico")]
    pub diagnosis: String,
    #[serde(rename = "medicamentos")]
    pub medications: Vec<Medication>,
    /// Issue timestamp
    pub issued_at: String,
}

impl PrescriptionEntry {
    /// Create a new entry stamped with the current time.
    pub fn new(
        veterinarian_license: u32,
        diagnosis: impl Into<String>,
        medications: Vec<Medication>,
    ) -> Self {
        Self {
            veterinarian_license,
            diagnosis: diagnosis.into(),
            medications,
            issued_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// A patient's full prescription history document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrescriptionHistory {
    pub patient_id: String,
    pub entries: Vec<PrescriptionEntry>,
}

impl PrescriptionHistory {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Incoming prescription write request.
///
/// Every field defaults so that shape problems surface as server-side
/// validation failures instead of body-rejection errors. The legacy
/// `role_usuario` body field is deliberately not modeled: the caller's
/// role comes from the verified session token only.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PrescriptionRequest {
    #[serde(
        rename = "cpf_cliente",
        default,
        deserialize_with = "string_or_number"
    )]
    pub client_tax_id: String,
    #[serde(rename = "diagnostico", default)]
    pub diagnosis: String,
    #[serde(rename = "medicamentos", default)]
    pub medications: Vec<Medication>,
    #[serde(rename = "crmv", default)]
    pub veterinarian_license: u32,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
