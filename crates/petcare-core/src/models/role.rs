//! Roles and capabilities.

use serde::{Deserialize, Serialize};

/// Access role of a user account.
///
/// Wire names ("CLI", "VET", "ADM") match the role table and token claims.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    /// Pet tutor (client account)
    #[serde(rename = "CLI")]
    Tutor,
    /// Licensed veterinarian
    #[serde(rename = "VET")]
    Veterinarian,
    /// Clinic administrator
    #[serde(rename = "ADM")]
    Admin,
}

/// A gated operation. Only prescription writes are gated in this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    WritePrescription,
}

impl Role {
    /// Wire/storage name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tutor => "CLI",
            Role::Veterinarian => "VET",
            Role::Admin => "ADM",
        }
    }

    /// Parse a wire/storage name.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "CLI" => Some(Role::Tutor),
            "VET" => Some(Role::Veterinarian),
            "ADM" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Whether this role holds a capability.
    pub fn holds(&self, capability: Capability) -> bool {
        match capability {
            Capability::WritePrescription => matches!(self, Role::Veterinarian),
        }
    }
}
