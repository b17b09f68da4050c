//! Role gate for protected capabilities.

use thiserror::Error;

use crate::models::{Capability, Role};

/// Capability denial.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("role {role:?} lacks capability {required:?}")]
pub struct AccessDenied {
    pub required: Capability,
    pub role: Role,
}

/// Allow or deny a capability for a role.
///
/// Pure predicate: callers must run it before touching any store, so a
/// denied request produces zero database work.
pub fn authorize(required: Capability, role: Role) -> Result<(), AccessDenied> {
    if role.holds(required) {
        Ok(())
    } else {
        Err(AccessDenied { required, role })
    }
}
