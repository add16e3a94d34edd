use std::fmt;

use crate::account::models::RecordStatus;

/// Code of the role assigned to accounts created through signup.
pub const DEFAULT_ROLE_CODE: &str = "patient";

/// Role reference entity.
///
/// Read-only from the signup use case's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub code: String,
    pub name: String,
    pub record_status: RecordStatus,
}

impl Role {
    /// Only active roles may be assigned to new accounts.
    pub fn is_active(&self) -> bool {
        self.record_status == RecordStatus::Active
    }
}

/// Role identifier assigned by storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleId(pub i64);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
