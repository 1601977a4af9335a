use serde::{Deserialize, Serialize};

use super::common::Role;

/// Platform-wide counters shown on the administrator dashboard.
///
/// `users` is always `admins + faculty + students` for a consistent source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AdminSummary {
    pub users: u32,
    pub faculty: u32,
    pub students: u32,
    pub admins: u32,
    pub courses: u32,
    pub departments: u32,
    pub active_sessions: u32,
}

/// Account status in the user directory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Suspended,
    Pending,
}

/// One row of the administrator's user directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
}

/// Audit/activity feed entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ActivityEntry {
    pub id: String,
    pub actor: String,
    pub action: String,
    /// RFC 3339 timestamp
    pub at: String,
}
