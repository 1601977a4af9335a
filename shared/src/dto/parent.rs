use serde::{Deserialize, Serialize};

/// A child linked to the signed-in parent account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChildRecord {
    pub id: String,
    pub name: String,
    pub grade_level: u8,
    pub homeroom: String,
    /// Attendance rate, 0.0..=100.0
    pub attendance_rate: f64,
}
