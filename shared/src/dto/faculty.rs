use serde::{Deserialize, Serialize};

/// Teaching-load counters for one faculty member
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct FacultySummary {
    pub courses: u32,
    pub students: u32,
    pub pending_grading: u32,
    /// Average attendance across taught courses, 0.0..=100.0
    pub average_attendance: f64,
}
