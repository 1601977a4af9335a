//! Request bodies for single-endpoint mutating actions.
//!
//! These never take part in a dashboard fan-out and never fall back to defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAnnouncement {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradeSubmission {
    pub student_id: String,
    pub course_code: String,
    pub assessment: String,
    pub score: f64,
    pub max_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventAcknowledgement {
    pub event_id: String,
    pub child_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignmentSubmission {
    pub course_code: String,
    pub assignment: String,
    pub content: String,
}

/// Generic acknowledgement returned by mutating endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ActionReceipt {
    pub id: String,
    pub message: String,
}
