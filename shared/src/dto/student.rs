use serde::{Deserialize, Serialize};

/// Course or school-wide announcement shown to students
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    pub posted_by: String,
    /// ISO-8601 date (`YYYY-MM-DD`)
    pub posted_on: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
}
