use serde::{Deserialize, Serialize};

/// Platform role. Each role has its own dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Faculty,
    Parent,
    #[default]
    Student,
}

impl Role {
    pub fn all() -> &'static [Role] {
        &[Role::Admin, Role::Faculty, Role::Parent, Role::Student]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Faculty => "faculty",
            Role::Parent => "parent",
            Role::Student => "student",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "faculty" => Ok(Role::Faculty),
            "parent" => Ok(Role::Parent),
            "student" => Ok(Role::Student),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Signed-in user's profile card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Course offering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub title: String,
    pub instructor: String,
    pub enrolled: u32,
    pub capacity: u32,
    pub credits: u8,
}

/// One graded assessment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GradeRecord {
    pub student_id: String,
    pub student_name: String,
    pub course_code: String,
    pub assessment: String,
    pub score: f64,
    pub max_score: f64,
    pub letter: String,
}

/// Calendar / feed entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EventItem {
    pub id: String,
    pub title: String,
    pub category: String,
    /// ISO-8601 date (`YYYY-MM-DD`)
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Error response body returned by the backend on non-success statuses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
