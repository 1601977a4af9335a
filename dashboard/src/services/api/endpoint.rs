//! # Endpoint Contract
//!
//! An endpoint is a verb + path, tagged with the category of payload it returns. The
//! category is what lets the demo data source produce a payload with the same shape as
//! the real backend for that endpoint, and lets the client reject a 2xx body that
//! doesn't decode into the category's DTO.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::dto::{
    ActivityEntry, AdminSummary, Announcement, ChildRecord, Course, EventItem, FacultySummary,
    GradeRecord, UserProfile, UserRecord,
};

/// HTTP verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Mutating verbs go through `RequestClient::mutate` only and never fall back.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

/// Coarse schema of a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// Singleton record (profile card)
    Record,
    /// Homogeneous list (directory, feed)
    List,
    /// Object of counters
    Summary,
}

impl PayloadShape {
    /// Well-typed empty value for this shape.
    pub fn empty_value(&self) -> Value {
        match self {
            PayloadShape::List => Value::Array(Vec::new()),
            PayloadShape::Record | PayloadShape::Summary => Value::Object(serde_json::Map::new()),
        }
    }

    /// Whether `value` has this shape at the top level.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            PayloadShape::List => value.is_array(),
            PayloadShape::Record | PayloadShape::Summary => value.is_object(),
        }
    }
}

/// Every payload category a facade can declare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointCategory {
    AdminProfile,
    AdminSummary,
    UserDirectory,
    ActivityFeed,
    FacultyProfile,
    FacultySummary,
    TaughtCourses,
    FacultySchedule,
    ChildList,
    ChildGrades,
    ParentEvents,
    StudentProfile,
    EnrolledCourses,
    StudentGrades,
    Announcements,
    /// Extension category with no synthetic generator
    Custom(String),
}

impl EndpointCategory {
    /// Expected top-level shape of the category's payload.
    pub fn shape(&self) -> PayloadShape {
        match self {
            EndpointCategory::AdminProfile
            | EndpointCategory::FacultyProfile
            | EndpointCategory::StudentProfile => PayloadShape::Record,
            EndpointCategory::AdminSummary | EndpointCategory::FacultySummary => PayloadShape::Summary,
            EndpointCategory::UserDirectory
            | EndpointCategory::ActivityFeed
            | EndpointCategory::TaughtCourses
            | EndpointCategory::FacultySchedule
            | EndpointCategory::ChildList
            | EndpointCategory::ChildGrades
            | EndpointCategory::ParentEvents
            | EndpointCategory::EnrolledCourses
            | EndpointCategory::StudentGrades
            | EndpointCategory::Announcements => PayloadShape::List,
            EndpointCategory::Custom(_) => PayloadShape::Record,
        }
    }

    /// Well-typed zero value: zeroed counters, default record, or empty list.
    pub fn empty_value(&self) -> Value {
        let typed = match self {
            EndpointCategory::AdminProfile
            | EndpointCategory::FacultyProfile
            | EndpointCategory::StudentProfile => serde_json::to_value(UserProfile::default()),
            EndpointCategory::AdminSummary => serde_json::to_value(AdminSummary::default()),
            EndpointCategory::FacultySummary => serde_json::to_value(FacultySummary::default()),
            _ => return self.shape().empty_value(),
        };
        typed.unwrap_or_else(|_| self.shape().empty_value())
    }

    /// Whether `value` decodes into the category's DTO. `Custom` carries no schema.
    pub fn decodes(&self, value: &Value) -> bool {
        fn fits<T: DeserializeOwned>(value: &Value) -> bool {
            T::deserialize(value).is_ok()
        }

        match self {
            EndpointCategory::AdminProfile
            | EndpointCategory::FacultyProfile
            | EndpointCategory::StudentProfile => fits::<UserProfile>(value),
            EndpointCategory::AdminSummary => fits::<AdminSummary>(value),
            EndpointCategory::FacultySummary => fits::<FacultySummary>(value),
            EndpointCategory::UserDirectory => fits::<Vec<UserRecord>>(value),
            EndpointCategory::ActivityFeed => fits::<Vec<ActivityEntry>>(value),
            EndpointCategory::TaughtCourses | EndpointCategory::EnrolledCourses => {
                fits::<Vec<Course>>(value)
            }
            EndpointCategory::FacultySchedule | EndpointCategory::ParentEvents => {
                fits::<Vec<EventItem>>(value)
            }
            EndpointCategory::ChildList => fits::<Vec<ChildRecord>>(value),
            EndpointCategory::ChildGrades | EndpointCategory::StudentGrades => {
                fits::<Vec<GradeRecord>>(value)
            }
            EndpointCategory::Announcements => fits::<Vec<Announcement>>(value),
            EndpointCategory::Custom(_) => true,
        }
    }
}

/// One backend endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub category: EndpointCategory,
    pub shape: PayloadShape,
}

impl Endpoint {
    /// Read endpoint whose shape follows from its category.
    pub fn get(path: impl Into<String>, category: EndpointCategory) -> Self {
        let shape = category.shape();
        Self {
            method: Method::Get,
            path: path.into(),
            category,
            shape,
        }
    }

    /// Mutating endpoint. Its payload is an action receipt record.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            category: EndpointCategory::Custom("action_receipt".to_string()),
            shape: PayloadShape::Record,
        }
    }

    pub fn with_shape(mut self, shape: PayloadShape) -> Self {
        self.shape = shape;
        self
    }

    /// Whether a 2xx body is usable as this endpoint's payload.
    ///
    /// The body must have the declared shape and, when the shape is the category's own,
    /// decode into the category's DTO.
    pub fn accepts(&self, body: &Value) -> bool {
        self.shape.matches(body) && (self.shape != self.category.shape() || self.category.decodes(body))
    }
}
