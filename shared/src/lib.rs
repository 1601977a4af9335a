//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the dashboard client and the backend API.
//! Every dashboard section payload has exactly one DTO here, and both the real backend and
//! the client's demonstration data source serialize through these types, which keeps the two
//! byte-for-byte compatible.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::common`]**: Roles, profiles, courses, grades, events
//!   - **[`dto::admin`]**: Administrator directory and summary counters
//!   - **[`dto::faculty`]**: Faculty summary counters
//!   - **[`dto::parent`]**: Parent-facing child records
//!   - **[`dto::student`]**: Student announcements
//!   - **[`dto::actions`]**: Request bodies for mutating actions
//! - **[`utils`]**: Shared numeric helpers (percentages, letter grades)
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON using the default `serde` behavior:
//! - Field names use **snake_case**
//! - Optional fields are omitted from JSON when `None`
//! - Summary and record types implement `Default`, so a zeroed payload always exists
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::admin::AdminSummary;
//!
//! let summary: AdminSummary = serde_json::from_str(
//!     r#"{"users":156,"faculty":23,"students":125,"admins":8,"courses":42,"departments":6,"active_sessions":17}"#,
//! ).unwrap();
//! assert_eq!(summary.users, 156);
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library and everything here is public API
pub use dto::*;
pub use utils::*;
