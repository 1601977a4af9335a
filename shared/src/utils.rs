//! # Shared Utility Functions
//!
//! Numeric and date helpers used by the backend, the dashboard client, and its demo data.
//!
//! - [`percentage`] - Safe percentage with a zero denominator
//! - [`letter_grade`] - Map a score percentage to a letter
//! - [`is_upcoming`] - Whether an ISO date falls on or after a reference day
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{letter_grade, percentage};
//!
//! assert_eq!(percentage(125.0, 156.0).round(), 80.0);
//! assert_eq!(letter_grade(91.5), "A");
//! ```

use chrono::NaiveDate;

/// `part / whole * 100`, or `0.0` when `whole` is zero or negative.
///
/// Dashboards render this directly, so it must never produce NaN or infinity.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 || !whole.is_finite() || !part.is_finite() {
        return 0.0;
    }
    part / whole * 100.0
}

/// Letter grade for a score percentage (0.0..=100.0).
pub fn letter_grade(score_pct: f64) -> &'static str {
    match score_pct {
        s if s >= 90.0 => "A",
        s if s >= 80.0 => "B",
        s if s >= 70.0 => "C",
        s if s >= 60.0 => "D",
        _ => "F",
    }
}

/// Returns true when `date` (`YYYY-MM-DD`) is on or after `today`.
///
/// Unparseable dates are not upcoming.
pub fn is_upcoming(date: &str, today: NaiveDate) -> bool {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d >= today)
        .unwrap_or(false)
}
