//! Display helpers shared by the pages.

use chrono::DateTime;
use kodu_api_models::{AttendanceStatus, Batch, PersonRef};
use kodu_core::FetchFailure;
use kodu_core::attendance::AttendanceBand;

/// Shown in place of a missing value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Alert text after a backend call fails. A rejected session asks the user
/// to log in again; otherwise the backend message wins over `fallback`.
#[must_use]
pub fn failure_text(failure: &FetchFailure, fallback: &str) -> String {
    if failure.requires_login() {
        return "Your session has expired. Please log in again.".to_string();
    }
    failure.user_message(fallback)
}

/// Attendance percentage with two decimals.
#[must_use]
pub fn percent_label(percentage: f64) -> String {
    format!("{percentage:.2}%")
}

/// CSS class colouring an attendance percentage.
#[must_use]
pub const fn band_class(band: AttendanceBand) -> &'static str {
    match band {
        AttendanceBand::Good => "text-green",
        AttendanceBand::Fair => "text-amber",
        AttendanceBand::Low => "text-red",
    }
}

/// Capitalised attendance status.
#[must_use]
pub const fn status_label(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => "Present",
        AttendanceStatus::Absent => "Absent",
        AttendanceStatus::Late => "Late",
    }
}

/// "Name (email)" for a populated reference, the bare id otherwise.
#[must_use]
pub fn person_line(person: Option<&PersonRef>) -> String {
    match person {
        None => NOT_AVAILABLE.to_string(),
        Some(person) => match person.email() {
            Some(email) => format!("{} ({email})", person.display_name()),
            None => person.display_name().to_string(),
        },
    }
}

/// Paise rendered as rupees, e.g. `250050` as `₹2500.50`.
#[must_use]
pub fn rupees(paise: u64) -> String {
    format!("₹{}.{:02}", paise / 100, paise % 100)
}

/// Option text for a batch picker.
#[must_use]
pub fn batch_label(batch: &Batch) -> String {
    match (batch.start_date.as_deref(), batch.end_date.as_deref()) {
        (Some(start), Some(end)) => format!(
            "{} ({} to {})",
            batch.batch_name,
            date_part(start),
            date_part(end)
        ),
        _ => batch.batch_name.clone(),
    }
}

/// `YYYY-MM-DD` prefix of an ISO timestamp.
#[must_use]
pub fn date_part(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}

/// Calendar date (UTC) of a JavaScript millisecond timestamp, formatted for a
/// date input.
#[must_use]
pub fn date_from_millis(millis: f64) -> Option<String> {
    if !millis.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let millis = millis as i64;
    DateTime::from_timestamp_millis(millis).map(|moment| moment.format("%Y-%m-%d").to_string())
}
