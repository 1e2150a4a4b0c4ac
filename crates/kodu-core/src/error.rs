//! Error types for form editing and validation.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while editing or validating a form draft.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    /// A positional edit referenced a row that does not exist.
    #[error("no {group} entry at position {index}")]
    OutOfRange {
        /// Repeating group being edited.
        group: &'static str,
        /// Requested position.
        index: usize,
    },
    /// A field name did not match any field of the edited record.
    #[error("unknown field '{field}'")]
    UnknownField {
        /// Field name supplied by the caller.
        field: String,
    },
    /// A required field was blank.
    #[error("{field} is required")]
    Required {
        /// Path of the missing field.
        field: String,
    },
    /// A field held a value that could not be accepted.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Path of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// An attendance change referenced a student outside the roster.
    #[error("student '{id}' is not on this roster")]
    UnknownStudent {
        /// Student id supplied by the caller.
        id: String,
    },
}

impl FormError {
    pub(crate) fn required(field: impl Into<String>) -> Self {
        Self::Required {
            field: field.into(),
        }
    }

    pub(crate) fn unknown_field(field: &str) -> Self {
        Self::UnknownField {
            field: field.to_string(),
        }
    }
}

/// Convenience alias for form operations.
pub type FormResult<T> = Result<T, FormError>;

/// Fail with [`FormError::Required`] when `value` is blank.
pub(crate) fn require(field: impl Into<String>, value: &str) -> FormResult<()> {
    if value.trim().is_empty() {
        Err(FormError::required(field))
    } else {
        Ok(())
    }
}

/// Parse a required calendar date (`YYYY-MM-DD`, zero padding optional).
///
/// # Errors
///
/// Returns [`FormError::Required`] when blank, or [`FormError::Invalid`] when
/// the value is not a real date.
pub(crate) fn require_date(field: impl Into<String>, value: &str) -> FormResult<NaiveDate> {
    let field = field.into();
    require(field.as_str(), value)?;
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| FormError::Invalid {
        field,
        reason: "expected a date as YYYY-MM-DD",
    })
}

/// Canonical `YYYY-MM-DD` form of a date field, or the trimmed input when it
/// does not parse.
pub(crate) fn iso_date(value: &str) -> String {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_or_else(|_| value.trim().to_string(), |date| date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_date_accepts_unpadded_and_rejects_prose() {
        assert_eq!(
            require_date("startDate", " 2024-6-1 "),
            NaiveDate::from_ymd_opt(2024, 6, 1).ok_or(FormError::required("startDate"))
        );
        assert_eq!(
            require_date("startDate", "June 1"),
            Err(FormError::Invalid {
                field: "startDate".into(),
                reason: "expected a date as YYYY-MM-DD"
            })
        );
        assert!(matches!(
            require_date("startDate", "2024-02-30"),
            Err(FormError::Invalid { .. })
        ));
        assert_eq!(
            require_date("startDate", ""),
            Err(FormError::required("startDate"))
        );
    }

    #[test]
    fn iso_date_pads_parsed_values() {
        assert_eq!(iso_date("2024-6-1"), "2024-06-01");
        assert_eq!(iso_date(" soon "), "soon");
    }
}
