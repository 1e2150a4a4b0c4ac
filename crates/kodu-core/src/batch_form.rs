//! Batch creation form.

use kodu_api_models::CreateBatchRequest;

use crate::error::{FormError, FormResult, iso_date, require, require_date};

/// Editable batch form. Scalar fields stay as entered until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchDraft {
    /// Selected course.
    pub course_id: String,
    /// Batch label.
    pub batch_name: String,
    /// First day (`YYYY-MM-DD`).
    pub start_date: String,
    /// Last day (`YYYY-MM-DD`).
    pub end_date: String,
    /// Daily start time.
    pub start_time: String,
    /// Daily end time.
    pub end_time: String,
    /// Selected student ids, in selection order.
    pub students: Vec<String>,
}

impl BatchDraft {
    /// Blank form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar field by its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] for names outside the form.
    pub fn set_field(&mut self, field: &str, value: &str) -> FormResult<()> {
        let slot = match field {
            "courseId" => &mut self.course_id,
            "batchName" => &mut self.batch_name,
            "startDate" => &mut self.start_date,
            "endDate" => &mut self.end_date,
            "startTime" => &mut self.start_time,
            "endTime" => &mut self.end_time,
            other => return Err(FormError::unknown_field(other)),
        };
        value.clone_into(slot);
        Ok(())
    }

    /// Select the student when absent, deselect when present. Returns whether
    /// the student is selected afterwards.
    pub fn toggle_student(&mut self, student_id: &str) -> bool {
        if let Some(position) = self.students.iter().position(|id| id == student_id) {
            self.students.remove(position);
            false
        } else {
            self.students.push(student_id.to_string());
            true
        }
    }

    /// Whether the student is selected.
    #[must_use]
    pub fn is_selected(&self, student_id: &str) -> bool {
        self.students.iter().any(|id| id == student_id)
    }

    /// Require every scalar field. An empty student selection is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Required`] for the first blank field, or
    /// [`FormError::Invalid`] when a date does not parse or the batch ends
    /// before it starts.
    pub fn validate(&self) -> FormResult<()> {
        require("courseId", &self.course_id)?;
        require("batchName", &self.batch_name)?;
        let start = require_date("startDate", &self.start_date)?;
        let end = require_date("endDate", &self.end_date)?;
        require("startTime", &self.start_time)?;
        require("endTime", &self.end_time)?;
        if end < start {
            return Err(FormError::Invalid {
                field: "endDate".into(),
                reason: "must not be before the start date",
            });
        }
        Ok(())
    }

    /// Request body for batch creation.
    #[must_use]
    pub fn to_request(&self) -> CreateBatchRequest {
        CreateBatchRequest {
            course_id: self.course_id.trim().to_string(),
            batch_name: self.batch_name.trim().to_string(),
            start_date: iso_date(&self.start_date),
            end_date: iso_date(&self.end_date),
            start_time: self.start_time.trim().to_string(),
            end_time: self.end_time.trim().to_string(),
            students: self.students.clone(),
        }
    }

    /// Reset every field after a successful create.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> BatchDraft {
        let mut draft = BatchDraft::new();
        for (field, value) in [
            ("courseId", "c1"),
            ("batchName", "June Morning"),
            ("startDate", "2024-06-01"),
            ("endDate", "2024-08-31"),
            ("startTime", "09:00"),
            ("endTime", "11:00"),
        ] {
            draft.set_field(field, value).expect("known field");
        }
        draft
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut draft = BatchDraft::new();
        assert!(draft.toggle_student("s1"));
        assert!(draft.toggle_student("s2"));
        assert!(!draft.toggle_student("s1"));
        assert_eq!(draft.students, vec!["s2".to_string()]);
        assert!(draft.is_selected("s2"));
    }

    #[test]
    fn validate_requires_scalars() {
        let mut draft = filled();
        assert_eq!(draft.validate(), Ok(()));
        draft.start_time = "  ".into();
        assert_eq!(
            draft.validate(),
            Err(FormError::Required {
                field: "startTime".into()
            })
        );
    }

    #[test]
    fn validate_rejects_inverted_dates() {
        let mut draft = filled();
        draft.end_date = "2024-05-01".into();
        assert!(matches!(draft.validate(), Err(FormError::Invalid { .. })));
    }

    #[test]
    fn validate_parses_dates_instead_of_comparing_text() {
        let mut draft = filled();
        draft.start_date = "2024-6-1".into();
        draft.end_date = "2024-06-02".into();
        assert_eq!(draft.validate(), Ok(()));
        assert_eq!(draft.to_request().start_date, "2024-06-01");

        draft.start_date = "June 1".into();
        draft.end_date = "yesterday-ish".into();
        assert_eq!(
            draft.validate(),
            Err(FormError::Invalid {
                field: "startDate".into(),
                reason: "expected a date as YYYY-MM-DD"
            })
        );
    }

    #[test]
    fn request_carries_selection_and_clear_resets() {
        let mut draft = filled();
        draft.toggle_student("s9");
        let request = draft.to_request();
        assert_eq!(request.batch_name, "June Morning");
        assert_eq!(request.students, vec!["s9".to_string()]);
        draft.clear();
        assert_eq!(draft, BatchDraft::default());
        assert!(draft.set_field("room", "x").is_err());
    }
}
