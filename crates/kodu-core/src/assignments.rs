//! Assignment upload, submission links and submission tracking.

use kodu_api_models::{Assignment, SubmitAssignmentRequest};
use url::Url;

use crate::error::{FormError, FormResult};
use crate::fetch::FetchFailure;

/// Alert shown when the upload form is incomplete.
pub const MISSING_UPLOAD_FIELDS: &str = "Please fill all fields";

/// Whether `student_id` appears among the assignment's submissions, whether
/// the backend sent bare ids or populated student records.
#[must_use]
pub fn is_submitted(assignment: &Assignment, student_id: &str) -> bool {
    assignment
        .submissions
        .iter()
        .any(|submission| submission.student.id() == student_id)
}

/// Submission link of `student_id`, when they submitted one.
#[must_use]
pub fn submission_link<'a>(assignment: &'a Assignment, student_id: &str) -> Option<&'a str> {
    assignment
        .submissions
        .iter()
        .find(|submission| submission.student.id() == student_id)
        .and_then(|submission| submission.submission_link.as_deref())
}

/// A validated `http(s)` link to submitted work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionLink(Url);

impl SubmissionLink {
    /// Parse and check a submission link.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Required`] for blank input and
    /// [`FormError::Invalid`] for unparsable or non-http(s) URLs.
    pub fn parse(raw: &str) -> FormResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(FormError::required("submissionLink"));
        }
        let url = Url::parse(raw).map_err(|_| FormError::Invalid {
            field: "submissionLink".into(),
            reason: "is not a valid URL",
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FormError::Invalid {
                field: "submissionLink".into(),
                reason: "must use http or https",
            });
        }
        Ok(Self(url))
    }

    /// Link text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Request body for the submit call.
    #[must_use]
    pub fn to_request(&self) -> SubmitAssignmentRequest {
        SubmitAssignmentRequest {
            submission_link: self.0.to_string(),
        }
    }
}

/// Upload form state. The file itself stays with the front end; only its
/// name is tracked here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadDraft {
    /// Target batch.
    pub batch_id: String,
    /// Assignment title.
    pub title: String,
    /// Name of the chosen file.
    pub file_name: Option<String>,
}

impl UploadDraft {
    /// Whether every field is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.batch_id.trim().is_empty()
            && !self.title.trim().is_empty()
            && self
                .file_name
                .as_deref()
                .is_some_and(|name| !name.trim().is_empty())
    }

    /// Check the form before building the multipart body.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Invalid`] carrying the "fill all fields" alert.
    pub fn validate(&self) -> FormResult<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(FormError::Invalid {
                field: "upload".into(),
                reason: MISSING_UPLOAD_FIELDS,
            })
        }
    }
}

/// Treat a 404 from the per-title listing as "no assignments".
///
/// # Errors
///
/// Passes every other failure through.
pub fn empty_when_missing<T>(result: Result<Vec<T>, FetchFailure>) -> Result<Vec<T>, FetchFailure> {
    match result {
        Err(failure) if failure.is_not_found() => Ok(Vec::new()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kodu_test_support::fixtures::assignment_with_submissions;
    use serde_json::json;

    #[test]
    fn submission_detected_for_both_student_shapes() {
        let assignment = assignment_with_submissions(json!([
            {"student": "s1", "submissionLink": "https://github.com/a/b"},
            {"student": {"_id": "s2", "name": "Bilal"}}
        ]));
        assert!(is_submitted(&assignment, "s1"));
        assert!(is_submitted(&assignment, "s2"));
        assert!(!is_submitted(&assignment, "s3"));
        assert_eq!(
            submission_link(&assignment, "s1"),
            Some("https://github.com/a/b")
        );
        assert_eq!(submission_link(&assignment, "s2"), None);
    }

    #[test]
    fn links_must_be_http() {
        let link = SubmissionLink::parse(" https://github.com/kodu/todo ").expect("valid link");
        assert_eq!(
            link.to_request().submission_link,
            "https://github.com/kodu/todo"
        );
        assert!(matches!(
            SubmissionLink::parse(""),
            Err(FormError::Required { .. })
        ));
        assert!(matches!(
            SubmissionLink::parse("ftp://files/x"),
            Err(FormError::Invalid { .. })
        ));
        assert!(matches!(
            SubmissionLink::parse("github.com/x"),
            Err(FormError::Invalid { .. })
        ));
    }

    #[test]
    fn upload_requires_every_field() {
        let mut draft = UploadDraft {
            batch_id: "b1".into(),
            title: "Week 1".into(),
            file_name: None,
        };
        let err = draft.validate().expect_err("file missing");
        assert!(err.to_string().contains(MISSING_UPLOAD_FIELDS));
        draft.file_name = Some("week1.pdf".into());
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn not_found_means_no_assignments() {
        let missing: Result<Vec<u8>, _> = Err(FetchFailure::from_status(404, ""));
        assert_eq!(empty_when_missing(missing), Ok(Vec::new()));
        let broken: Result<Vec<u8>, _> = Err(FetchFailure::from_status(500, ""));
        assert!(empty_when_missing(broken).is_err());
    }
}
