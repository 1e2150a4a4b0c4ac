//! Student profile editing.

use kodu_api_models::{StudentProfile, StudentProfileEnvelope, UpdateProfileRequest};
use serde_json::Value;

use crate::error::{FormError, FormResult};

/// Error text when a profile submit carries nothing.
pub const NO_CHANGES: &str = "No changes detected!";

/// Editable subset of a student profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    /// Student phone.
    pub phone_number: String,
    /// Student WhatsApp number.
    pub whatsapp_number: String,
    /// Parent phone.
    pub parent_phone_number: String,
    /// Highest education.
    pub education: String,
    /// Selected course ids.
    pub enrolled_courses: Vec<String>,
}

impl From<&StudentProfile> for ProfileForm {
    fn from(profile: &StudentProfile) -> Self {
        Self {
            phone_number: profile.phone_number.clone(),
            whatsapp_number: profile.whatsapp_number.clone(),
            parent_phone_number: profile.parent_phone_number.clone(),
            education: profile.education.clone(),
            enrolled_courses: profile.enrolled_courses.clone(),
        }
    }
}

impl ProfileForm {
    /// Set one text field by its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] for anything but the four text
    /// fields.
    pub fn set_field(&mut self, field: &str, value: &str) -> FormResult<()> {
        let slot = match field {
            "phoneNumber" => &mut self.phone_number,
            "whatsappNumber" => &mut self.whatsapp_number,
            "parentPhoneNumber" => &mut self.parent_phone_number,
            "education" => &mut self.education,
            other => return Err(FormError::unknown_field(other)),
        };
        value.clone_into(slot);
        Ok(())
    }

    /// Replace the course selection.
    pub fn set_courses(&mut self, course_ids: Vec<String>) {
        self.enrolled_courses = course_ids;
    }

    /// Whether the form differs from a blank profile. A blank form has
    /// nothing worth submitting.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        *self != Self::default()
    }

    /// Request body for the profile update.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Invalid`] carrying [`NO_CHANGES`] for a blank form.
    pub fn to_request(&self) -> FormResult<UpdateProfileRequest> {
        if !self.is_changed() {
            return Err(FormError::Invalid {
                field: "profile".into(),
                reason: NO_CHANGES,
            });
        }
        Ok(UpdateProfileRequest {
            phone_number: self.phone_number.trim().to_string(),
            whatsapp_number: self.whatsapp_number.trim().to_string(),
            parent_phone_number: self.parent_phone_number.trim().to_string(),
            education: self.education.trim().to_string(),
            enrolled_courses: self.enrolled_courses.clone(),
        })
    }
}

/// Decode the body of the student profile endpoint, which wraps the record
/// in `updatedProfile`. A bare profile is accepted too.
///
/// # Errors
///
/// Returns the decoder error when the body matches neither shape.
pub fn decode_profile(raw: Value) -> Result<StudentProfile, serde_json::Error> {
    if raw.get("updatedProfile").is_some() {
        serde_json::from_value::<StudentProfileEnvelope>(raw).map(|envelope| envelope.updated_profile)
    } else {
        serde_json::from_value(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kodu_test_support::fixtures::student;
    use serde_json::json;

    #[test]
    fn seeded_from_profile() {
        let mut profile = student("s1", "Asha");
        profile.phone_number = "98450 00000".into();
        profile.enrolled_courses = vec!["c1".into()];
        let form = ProfileForm::from(&profile);
        assert_eq!(form.phone_number, "98450 00000");
        assert_eq!(form.enrolled_courses, vec!["c1".to_string()]);
        assert!(form.is_changed());
    }

    #[test]
    fn blank_form_reports_no_changes() {
        let form = ProfileForm::default();
        assert!(!form.is_changed());
        let err = form.to_request().expect_err("blank form");
        assert!(err.to_string().contains(NO_CHANGES));
    }

    #[test]
    fn edits_by_field_name() -> FormResult<()> {
        let mut form = ProfileForm::default();
        form.set_field("education", "B.Sc")?;
        form.set_field("parentPhoneNumber", "99000 11111")?;
        form.set_courses(vec!["c2".into(), "c3".into()]);
        assert!(form.set_field("name", "x").is_err());
        let request = form.to_request()?;
        assert_eq!(request.education, "B.Sc");
        assert_eq!(request.parent_phone_number, "99000 11111");
        assert_eq!(request.enrolled_courses.len(), 2);
        Ok(())
    }

    #[test]
    fn profile_decodes_wrapped_or_bare() -> Result<(), serde_json::Error> {
        let wrapped = decode_profile(json!({
            "updatedProfile": { "_id": "s1", "name": "Asha", "batchId": "b1" }
        }))?;
        assert_eq!(wrapped.batch_id.as_deref(), Some("b1"));
        let bare = decode_profile(json!({ "_id": "s2", "name": "Bilal" }))?;
        assert_eq!(bare.id, "s2");
        assert!(decode_profile(json!(["not", "a", "profile"])).is_err());
        Ok(())
    }
}
