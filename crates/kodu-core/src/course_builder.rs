//! Course builder draft with repeating subject, timing and topic groups.
//!
//! # Design
//! - Edits address rows by position and fields by their wire name, the way
//!   form inputs report them.
//! - A rejected edit leaves the draft untouched.
//! - The draft converts to the shared request type only on submit.

use kodu_api_models::{BatchTiming, CreateCourseRequest, Subject, Topic};

use crate::error::{FormError, FormResult, require};

/// One batch timing row inside a subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchTimingDraft {
    /// Batch label.
    pub batch_name: String,
    /// Start time (`HH:MM`).
    pub start_time: String,
    /// End time (`HH:MM`).
    pub end_time: String,
}

impl BatchTimingDraft {
    fn set(&mut self, field: &str, value: &str) -> FormResult<()> {
        let slot = match field {
            "batchName" => &mut self.batch_name,
            "startTime" => &mut self.start_time,
            "endTime" => &mut self.end_time,
            other => return Err(FormError::unknown_field(other)),
        };
        value.clone_into(slot);
        Ok(())
    }
}

/// One subject row with its nested timings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectDraft {
    /// Subject name.
    pub subject_name: String,
    /// Timings offered for the subject.
    pub batch_timings: Vec<BatchTimingDraft>,
}

impl Default for SubjectDraft {
    fn default() -> Self {
        Self {
            subject_name: String::new(),
            batch_timings: vec![BatchTimingDraft::default()],
        }
    }
}

/// One topic row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicDraft {
    /// Topic name.
    pub topic_name: String,
    /// Free-form topic description.
    pub description: String,
}

impl TopicDraft {
    fn set(&mut self, field: &str, value: &str) -> FormResult<()> {
        let slot = match field {
            "topicName" => &mut self.topic_name,
            "description" => &mut self.description,
            other => return Err(FormError::unknown_field(other)),
        };
        value.clone_into(slot);
        Ok(())
    }
}

/// Editable course form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    /// Course name.
    pub course_name: String,
    /// Course description.
    pub description: String,
    /// Subjects in display order.
    pub subjects: Vec<SubjectDraft>,
    /// Topics in display order.
    pub topics: Vec<TopicDraft>,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            course_name: String::new(),
            description: String::new(),
            subjects: vec![SubjectDraft::default()],
            topics: vec![TopicDraft::default()],
        }
    }
}

fn out_of_range(group: &'static str, index: usize) -> FormError {
    FormError::OutOfRange { group, index }
}

impl CourseDraft {
    /// Blank draft with one subject (holding one timing) and one topic.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank subject with one blank timing.
    pub fn add_subject(&mut self) {
        self.subjects.push(SubjectDraft::default());
    }

    /// Remove the subject at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::OutOfRange`] when no subject exists at `index`.
    pub fn remove_subject(&mut self, index: usize) -> FormResult<()> {
        if index >= self.subjects.len() {
            return Err(out_of_range("subject", index));
        }
        self.subjects.remove(index);
        Ok(())
    }

    /// Set a field of the subject at `index`. Only `subjectName` is editable.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::OutOfRange`] or [`FormError::UnknownField`].
    pub fn set_subject_field(&mut self, index: usize, field: &str, value: &str) -> FormResult<()> {
        let subject = self
            .subjects
            .get_mut(index)
            .ok_or_else(|| out_of_range("subject", index))?;
        if field != "subjectName" {
            return Err(FormError::unknown_field(field));
        }
        value.clone_into(&mut subject.subject_name);
        Ok(())
    }

    /// Append a blank timing to the subject at `subject`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::OutOfRange`] when the subject does not exist.
    pub fn add_batch_timing(&mut self, subject: usize) -> FormResult<()> {
        self.subjects
            .get_mut(subject)
            .ok_or_else(|| out_of_range("subject", subject))?
            .batch_timings
            .push(BatchTimingDraft::default());
        Ok(())
    }

    /// Remove timing `timing` of subject `subject`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::OutOfRange`] when either position is missing.
    pub fn remove_batch_timing(&mut self, subject: usize, timing: usize) -> FormResult<()> {
        let timings = &mut self
            .subjects
            .get_mut(subject)
            .ok_or_else(|| out_of_range("subject", subject))?
            .batch_timings;
        if timing >= timings.len() {
            return Err(out_of_range("batch timing", timing));
        }
        timings.remove(timing);
        Ok(())
    }

    /// Set `batchName`, `startTime` or `endTime` of one timing.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::OutOfRange`] or [`FormError::UnknownField`].
    pub fn set_batch_timing_field(
        &mut self,
        subject: usize,
        timing: usize,
        field: &str,
        value: &str,
    ) -> FormResult<()> {
        self.subjects
            .get_mut(subject)
            .ok_or_else(|| out_of_range("subject", subject))?
            .batch_timings
            .get_mut(timing)
            .ok_or_else(|| out_of_range("batch timing", timing))?
            .set(field, value)
    }

    /// Append a blank topic.
    pub fn add_topic(&mut self) {
        self.topics.push(TopicDraft::default());
    }

    /// Remove the topic at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::OutOfRange`] when no topic exists at `index`.
    pub fn remove_topic(&mut self, index: usize) -> FormResult<()> {
        if index >= self.topics.len() {
            return Err(out_of_range("topic", index));
        }
        self.topics.remove(index);
        Ok(())
    }

    /// Set `topicName` or `description` of the topic at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::OutOfRange`] or [`FormError::UnknownField`].
    pub fn set_topic_field(&mut self, index: usize, field: &str, value: &str) -> FormResult<()> {
        self.topics
            .get_mut(index)
            .ok_or_else(|| out_of_range("topic", index))?
            .set(field, value)
    }

    /// Check every required field, reporting the first blank one.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Required`] naming the field path, e.g.
    /// `subjects[1].batchTimings[0].startTime`.
    pub fn validate(&self) -> FormResult<()> {
        require("courseName", &self.course_name)?;
        require("description", &self.description)?;
        for (s, subject) in self.subjects.iter().enumerate() {
            require(format!("subjects[{s}].subjectName"), &subject.subject_name)?;
            for (b, timing) in subject.batch_timings.iter().enumerate() {
                let prefix = format!("subjects[{s}].batchTimings[{b}]");
                require(format!("{prefix}.batchName"), &timing.batch_name)?;
                require(format!("{prefix}.startTime"), &timing.start_time)?;
                require(format!("{prefix}.endTime"), &timing.end_time)?;
            }
        }
        for (t, topic) in self.topics.iter().enumerate() {
            require(format!("topics[{t}].topicName"), &topic.topic_name)?;
            require(format!("topics[{t}].description"), &topic.description)?;
        }
        Ok(())
    }

    /// Request body for course creation.
    #[must_use]
    pub fn to_request(&self) -> CreateCourseRequest {
        CreateCourseRequest {
            course_name: self.course_name.trim().to_string(),
            description: self.description.trim().to_string(),
            subjects: self
                .subjects
                .iter()
                .map(|subject| Subject {
                    subject_name: subject.subject_name.trim().to_string(),
                    batch_timings: subject
                        .batch_timings
                        .iter()
                        .map(|timing| BatchTiming {
                            batch_name: timing.batch_name.trim().to_string(),
                            start_time: timing.start_time.trim().to_string(),
                            end_time: timing.end_time.trim().to_string(),
                        })
                        .collect(),
                })
                .collect(),
            topics: self
                .topics
                .iter()
                .map(|topic| Topic {
                    topic_name: topic.topic_name.trim().to_string(),
                    description: topic.description.trim().to_string(),
                })
                .collect(),
        }
    }
}

impl From<CreateCourseRequest> for CourseDraft {
    fn from(request: CreateCourseRequest) -> Self {
        Self {
            course_name: request.course_name,
            description: request.description,
            subjects: request
                .subjects
                .into_iter()
                .map(|subject| SubjectDraft {
                    subject_name: subject.subject_name,
                    batch_timings: subject
                        .batch_timings
                        .into_iter()
                        .map(|timing| BatchTimingDraft {
                            batch_name: timing.batch_name,
                            start_time: timing.start_time,
                            end_time: timing.end_time,
                        })
                        .collect(),
                })
                .collect(),
            topics: request
                .topics
                .into_iter()
                .map(|topic| TopicDraft {
                    topic_name: topic.topic_name,
                    description: topic.description,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CourseDraft {
        let mut draft = CourseDraft::new();
        draft.course_name = "Full Stack".into();
        draft.description = "MERN track".into();
        draft.set_subject_field(0, "subjectName", "React").expect("subject");
        draft
            .set_batch_timing_field(0, 0, "batchName", "Morning")
            .expect("batch name");
        draft
            .set_batch_timing_field(0, 0, "startTime", "09:00")
            .expect("start");
        draft.set_batch_timing_field(0, 0, "endTime", "11:00").expect("end");
        draft.set_topic_field(0, "topicName", "Hooks").expect("topic");
        draft
            .set_topic_field(0, "description", "State and effects")
            .expect("topic description");
        draft
    }

    #[test]
    fn new_draft_has_one_of_each_group() {
        let draft = CourseDraft::new();
        assert_eq!(draft.subjects.len(), 1);
        assert_eq!(draft.subjects[0].batch_timings.len(), 1);
        assert_eq!(draft.topics.len(), 1);
    }

    #[test]
    fn add_then_remove_by_position() -> FormResult<()> {
        let mut draft = CourseDraft::new();
        draft.add_subject();
        draft.set_subject_field(1, "subjectName", "Node")?;
        draft.add_batch_timing(1)?;
        assert_eq!(draft.subjects[1].batch_timings.len(), 2);
        draft.remove_batch_timing(1, 0)?;
        assert_eq!(draft.subjects[1].batch_timings.len(), 1);
        draft.remove_subject(0)?;
        assert_eq!(draft.subjects.len(), 1);
        assert_eq!(draft.subjects[0].subject_name, "Node");
        draft.add_topic();
        draft.remove_topic(1)?;
        assert_eq!(draft.topics.len(), 1);
        Ok(())
    }

    #[test]
    fn rejected_edits_leave_draft_unchanged() {
        let mut draft = filled();
        let before = draft.clone();
        assert_eq!(
            draft.set_batch_timing_field(0, 0, "room", "A1"),
            Err(FormError::UnknownField {
                field: "room".into()
            })
        );
        assert!(matches!(
            draft.set_topic_field(4, "topicName", "x"),
            Err(FormError::OutOfRange { group: "topic", index: 4 })
        ));
        assert!(draft.remove_subject(3).is_err());
        assert!(draft.remove_batch_timing(0, 9).is_err());
        assert!(draft.add_batch_timing(2).is_err());
        assert!(draft.set_subject_field(0, "topicName", "x").is_err());
        assert_eq!(draft, before);
    }

    #[test]
    fn validate_reports_first_blank_path() {
        let mut draft = filled();
        assert_eq!(draft.validate(), Ok(()));
        draft.add_batch_timing(0).expect("timing");
        draft
            .set_batch_timing_field(0, 1, "batchName", "Evening")
            .expect("name");
        assert_eq!(
            draft.validate(),
            Err(FormError::Required {
                field: "subjects[0].batchTimings[1].startTime".into()
            })
        );
        draft.remove_batch_timing(0, 1).expect("remove timing");
        draft.set_topic_field(0, "description", " ").expect("topic description");
        assert_eq!(
            draft.validate(),
            Err(FormError::Required {
                field: "topics[0].description".into()
            })
        );
        draft.description.clear();
        assert_eq!(
            draft.validate(),
            Err(FormError::Required {
                field: "description".into()
            })
        );
        let blank = CourseDraft::new();
        assert_eq!(
            blank.validate(),
            Err(FormError::Required {
                field: "courseName".into()
            })
        );
    }

    #[test]
    fn request_mirrors_draft() {
        let request = filled().to_request();
        assert_eq!(request.course_name, "Full Stack");
        assert_eq!(request.subjects[0].batch_timings[0].start_time, "09:00");
        assert_eq!(request.topics[0].topic_name, "Hooks");
        let round = CourseDraft::from(request.clone());
        assert_eq!(round.to_request(), request);
    }
}
