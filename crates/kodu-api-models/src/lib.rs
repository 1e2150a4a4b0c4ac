#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Kodu ERP backend.
//!
//! The web UI and the CLI both encode requests and decode responses through
//! these types so the wire contract lives in one place. The backend speaks
//! camelCase JSON and stores records with Mongo-style `_id` strings; payment
//! orders are relayed from the gateway with snake_case keys.
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Generic confirmation/error body returned by most backend endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ApiMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Human-readable message supplied by the backend.
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Success flag some endpoints add next to the message.
    pub success: Option<bool>,
}

impl ApiMessage {
    /// Message text, or the provided fallback when the backend sent none.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Account role encoded in the bearer token and on user records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Institute administrator.
    Admin,
    /// Trainer running courses and batches.
    Trainer,
    /// Counsellor approving students and handling fees.
    Counsellor,
    /// Enrolled student.
    Student,
}

impl Role {
    /// All roles, in the order offered by the registration form.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Trainer, Self::Counsellor, Self::Student, Self::Admin]
    }

    /// Wire representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Trainer => "trainer",
            Self::Counsellor => "counsellor",
            Self::Student => "student",
        }
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "trainer" => Ok(Self::Trainer),
            "counsellor" | "counselor" => Ok(Self::Counsellor),
            "student" => Ok(Self::Student),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Approval lifecycle of a registered account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting an admin or counsellor decision.
    Pending,
    /// Accepted.
    Approved,
    /// Declined.
    Rejected,
}

/// Reference to a person that the backend may send either as a bare id or as
/// a populated record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PersonRef {
    /// Unpopulated reference holding only the record id.
    Id(String),
    /// Populated reference.
    Record(PersonSummary),
}

/// Populated person reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PersonSummary {
    #[serde(rename = "_id", default)]
    /// Record identifier.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Display name.
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Contact email.
    pub email: Option<String>,
}

impl PersonRef {
    /// Identifier of the referenced record regardless of shape.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Record(summary) => &summary.id,
        }
    }

    /// Name when populated, otherwise the raw id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Record(summary) => summary.name.as_deref().unwrap_or(&summary.id),
        }
    }

    /// Email when the reference is populated.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Record(summary) => summary.email.as_deref(),
        }
    }
}

/// Registered account as listed by the admin approval queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "_id")]
    /// Record identifier.
    pub id: String,
    #[serde(default)]
    /// Display name.
    pub name: String,
    #[serde(default)]
    /// Login email.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Account role.
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Approval state when reported.
    pub status: Option<ApprovalStatus>,
}

/// Student record including the profile fields students edit themselves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(rename = "_id", default)]
    /// Record identifier.
    pub id: String,
    #[serde(default)]
    /// Display name.
    pub name: String,
    #[serde(default)]
    /// Login email.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Account role (always student when present).
    pub role: Option<Role>,
    #[serde(default)]
    /// Primary phone number.
    pub phone_number: String,
    #[serde(default)]
    /// WhatsApp number.
    pub whatsapp_number: String,
    #[serde(default)]
    /// Parent or guardian phone number.
    pub parent_phone_number: String,
    #[serde(default)]
    /// Education summary.
    pub education: String,
    #[serde(default)]
    /// Course ids the student is enrolled in.
    pub enrolled_courses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Batch the student belongs to.
    pub batch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Counsellor or admin that approved the student.
    pub approved_by: Option<PersonRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Approval state when reported.
    pub status: Option<ApprovalStatus>,
}

/// Response wrapper of `GET students/student/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileEnvelope {
    /// Current student profile.
    pub updated_profile: StudentProfile,
}

/// Profile fields a student may change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// Primary phone number.
    pub phone_number: String,
    /// WhatsApp number.
    pub whatsapp_number: String,
    /// Parent or guardian phone number.
    pub parent_phone_number: String,
    /// Education summary.
    pub education: String,
    /// Selected course ids.
    pub enrolled_courses: Vec<String>,
}

/// Credentials posted to `auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plain-text password (sent over TLS).
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
}

/// Registration form posted to `users/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Requested role.
    pub role: Role,
}

/// Decision posted to the approval endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalAction {
    /// Accept the account.
    Approve,
    /// Decline the account.
    Reject,
}

/// Body of `admin/approve/:id` and `students/approve/:id`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApprovalRequest {
    /// Requested decision.
    pub action: ApprovalAction,
}

/// One batch schedule inside a course subject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BatchTiming {
    /// Batch label.
    #[serde(default)]
    pub batch_name: String,
    /// Start time (`HH:MM`).
    #[serde(default)]
    pub start_time: String,
    /// End time (`HH:MM`).
    #[serde(default)]
    pub end_time: String,
}

/// Subject taught within a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Subject name.
    #[serde(default)]
    pub subject_name: String,
    /// Batch schedules offered for the subject.
    #[serde(default)]
    pub batch_timings: Vec<BatchTiming>,
}

/// Syllabus topic of a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Topic name.
    #[serde(default)]
    pub topic_name: String,
    /// Topic description.
    #[serde(default)]
    pub description: String,
}

/// Course as listed by `GET courses`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    /// Record identifier.
    pub id: String,
    /// Course title.
    #[serde(default)]
    pub course_name: String,
    /// Course description.
    #[serde(default)]
    pub description: String,
    /// Subjects with nested batch timings.
    #[serde(default)]
    pub subjects: Vec<Subject>,
    /// Syllabus topics.
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// Body of `courses/add-course`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    /// Course title.
    pub course_name: String,
    /// Course description.
    pub description: String,
    /// Subjects with nested batch timings.
    pub subjects: Vec<Subject>,
    /// Syllabus topics.
    pub topics: Vec<Topic>,
}

/// Scheduled cohort following a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    #[serde(rename = "_id")]
    /// Record identifier.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Course the batch follows.
    pub course_id: Option<String>,
    #[serde(default, alias = "name")]
    /// Batch label.
    pub batch_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// First day (`YYYY-MM-DD`).
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Last day (`YYYY-MM-DD`).
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Daily start time.
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Daily end time.
    pub end_time: Option<String>,
    #[serde(default)]
    /// Enrolled students.
    pub students: Vec<PersonRef>,
}

/// Wrapper of `GET batches/allbatches`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BatchList {
    /// Batches visible to the caller.
    #[serde(default)]
    pub batches: Vec<Batch>,
}

/// Wrapper of `GET batches/:id/batchwisestudents`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BatchRoster {
    /// Students enrolled in the batch.
    #[serde(default)]
    pub students: Vec<StudentProfile>,
}

/// Body of `batches/create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchRequest {
    /// Course the batch follows.
    pub course_id: String,
    /// Batch label.
    pub batch_name: String,
    /// First day.
    pub start_date: String,
    /// Last day.
    pub end_date: String,
    /// Daily start time.
    pub start_time: String,
    /// Daily end time.
    pub end_time: String,
    /// Student ids to enrol.
    pub students: Vec<String>,
}

/// Attendance mark for one student on one day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Attended.
    Present,
    /// Did not attend.
    Absent,
    /// Attended late.
    Late,
}

impl AttendanceStatus {
    /// Statuses offered by the marking form.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Present, Self::Absent, Self::Late]
    }

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "late" => Ok(Self::Late),
            other => Err(format!("unknown attendance status '{other}'")),
        }
    }
}

/// Per-student entry inside an attendance submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    /// Student id.
    pub student_id: String,
    /// Recorded status.
    pub status: AttendanceStatus,
}

/// Body of `attendance/mark-students`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    /// Batch being marked.
    pub batch_id: String,
    /// Day being marked (`YYYY-MM-DD`).
    pub date: String,
    /// One entry per rostered student.
    pub students_attendance: Vec<AttendanceEntry>,
}

/// Server-side aggregate of a student's attendance in a batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    /// Days with a recorded mark.
    #[serde(default)]
    pub total_days: u32,
    /// Days marked present.
    #[serde(default)]
    pub present_days: u32,
    /// Days marked absent.
    #[serde(default)]
    pub absent_days: u32,
    /// Days marked late.
    #[serde(default)]
    pub late_days: u32,
}

/// A student's hand-in for an assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Submitting student.
    pub student: PersonRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Repository or document link.
    pub submission_link: Option<String>,
}

/// Assignment published to a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(rename = "_id")]
    /// Record identifier.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Batch the assignment belongs to.
    pub batch_id: Option<String>,
    #[serde(default)]
    /// Assignment title.
    pub title: String,
    #[serde(default)]
    /// Download link of the assignment brief.
    pub file_url: String,
    #[serde(default)]
    /// Hand-ins received so far.
    pub submissions: Vec<Submission>,
}

/// Row of the trainer's per-batch submission overview.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRow {
    #[serde(rename = "_id", default)]
    /// Record identifier.
    pub id: String,
    #[serde(default)]
    /// Assignment title.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Assignment or hand-in file link.
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Student the row belongs to.
    pub student: Option<PersonRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Submitted link, when the student handed in.
    pub submission_link: Option<String>,
}

/// Body of `assignments/:id/submit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssignmentRequest {
    /// Repository or document link.
    pub submission_link: String,
}

/// Student question or complaint about a trainer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Complaint {
    #[serde(rename = "_id")]
    /// Record identifier.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Student who raised it.
    pub student: Option<PersonRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Trainer it concerns.
    pub trainer: Option<PersonRef>,
    #[serde(default)]
    /// Complaint text.
    pub message: String,
}

/// Body of `complaints/create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintRequest {
    /// Trainer the complaint concerns.
    pub trainer_id: String,
    /// Complaint text.
    pub message: String,
}

/// Body of `fees/set-fee`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SetFeeRequest {
    /// Student being billed.
    pub student_id: String,
    /// Total fee in rupees.
    pub total_fee: u64,
}

/// Body of `fees/create-payment-order`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Amount in paise.
    pub amount: u64,
    /// ISO currency code.
    pub currency: String,
    /// Student paying.
    pub student_id: String,
}

/// Payment order created by the gateway and relayed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentOrder {
    #[serde(alias = "orderId")]
    /// Gateway order identifier.
    pub order_id: String,
    /// Amount in paise.
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// ISO currency code.
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Hosted payment link.
    pub short_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// QR code image for the hosted link.
    pub qr_code_url: Option<String>,
}

/// Body of `fees/payment-success`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    /// Gateway payment identifier.
    pub payment_id: String,
    /// Gateway order identifier.
    pub order_id: String,
    /// Student paying.
    pub student_id: String,
    /// Total fee in rupees.
    pub total_fee: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn person_ref_accepts_both_shapes() {
        let bare: PersonRef = serde_json::from_value(json!("s1")).expect("bare id");
        assert_eq!(bare.id(), "s1");
        assert_eq!(bare.email(), None);

        let populated: PersonRef =
            serde_json::from_value(json!({"_id": "s2", "name": "Asha", "email": "a@x.in"}))
                .expect("populated ref");
        assert_eq!(populated.id(), "s2");
        assert_eq!(populated.display_name(), "Asha");
        assert_eq!(populated.email(), Some("a@x.in"));
    }

    #[test]
    fn student_profile_tolerates_missing_fields() {
        let profile: StudentProfile =
            serde_json::from_value(json!({"_id": "s1", "name": "Ravi", "batchId": "b1"}))
                .expect("profile");
        assert_eq!(profile.batch_id.as_deref(), Some("b1"));
        assert!(profile.phone_number.is_empty());
        assert!(profile.enrolled_courses.is_empty());
    }

    #[test]
    fn attendance_request_uses_wire_names() {
        let request = MarkAttendanceRequest {
            batch_id: "b1".into(),
            date: "2024-06-01".into(),
            students_attendance: vec![AttendanceEntry {
                student_id: "a".into(),
                status: AttendanceStatus::Present,
            }],
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({
                "batchId": "b1",
                "date": "2024-06-01",
                "studentsAttendance": [{"studentId": "a", "status": "present"}]
            })
        );
    }

    #[test]
    fn batch_accepts_name_alias() {
        let batch: Batch =
            serde_json::from_value(json!({"_id": "b1", "name": "Morning"})).expect("batch");
        assert_eq!(batch.batch_name, "Morning");
        assert!(batch.students.is_empty());
    }

    #[test]
    fn payment_order_reads_gateway_keys() {
        let order: PaymentOrder = serde_json::from_value(json!({
            "order_id": "order_9A",
            "amount": 150_000,
            "short_url": "https://rzp.io/x"
        }))
        .expect("order");
        assert_eq!(order.order_id, "order_9A");
        assert_eq!(order.amount, 150_000);
        assert_eq!(order.short_url.as_deref(), Some("https://rzp.io/x"));
    }

    #[test]
    fn role_parses_common_spellings() {
        assert_eq!("Counselor".parse::<Role>(), Ok(Role::Counsellor));
        assert_eq!("student".parse::<Role>(), Ok(Role::Student));
        assert!("owner".parse::<Role>().is_err());
        assert_eq!(Role::Trainer.to_string(), "trainer");
    }

    #[test]
    fn api_message_falls_back_when_blank() {
        let message = ApiMessage {
            message: Some("  ".into()),
            success: None,
        };
        assert_eq!(message.message_or("Login failed"), "Login failed");
        let message = ApiMessage {
            message: Some("User approved".into()),
            success: Some(true),
        };
        assert_eq!(message.message_or("x"), "User approved");
    }
}
