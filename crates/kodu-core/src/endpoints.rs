//! Backend paths, relative to the API base.

use urlencoding::encode;

/// Hosted API base used when no override is configured.
pub const DEFAULT_API_BASE: &str = "https://kodu-erp.onrender.com/api";

/// Credential exchange.
pub const LOGIN: &str = "auth/login";
/// Account registration.
pub const REGISTER: &str = "users/register";
/// Accounts awaiting admin approval.
pub const PENDING_USERS: &str = "admin/pending-users";
/// Students awaiting counsellor approval.
pub const PENDING_STUDENTS: &str = "students/pending";
/// Approve every pending student.
pub const APPROVE_ALL_STUDENTS: &str = "students/approve-all";
/// Every approved student.
pub const ALL_STUDENTS: &str = "students/all";
/// Profile update for the logged-in student.
pub const UPDATE_PROFILE: &str = "students/update-profile";
/// Course catalogue.
pub const COURSES: &str = "courses";
/// Course creation.
pub const ADD_COURSE: &str = "courses/add-course";
/// Batch listing.
pub const ALL_BATCHES: &str = "batches/allbatches";
/// Batch creation.
pub const CREATE_BATCH: &str = "batches/create";
/// Batched attendance marking.
pub const MARK_ATTENDANCE: &str = "attendance/mark-students";
/// Multipart assignment upload.
pub const UPLOAD_ASSIGNMENT: &str = "assignments/upload";
/// Fee assignment for a student.
pub const SET_FEE: &str = "fees/set-fee";
/// Gateway order creation.
pub const CREATE_PAYMENT_ORDER: &str = "fees/create-payment-order";
/// Gateway payment verification.
pub const PAYMENT_SUCCESS: &str = "fees/payment-success";
/// Complaint listing.
pub const ALL_COMPLAINTS: &str = "complaints/all";
/// Complaint creation.
pub const CREATE_COMPLAINT: &str = "complaints/create";

/// Join an API base and a relative path with exactly one slash between them.
#[must_use]
pub fn join(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{base}/{path}")
}

/// Admin approval or rejection of a pending user.
#[must_use]
pub fn approve_user(user_id: &str) -> String {
    format!("admin/approve/{}", encode(user_id))
}

/// Counsellor approval of one pending student.
#[must_use]
pub fn approve_student(student_id: &str) -> String {
    format!("students/approve/{}", encode(student_id))
}

/// Profile of one student.
#[must_use]
pub fn student(student_id: &str) -> String {
    format!("students/student/{}", encode(student_id))
}

/// Students enrolled in a batch.
#[must_use]
pub fn batch_students(batch_id: &str) -> String {
    format!("batches/{}/batchwisestudents", encode(batch_id))
}

/// Every assignment of a batch with its submissions.
#[must_use]
pub fn batch_assignments(batch_id: &str) -> String {
    format!("batches/{}/student-assignments", encode(batch_id))
}

/// Attendance summary of one student in one batch.
#[must_use]
pub fn attendance_summary(student_id: &str, batch_id: &str) -> String {
    format!(
        "attendance/summary/student/{}/{}",
        encode(student_id),
        encode(batch_id)
    )
}

/// Distinct assignment titles of a batch.
#[must_use]
pub fn assignment_titles(batch_id: &str) -> String {
    format!(
        "assignments/batches/{}/assignment-titles",
        encode(batch_id)
    )
}

/// Assignments of a batch filtered by title.
#[must_use]
pub fn assignments_by_title(batch_id: &str, title: &str) -> String {
    format!(
        "assignments/batches/{}/student-assignments?title={}",
        encode(batch_id),
        encode(title)
    )
}

/// Submission of one assignment by the logged-in student.
#[must_use]
pub fn submit_assignment(assignment_id: &str) -> String {
    format!("assignments/{}/submit", encode(assignment_id))
}
