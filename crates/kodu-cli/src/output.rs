//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use kodu_api_models::{
    Assignment, AttendanceSummary, Batch, Complaint, Course, PaymentOrder, PersonRef,
    StudentProfile, SubmissionRow, User,
};
use kodu_core::Session;
use kodu_core::assignments::submission_link;
use kodu_core::attendance::{AttendanceBand, SummaryStats};
use kodu_core::routes::home_route;
use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

const NOT_AVAILABLE: &str = "N/A";

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

/// Print a confirmation line, or `{"message": ...}` in JSON mode.
pub(crate) fn render_message(message: &str, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({ "message": message })),
        OutputFormat::Table => {
            println!("{message}");
            Ok(())
        }
    }
}

pub(crate) fn render_session(session: &Session, format: OutputFormat) -> CliResult<()> {
    let home = home_route(session.role()).path();
    match format {
        OutputFormat::Json => print_json(&json!({
            "userId": session.user_id(),
            "role": session.role(),
            "home": home,
        })),
        OutputFormat::Table => {
            println!("user: {}", session.user_id());
            println!("role: {}", session.role());
            println!("home: {home}");
            Ok(())
        }
    }
}

pub(crate) fn render_users(users: &[User], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(users),
        OutputFormat::Table => {
            if users.is_empty() {
                println!("No pending users.");
                return Ok(());
            }
            println!("{:<26} {:<12} {:<24} EMAIL", "ID", "ROLE", "NAME");
            for user in users {
                let role = user.role.map_or(NOT_AVAILABLE, |role| role.as_str());
                println!("{:<26} {:<12} {:<24} {}", user.id, role, user.name, user.email);
            }
            Ok(())
        }
    }
}

pub(crate) fn render_students(
    students: &[StudentProfile],
    empty: &str,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(students),
        OutputFormat::Table => {
            if students.is_empty() {
                println!("{empty}");
                return Ok(());
            }
            println!("{:<26} {:<24} {:<30} PHONE", "ID", "NAME", "EMAIL");
            for student in students {
                println!(
                    "{:<26} {:<24} {:<30} {}",
                    student.id,
                    student.name,
                    student.email,
                    or_na(&student.phone_number)
                );
            }
            Ok(())
        }
    }
}

pub(crate) fn render_student(student: &StudentProfile, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(student),
        OutputFormat::Table => {
            println!("id: {}", student.id);
            println!("name: {}", student.name);
            println!("email: {}", student.email);
            println!("phone: {}", or_na(&student.phone_number));
            println!("whatsapp: {}", or_na(&student.whatsapp_number));
            println!("parent phone: {}", or_na(&student.parent_phone_number));
            println!("education: {}", or_na(&student.education));
            println!("batch: {}", student.batch_id.as_deref().unwrap_or(NOT_AVAILABLE));
            if student.enrolled_courses.is_empty() {
                println!("courses: {NOT_AVAILABLE}");
            } else {
                println!("courses: {}", student.enrolled_courses.join(", "));
            }
            Ok(())
        }
    }
}

pub(crate) fn render_courses(courses: &[Course], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(courses),
        OutputFormat::Table => {
            if courses.is_empty() {
                println!("No courses found.");
                return Ok(());
            }
            println!("{:<26} {:>8} {:>6} NAME", "ID", "SUBJECTS", "TOPICS");
            for course in courses {
                println!(
                    "{:<26} {:>8} {:>6} {}",
                    course.id,
                    course.subjects.len(),
                    course.topics.len(),
                    course.course_name
                );
            }
            Ok(())
        }
    }
}

pub(crate) fn render_batches(batches: &[Batch], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(batches),
        OutputFormat::Table => {
            if batches.is_empty() {
                println!("No batches found.");
                return Ok(());
            }
            println!(
                "{:<26} {:<24} {:<23} {:<13} {:>8}",
                "ID", "NAME", "DATES", "TIME", "STUDENTS"
            );
            for batch in batches {
                let dates = format!(
                    "{} - {}",
                    batch.start_date.as_deref().unwrap_or("?"),
                    batch.end_date.as_deref().unwrap_or("?")
                );
                let time = format!(
                    "{}-{}",
                    batch.start_time.as_deref().unwrap_or("?"),
                    batch.end_time.as_deref().unwrap_or("?")
                );
                println!(
                    "{:<26} {:<24} {:<23} {:<13} {:>8}",
                    batch.id,
                    batch.batch_name,
                    dates,
                    time,
                    batch.students.len()
                );
            }
            Ok(())
        }
    }
}

const fn band_label(band: AttendanceBand) -> &'static str {
    match band {
        AttendanceBand::Good => "good",
        AttendanceBand::Fair => "fair",
        AttendanceBand::Low => "low",
    }
}

pub(crate) fn render_attendance_summary(
    summary: &AttendanceSummary,
    format: OutputFormat,
) -> CliResult<()> {
    let percentage = summary.percentage();
    match format {
        OutputFormat::Json => print_json(&json!({
            "totalDays": summary.total_days,
            "presentDays": summary.present_days,
            "absentDays": summary.absent_days,
            "lateDays": summary.late_days,
            "percentage": percentage,
            "band": band_label(summary.band()),
        })),
        OutputFormat::Table => {
            let slices = summary.chart_slices();
            println!("total days: {}", summary.total_days);
            println!("present: {}", slices.present);
            println!("absent: {}", slices.absent);
            println!("late: {}", slices.late);
            println!(
                "attendance: {percentage:.2}% ({})",
                band_label(summary.band())
            );
            Ok(())
        }
    }
}

pub(crate) fn render_titles(titles: &[String], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(titles),
        OutputFormat::Table => {
            if titles.is_empty() {
                println!("No assignments yet.");
            }
            for title in titles {
                println!("{title}");
            }
            Ok(())
        }
    }
}

/// Assignments as seen by `student_id`, with their own submission state.
pub(crate) fn render_student_assignments(
    assignments: &[Assignment],
    student_id: &str,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(assignments),
        OutputFormat::Table => {
            if assignments.is_empty() {
                println!("No assignments found for this title.");
                return Ok(());
            }
            println!("{:<26} {:<24} {:<10} FILE", "ID", "TITLE", "STATUS");
            for assignment in assignments {
                let status = submission_link(assignment, student_id)
                    .map_or_else(|| "pending".to_string(), |link| format!("submitted ({link})"));
                println!(
                    "{:<26} {:<24} {:<10} {}",
                    assignment.id, assignment.title, status, assignment.file_url
                );
            }
            Ok(())
        }
    }
}

fn person_label(person: Option<&PersonRef>) -> &str {
    person.map_or(NOT_AVAILABLE, PersonRef::display_name)
}

pub(crate) fn render_submission_rows(rows: &[SubmissionRow], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(rows),
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("No assignments found for this batch.");
                return Ok(());
            }
            println!("{:<24} {:<24} SUBMISSION", "STUDENT", "ASSIGNMENT");
            for row in rows {
                println!(
                    "{:<24} {:<24} {}",
                    person_label(row.student.as_ref()),
                    row.title,
                    row.submission_link.as_deref().unwrap_or(NOT_AVAILABLE)
                );
            }
            Ok(())
        }
    }
}

pub(crate) fn render_complaints(complaints: &[Complaint], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(complaints),
        OutputFormat::Table => {
            if complaints.is_empty() {
                println!("No queries found.");
                return Ok(());
            }
            println!("{:<20} {:<28} {:<20} MESSAGE", "STUDENT", "STUDENT EMAIL", "TRAINER");
            for complaint in complaints {
                let student_email = complaint
                    .student
                    .as_ref()
                    .and_then(PersonRef::email)
                    .unwrap_or(NOT_AVAILABLE);
                println!(
                    "{:<20} {:<28} {:<20} {}",
                    person_label(complaint.student.as_ref()),
                    student_email,
                    person_label(complaint.trainer.as_ref()),
                    complaint.message
                );
            }
            Ok(())
        }
    }
}

pub(crate) fn render_payment_order(order: &PaymentOrder, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(order),
        OutputFormat::Table => {
            println!("order: {}", order.order_id);
            println!("amount: {} paise", order.amount);
            if let Some(link) = &order.short_url {
                println!("payment link: {link}");
            }
            if let Some(qr) = &order.qr_code_url {
                println!("qr code: {qr}");
            }
            Ok(())
        }
    }
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_render_as_not_available() {
        assert_eq!(or_na(""), NOT_AVAILABLE);
        assert_eq!(or_na("  "), NOT_AVAILABLE);
        assert_eq!(or_na("B.Sc"), "B.Sc");
        assert_eq!(person_label(None), NOT_AVAILABLE);
    }

    #[test]
    fn bands_have_labels() {
        let summary = AttendanceSummary {
            total_days: 4,
            present_days: 4,
            absent_days: 0,
            late_days: 0,
        };
        assert_eq!(band_label(summary.band()), "good");
        assert_eq!(band_label(AttendanceSummary::default().band()), "low");
    }
}
