use kodu_api_models::{ApiMessage, AttendanceStatus, AttendanceSummary};
use kodu_core::attendance::AttendanceSheet;
use kodu_core::endpoints;
use reqwest::Method;

use crate::cli::{MarkAttendanceArgs, OutputFormat, SummaryArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::commands::batches::fetch_roster;
use crate::output::{render_attendance_summary, render_message};

pub(crate) async fn handle_mark(
    ctx: &AppContext,
    args: MarkAttendanceArgs,
    format: OutputFormat,
) -> CliResult<()> {
    if args.date.trim().is_empty() {
        return Err(CliError::validation("date is required"));
    }
    let session = ctx.session()?;
    let roster = fetch_roster(ctx, &session, &args.batch).await?;
    if roster.is_empty() {
        return Err(CliError::validation(format!(
            "batch {} has no students to mark",
            args.batch
        )));
    }

    let mut sheet = AttendanceSheet::from_roster(args.batch.as_str(), &roster);
    for (student_id, status) in args.marks() {
        sheet.set_status(student_id, status)?;
    }
    let request = sheet.submission(&args.date)?;
    let present = sheet
        .rows()
        .iter()
        .filter(|row| row.status != AttendanceStatus::Absent)
        .count();
    tracing::info!(
        batch_id = sheet.batch_id(),
        students = sheet.len(),
        present,
        "submitting attendance"
    );

    let reply: Option<ApiMessage> = ctx
        .send_json(
            Method::POST,
            endpoints::MARK_ATTENDANCE,
            Some(&session),
            &request,
        )
        .await?;
    let fallback = format!(
        "Attendance marked for {} students ({present} attended)",
        sheet.len()
    );
    render_message(&reply.unwrap_or_default().message_or(&fallback), format)
}

pub(crate) async fn handle_summary(
    ctx: &AppContext,
    args: SummaryArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.session()?;
    let student_id = args
        .student
        .unwrap_or_else(|| session.user_id().to_string());
    let summary: AttendanceSummary = ctx
        .get_json(
            &endpoints::attendance_summary(&student_id, &args.batch),
            Some(&session),
        )
        .await?;
    render_attendance_summary(&summary, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::logged_in;
    use anyhow::{Result, anyhow};
    use httpmock::prelude::*;
    use kodu_api_models::Role;
    use serde_json::json;

    fn err_text(err: &CliError) -> anyhow::Error {
        anyhow!(err.display_message())
    }

    fn roster_mock(server: &MockServer) {
        server.mock(|when, then| {
            when.method(GET).path("/batches/b1/batchwisestudents");
            then.status(200).json_body(json!({
                "students": [
                    { "_id": "A", "name": "Asha" },
                    { "_id": "B", "name": "Bilal" },
                    { "_id": "C", "name": "Chitra" }
                ]
            }));
        });
    }

    #[tokio::test]
    async fn unlisted_students_are_absent() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, bearer) = logged_in(&server, "t1", Role::Trainer);
        roster_mock(&server);
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/attendance/mark-students")
                .header("authorization", bearer.as_str())
                .json_body(json!({
                    "batchId": "b1",
                    "date": "2024-05-01",
                    "studentsAttendance": [
                        { "studentId": "A", "status": "present" },
                        { "studentId": "B", "status": "absent" },
                        { "studentId": "C", "status": "late" }
                    ]
                }));
            then.status(200).json_body(json!({ "message": "Attendance marked" }));
        });

        handle_mark(
            &ctx,
            MarkAttendanceArgs {
                batch: "b1".into(),
                date: "2024-05-01".into(),
                present: vec!["A".into()],
                late: vec!["C".into()],
            },
            OutputFormat::Table,
        )
        .await
        .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn unknown_student_is_rejected() {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "t1", Role::Trainer);
        roster_mock(&server);
        let err = handle_mark(
            &ctx,
            MarkAttendanceArgs {
                batch: "b1".into(),
                date: "2024-05-01".into(),
                present: vec!["Z".into()],
                late: Vec::new(),
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("Z is not on the roster");
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("'Z'"));
    }

    #[tokio::test]
    async fn blank_date_is_rejected_before_fetching() {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "t1", Role::Trainer);
        let err = handle_mark(
            &ctx,
            MarkAttendanceArgs {
                batch: "b1".into(),
                date: " ".into(),
                present: Vec::new(),
                late: Vec::new(),
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("date required");
        assert_eq!(err.display_message(), "date is required");
    }

    #[tokio::test]
    async fn summary_defaults_to_logged_in_student() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, bearer) = logged_in(&server, "s1", Role::Student);
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/attendance/summary/student/s1/b1")
                .header("authorization", bearer.as_str());
            then.status(200).json_body(json!({
                "totalDays": 20, "presentDays": 15, "absentDays": 3, "lateDays": 2
            }));
        });
        handle_summary(
            &ctx,
            SummaryArgs {
                batch: "b1".into(),
                student: None,
            },
            OutputFormat::Json,
        )
        .await
        .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }
}
