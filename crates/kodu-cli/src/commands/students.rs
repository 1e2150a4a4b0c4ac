use anyhow::anyhow;
use kodu_api_models::{ApiMessage, ApprovalAction, ApprovalRequest, StudentProfile};
use kodu_core::approvals::PendingList;
use kodu_core::endpoints;
use kodu_core::fetch::coerce_list;
use kodu_core::profile::{NO_CHANGES, ProfileForm, decode_profile};
use kodu_core::Session;
use reqwest::Method;
use serde_json::Value;

use crate::cli::{IdArg, OutputFormat, ShowStudentArgs, UpdateProfileArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{render_message, render_student, render_students};

/// Profile of `student_id`. The backend wraps it in `updatedProfile`; a bare
/// profile is accepted too.
pub(crate) async fn fetch_profile(
    ctx: &AppContext,
    session: &Session,
    student_id: &str,
) -> CliResult<StudentProfile> {
    let path = endpoints::student(student_id);
    let raw: Value = ctx.get_json(&path, Some(session)).await?;
    decode_profile(raw)
        .map_err(|err| CliError::failure(anyhow!("failed to parse response from {path}: {err}")))
}

pub(crate) async fn handle_pending(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let session = ctx.session()?;
    let raw: Value = ctx
        .get_json(endpoints::PENDING_STUDENTS, Some(&session))
        .await?;
    let pending = PendingList::new(coerce_list::<StudentProfile>(raw));
    render_students(pending.entries(), "No pending students.", format)
}

pub(crate) async fn handle_approve(
    ctx: &AppContext,
    args: IdArg,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.session()?;
    let reply: Option<ApiMessage> = ctx
        .send_json(
            Method::POST,
            &endpoints::approve_student(&args.id),
            Some(&session),
            &ApprovalRequest {
                action: ApprovalAction::Approve,
            },
        )
        .await?;
    let fallback = format!("Student {} approved", args.id);
    render_message(&reply.unwrap_or_default().message_or(&fallback), format)
}

pub(crate) async fn handle_approve_all(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let session = ctx.session()?;
    let reply: Option<ApiMessage> = ctx
        .send_empty(Method::POST, endpoints::APPROVE_ALL_STUDENTS, Some(&session))
        .await?;
    render_message(
        &reply
            .unwrap_or_default()
            .message_or("All pending students approved"),
        format,
    )
}

pub(crate) async fn handle_list(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let session = ctx.session()?;
    let raw: Value = ctx
        .get_json(endpoints::ALL_STUDENTS, Some(&session))
        .await?;
    render_students(&coerce_list::<StudentProfile>(raw), "No students found.", format)
}

pub(crate) async fn handle_show(
    ctx: &AppContext,
    args: ShowStudentArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.session()?;
    let student_id = args.id.unwrap_or_else(|| session.user_id().to_string());
    let profile = fetch_profile(ctx, &session, &student_id).await?;
    render_student(&profile, format)
}

pub(crate) async fn handle_update_profile(
    ctx: &AppContext,
    args: UpdateProfileArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let edits = [
        ("phoneNumber", args.phone),
        ("whatsappNumber", args.whatsapp),
        ("parentPhoneNumber", args.parent_phone),
        ("education", args.education),
    ];
    if edits.iter().all(|(_, value)| value.is_none()) && args.courses.is_empty() {
        return Err(CliError::validation(NO_CHANGES));
    }

    let session = ctx.session()?;
    let current = fetch_profile(ctx, &session, session.user_id()).await?;
    let mut form = ProfileForm::from(&current);
    for (field, value) in edits {
        if let Some(value) = value {
            form.set_field(field, &value)?;
        }
    }
    if !args.courses.is_empty() {
        form.set_courses(args.courses);
    }
    if form == ProfileForm::from(&current) {
        return Err(CliError::validation(NO_CHANGES));
    }
    let request = form.to_request()?;

    let reply: Option<ApiMessage> = ctx
        .send_json(
            Method::PUT,
            endpoints::UPDATE_PROFILE,
            Some(&session),
            &request,
        )
        .await?;
    render_message(
        &reply.unwrap_or_default().message_or("Profile updated"),
        format,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::logged_in;
    use anyhow::Result;
    use httpmock::prelude::*;
    use kodu_api_models::Role;
    use serde_json::json;

    fn err_text(err: &CliError) -> anyhow::Error {
        anyhow!(err.display_message())
    }

    fn profile_body() -> Value {
        json!({
            "updatedProfile": {
                "_id": "s1",
                "name": "Asha",
                "email": "asha@kodu.test",
                "phoneNumber": "98450 00000",
                "whatsappNumber": "98450 00000",
                "parentPhoneNumber": "99000 11111",
                "education": "B.Sc",
                "enrolledCourses": ["c1"],
                "batchId": "b1"
            }
        })
    }

    #[tokio::test]
    async fn show_defaults_to_logged_in_student() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, bearer) = logged_in(&server, "s1", Role::Student);
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/students/student/s1")
                .header("authorization", bearer.as_str());
            then.status(200).json_body(profile_body());
        });

        handle_show(&ctx, ShowStudentArgs { id: None }, OutputFormat::Table)
            .await
            .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn bare_profile_is_accepted() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "c1", Role::Counsellor);
        server.mock(|when, then| {
            when.method(GET).path("/students/student/s9");
            then.status(200)
                .json_body(json!({ "_id": "s9", "name": "Ravi", "email": "ravi@kodu.test" }));
        });
        let session = ctx.session().map_err(|err| err_text(&err))?;
        let profile = fetch_profile(&ctx, &session, "s9")
            .await
            .map_err(|err| err_text(&err))?;
        assert_eq!(profile.name, "Ravi");
        Ok(())
    }

    #[tokio::test]
    async fn update_profile_merges_edits_into_current_profile() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, bearer) = logged_in(&server, "s1", Role::Student);
        server.mock(|when, then| {
            when.method(GET).path("/students/student/s1");
            then.status(200).json_body(profile_body());
        });
        let update = server.mock(|when, then| {
            when.method(PUT)
                .path("/students/update-profile")
                .header("authorization", bearer.as_str())
                .json_body(json!({
                    "phoneNumber": "98450 00000",
                    "whatsappNumber": "98450 00000",
                    "parentPhoneNumber": "99000 11111",
                    "education": "M.Sc",
                    "enrolledCourses": ["c1", "c2"]
                }));
            then.status(200).json_body(json!({ "success": true, "message": "Profile updated" }));
        });

        handle_update_profile(
            &ctx,
            UpdateProfileArgs {
                phone: None,
                whatsapp: None,
                parent_phone: None,
                education: Some("M.Sc".into()),
                courses: vec!["c1".into(), "c2".into()],
            },
            OutputFormat::Table,
        )
        .await
        .map_err(|err| err_text(&err))?;
        update.assert();
        Ok(())
    }

    #[tokio::test]
    async fn update_without_edits_reports_no_changes() {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "s1", Role::Student);
        let err = handle_update_profile(
            &ctx,
            UpdateProfileArgs {
                phone: None,
                whatsapp: None,
                parent_phone: None,
                education: None,
                courses: Vec::new(),
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("nothing to update");
        assert_eq!(err.display_message(), NO_CHANGES);
    }

    #[tokio::test]
    async fn approve_all_posts_without_body() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, bearer) = logged_in(&server, "c1", Role::Counsellor);
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/students/approve-all")
                .header("authorization", bearer.as_str());
            then.status(200).json_body(json!({ "message": "All students approved" }));
        });
        handle_approve_all(&ctx, OutputFormat::Table)
            .await
            .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn approve_posts_action() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "c1", Role::Counsellor);
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/students/approve/s7")
                .json_body(json!({ "action": "approve" }));
            then.status(200).json_body(json!({ "message": "Student approved" }));
        });
        handle_approve(&ctx, IdArg { id: "s7".into() }, OutputFormat::Table)
            .await
            .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn list_accepts_bare_array() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "c1", Role::Counsellor);
        let mock = server.mock(|when, then| {
            when.method(GET).path("/students/all");
            then.status(200).json_body(json!([
                { "_id": "s1", "name": "Asha", "email": "asha@kodu.test" },
                { "_id": "s2", "name": "Bilal", "email": "bilal@kodu.test" }
            ]));
        });
        handle_list(&ctx, OutputFormat::Json)
            .await
            .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }
}
