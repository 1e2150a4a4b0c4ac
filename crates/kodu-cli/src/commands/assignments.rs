use std::fs;

use anyhow::anyhow;
use kodu_api_models::{ApiMessage, Assignment, SubmissionRow};
use kodu_core::assignments::{SubmissionLink, UploadDraft, empty_when_missing};
use kodu_core::endpoints;
use kodu_core::fetch::coerce_list;
use kodu_core::Session;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::cli::{BatchArg, ListAssignmentsArgs, OutputFormat, SubmitArgs, TitlesArgs, UploadArgs};
use crate::client::{AppContext, CliError, CliResult, classify_problem, decode};
use crate::commands::students::fetch_profile;
use crate::output::{
    render_message, render_student_assignments, render_submission_rows, render_titles,
};

/// Batch given on the command line, or the logged-in student's own batch.
async fn batch_or_own(
    ctx: &AppContext,
    session: &Session,
    batch: Option<String>,
) -> CliResult<String> {
    if let Some(batch) = batch {
        return Ok(batch);
    }
    let profile = fetch_profile(ctx, session, session.user_id()).await?;
    profile
        .batch_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| CliError::validation("no batch assigned to this account; pass --batch"))
}

pub(crate) async fn handle_upload(
    ctx: &AppContext,
    args: UploadArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let draft = UploadDraft {
        batch_id: args.batch,
        title: args.title,
        file_name: args
            .file
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string),
    };
    draft.validate()?;
    let file_name = draft.file_name.clone().unwrap_or_default();
    let bytes = fs::read(&args.file).map_err(|err| {
        CliError::failure(anyhow!(
            "failed to read assignment file '{}': {err}",
            args.file.display()
        ))
    })?;
    let session = ctx.session()?;

    let form = Form::new()
        .text("batchId", draft.batch_id.trim().to_string())
        .text("title", draft.title.trim().to_string())
        .part("assignmentFile", Part::bytes(bytes).file_name(file_name));
    let request = ctx
        .request(Method::POST, endpoints::UPLOAD_ASSIGNMENT, Some(&session))?
        .multipart(form);
    let response = ctx
        .execute(request, &Method::POST, endpoints::UPLOAD_ASSIGNMENT)
        .await?;
    let reply: Option<ApiMessage> = decode(response, endpoints::UPLOAD_ASSIGNMENT).await?;
    render_message(
        &reply
            .unwrap_or_default()
            .message_or("Assignment uploaded successfully"),
        format,
    )
}

pub(crate) async fn handle_titles(
    ctx: &AppContext,
    args: TitlesArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.session()?;
    let batch = batch_or_own(ctx, &session, args.batch).await?;
    let raw: Value = ctx
        .get_json(&endpoints::assignment_titles(&batch), Some(&session))
        .await?;
    render_titles(&coerce_list::<String>(raw), format)
}

pub(crate) async fn handle_list(
    ctx: &AppContext,
    args: ListAssignmentsArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.session()?;
    let batch = batch_or_own(ctx, &session, args.batch).await?;
    let path = endpoints::assignments_by_title(&batch, &args.title);
    let request = ctx.request(Method::GET, &path, Some(&session))?;

    let fetched = match ctx.fetch(request, &Method::GET, &path).await? {
        Ok(response) => Ok(coerce_list::<Assignment>(decode(response, &path).await?)),
        Err(failure) => Err(failure),
    };
    let assignments = empty_when_missing(fetched).map_err(classify_problem)?;
    render_student_assignments(&assignments, session.user_id(), format)
}

pub(crate) async fn handle_submit(
    ctx: &AppContext,
    args: SubmitArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let link = SubmissionLink::parse(&args.link)?;
    let session = ctx.session()?;
    let reply: Option<ApiMessage> = ctx
        .send_json(
            Method::POST,
            &endpoints::submit_assignment(&args.assignment),
            Some(&session),
            &link.to_request(),
        )
        .await?;
    render_message(
        &reply.unwrap_or_default().message_or("Assignment submitted"),
        format,
    )
}

pub(crate) async fn handle_by_batch(
    ctx: &AppContext,
    args: BatchArg,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.session()?;
    let raw: Value = ctx
        .get_json(&endpoints::batch_assignments(&args.batch), Some(&session))
        .await?;
    render_submission_rows(&coerce_list::<SubmissionRow>(raw), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{logged_in, temp_token_path};
    use anyhow::Result;
    use httpmock::prelude::*;
    use kodu_api_models::Role;
    use kodu_core::assignments::MISSING_UPLOAD_FIELDS;
    use serde_json::json;

    fn err_text(err: &CliError) -> anyhow::Error {
        anyhow!(err.display_message())
    }

    fn profile_mock(server: &MockServer, batch: Option<&str>) {
        let body = json!({
            "updatedProfile": { "_id": "s1", "name": "Asha", "email": "asha@kodu.test", "batchId": batch }
        });
        server.mock(|when, then| {
            when.method(GET).path("/students/student/s1");
            then.status(200).json_body(body);
        });
    }

    #[tokio::test]
    async fn titles_use_own_batch_by_default() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, bearer) = logged_in(&server, "s1", Role::Student);
        profile_mock(&server, Some("b1"));
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/assignments/batches/b1/assignment-titles")
                .header("authorization", bearer.as_str());
            then.status(200).json_body(json!(["Week 1", "Week 2"]));
        });

        handle_titles(&ctx, TitlesArgs { batch: None }, OutputFormat::Table)
            .await
            .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn titles_without_batch_need_flag() {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "s1", Role::Student);
        profile_mock(&server, None);
        let err = handle_titles(&ctx, TitlesArgs { batch: None }, OutputFormat::Table)
            .await
            .expect_err("no batch");
        assert!(err.display_message().contains("--batch"));
    }

    #[tokio::test]
    async fn missing_title_listing_is_empty() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "s1", Role::Student);
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/assignments/batches/b1/student-assignments")
                .query_param("title", "Week 3");
            then.status(404)
                .json_body(json!({ "message": "No student assignments found" }));
        });

        handle_list(
            &ctx,
            ListAssignmentsArgs {
                batch: Some("b1".into()),
                title: "Week 3".into(),
            },
            OutputFormat::Table,
        )
        .await
        .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn listing_errors_other_than_404_fail() {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "s1", Role::Student);
        server.mock(|when, then| {
            when.method(GET)
                .path("/assignments/batches/b1/student-assignments");
            then.status(500);
        });
        let err = handle_list(
            &ctx,
            ListAssignmentsArgs {
                batch: Some("b1".into()),
                title: "Week 1".into(),
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("server error");
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn submit_posts_link() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, bearer) = logged_in(&server, "s1", Role::Student);
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/assignments/a1/submit")
                .header("authorization", bearer.as_str())
                .json_body(json!({ "submissionLink": "https://github.com/asha/week1" }));
            then.status(200).json_body(json!({ "message": "Submitted" }));
        });

        handle_submit(
            &ctx,
            SubmitArgs {
                assignment: "a1".into(),
                link: "https://github.com/asha/week1".into(),
            },
            OutputFormat::Table,
        )
        .await
        .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn submit_rejects_non_http_links() {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "s1", Role::Student);
        let err = handle_submit(
            &ctx,
            SubmitArgs {
                assignment: "a1".into(),
                link: "ftp://files.kodu.test/week1".into(),
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("ftp link");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn upload_sends_multipart_form() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, bearer) = logged_in(&server, "t1", Role::Trainer);
        let file = temp_token_path().with_file_name("week1.pdf");
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file, b"%PDF-1.4 week one")?;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/assignments/upload")
                .header("authorization", bearer.as_str());
            then.status(201)
                .json_body(json!({ "message": "Assignment uploaded successfully" }));
        });

        handle_upload(
            &ctx,
            UploadArgs {
                batch: "b1".into(),
                title: "Week 1".into(),
                file,
            },
            OutputFormat::Table,
        )
        .await
        .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn upload_requires_every_field() {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "t1", Role::Trainer);
        let err = handle_upload(
            &ctx,
            UploadArgs {
                batch: "b1".into(),
                title: "  ".into(),
                file: "week1.pdf".into(),
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("blank title");
        assert!(err.display_message().contains(MISSING_UPLOAD_FIELDS));
    }

    #[tokio::test]
    async fn by_batch_lists_submission_rows() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "t1", Role::Trainer);
        let mock = server.mock(|when, then| {
            when.method(GET).path("/batches/b1/student-assignments");
            then.status(200).json_body(json!([
                { "_id": "r1", "title": "Week 1", "student": { "_id": "s1", "name": "Asha" }, "submissionLink": "https://github.com/asha/week1" },
                { "_id": "r2", "title": "Week 1", "student": "s2" }
            ]));
        });
        handle_by_batch(&ctx, BatchArg { batch: "b1".into() }, OutputFormat::Table)
            .await
            .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }
}
