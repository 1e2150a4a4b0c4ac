use std::fs;

use anyhow::anyhow;
use kodu_api_models::{ApiMessage, Course, CreateCourseRequest};
use kodu_core::course_builder::CourseDraft;
use kodu_core::endpoints;
use kodu_core::fetch::coerce_list;
use reqwest::Method;
use serde_json::Value;

use crate::cli::{AddCourseArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{render_courses, render_message};

pub(crate) async fn handle_list(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    // The catalogue is public; send the token anyway when there is one.
    let session = ctx.session().ok();
    let raw: Value = ctx.get_json(endpoints::COURSES, session.as_ref()).await?;
    render_courses(&coerce_list::<Course>(raw), format)
}

fn load_draft(args: &AddCourseArgs) -> CliResult<CourseDraft> {
    let text = fs::read_to_string(&args.file).map_err(|err| {
        CliError::failure(anyhow!(
            "failed to read course file '{}': {err}",
            args.file.display()
        ))
    })?;
    let request: CreateCourseRequest = serde_json::from_str(&text).map_err(|err| {
        CliError::validation(format!(
            "course file '{}' is not valid course JSON: {err}",
            args.file.display()
        ))
    })?;
    Ok(CourseDraft::from(request))
}

pub(crate) async fn handle_add(
    ctx: &AppContext,
    args: AddCourseArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let draft = load_draft(&args)?;
    draft.validate()?;
    let session = ctx.session()?;

    let reply: Option<ApiMessage> = ctx
        .send_json(
            Method::POST,
            endpoints::ADD_COURSE,
            Some(&session),
            &draft.to_request(),
        )
        .await?;
    let fallback = format!("Course '{}' added", draft.course_name.trim());
    render_message(&reply.unwrap_or_default().message_or(&fallback), format)
}
