use kodu_api_models::{ApiMessage, Batch, StudentProfile};
use kodu_core::batch_form::BatchDraft;
use kodu_core::endpoints;
use kodu_core::fetch::coerce_list;
use kodu_core::{FormResult, Session};
use reqwest::Method;
use serde_json::Value;

use crate::cli::{BatchArg, CreateBatchArgs, OutputFormat};
use crate::client::{AppContext, CliResult};
use crate::output::{render_batches, render_message, render_students};

/// Students enrolled in `batch_id`.
pub(crate) async fn fetch_roster(
    ctx: &AppContext,
    session: &Session,
    batch_id: &str,
) -> CliResult<Vec<StudentProfile>> {
    let raw: Value = ctx
        .get_json(&endpoints::batch_students(batch_id), Some(session))
        .await?;
    Ok(coerce_list(raw))
}

pub(crate) async fn handle_list(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let session = ctx.session()?;
    let raw: Value = ctx.get_json(endpoints::ALL_BATCHES, Some(&session)).await?;
    render_batches(&coerce_list::<Batch>(raw), format)
}

fn draft_from(args: &CreateBatchArgs) -> FormResult<BatchDraft> {
    let mut draft = BatchDraft::new();
    draft.set_field("courseId", &args.course)?;
    draft.set_field("batchName", &args.name)?;
    draft.set_field("startDate", &args.start_date)?;
    draft.set_field("endDate", &args.end_date)?;
    draft.set_field("startTime", &args.start_time)?;
    draft.set_field("endTime", &args.end_time)?;
    for student in &args.students {
        if !draft.is_selected(student) {
            draft.toggle_student(student);
        }
    }
    draft.validate()?;
    Ok(draft)
}

pub(crate) async fn handle_create(
    ctx: &AppContext,
    args: CreateBatchArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let draft = draft_from(&args)?;
    let session = ctx.session()?;

    let reply: Option<ApiMessage> = ctx
        .send_json(
            Method::POST,
            endpoints::CREATE_BATCH,
            Some(&session),
            &draft.to_request(),
        )
        .await?;
    let fallback = format!("Batch '{}' created", args.name.trim());
    render_message(&reply.unwrap_or_default().message_or(&fallback), format)
}

pub(crate) async fn handle_roster(
    ctx: &AppContext,
    args: BatchArg,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.session()?;
    let roster = fetch_roster(ctx, &session, &args.batch).await?;
    render_students(&roster, "No students in this batch.", format)
}
