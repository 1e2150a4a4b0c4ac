use kodu_api_models::{ApiMessage, Complaint, CreateComplaintRequest};
use kodu_core::endpoints;
use kodu_core::fetch::coerce_list;
use reqwest::Method;
use serde_json::Value;

use crate::cli::{ComplaintArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{render_complaints, render_message};

pub(crate) async fn handle_list(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let session = ctx.session()?;
    let raw: Value = ctx
        .get_json(endpoints::ALL_COMPLAINTS, Some(&session))
        .await?;
    render_complaints(&coerce_list::<Complaint>(raw), format)
}

pub(crate) async fn handle_create(
    ctx: &AppContext,
    args: ComplaintArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let request = CreateComplaintRequest {
        trainer_id: args.trainer.trim().to_string(),
        message: args.message.trim().to_string(),
    };
    if request.trainer_id.is_empty() || request.message.is_empty() {
        return Err(CliError::validation("trainer and message are required"));
    }
    let session = ctx.session()?;
    let reply: Option<ApiMessage> = ctx
        .send_json(
            Method::POST,
            endpoints::CREATE_COMPLAINT,
            Some(&session),
            &request,
        )
        .await?;
    render_message(
        &reply.unwrap_or_default().message_or("Complaint submitted"),
        format,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::logged_in;
    use anyhow::{Result, anyhow};
    use httpmock::prelude::*;
    use kodu_api_models::Role;
    use serde_json::json;

    #[tokio::test]
    async fn list_renders_populated_people() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, bearer) = logged_in(&server, "a1", Role::Admin);
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/complaints/all")
                .header("authorization", bearer.as_str());
            then.status(200).json_body(json!([{
                "_id": "q1",
                "student": { "_id": "s1", "name": "Asha", "email": "asha@kodu.test" },
                "trainer": { "_id": "t1", "name": "Tara" },
                "message": "Lab machines are slow"
            }]));
        });
        handle_list(&ctx, OutputFormat::Table)
            .await
            .map_err(|err| anyhow!(err.display_message()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn create_posts_trimmed_complaint() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "s1", Role::Student);
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/complaints/create")
                .json_body(json!({ "trainerId": "t1", "message": "Class started late" }));
            then.status(201).json_body(json!({ "message": "Complaint registered" }));
        });
        handle_create(
            &ctx,
            ComplaintArgs {
                trainer: "t1".into(),
                message: " Class started late ".into(),
            },
            OutputFormat::Table,
        )
        .await
        .map_err(|err| anyhow!(err.display_message()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "s1", Role::Student);
        let err = handle_create(
            &ctx,
            ComplaintArgs {
                trainer: "t1".into(),
                message: "   ".into(),
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("blank message");
        assert_eq!(err.exit_code(), 2);
    }
}
