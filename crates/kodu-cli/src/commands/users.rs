use kodu_api_models::{ApiMessage, ApprovalAction, ApprovalRequest, User};
use kodu_core::approvals::PendingList;
use kodu_core::endpoints;
use kodu_core::fetch::coerce_list;
use reqwest::Method;
use serde_json::Value;

use crate::cli::{IdArg, OutputFormat};
use crate::client::{AppContext, CliResult};
use crate::output::{render_message, render_users};

pub(crate) async fn handle_pending(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let session = ctx.session()?;
    let raw: Value = ctx
        .get_json(endpoints::PENDING_USERS, Some(&session))
        .await?;
    let pending = PendingList::new(coerce_list::<User>(raw));
    render_users(pending.entries(), format)
}

pub(crate) async fn handle_decision(
    ctx: &AppContext,
    args: IdArg,
    approve: bool,
    format: OutputFormat,
) -> CliResult<()> {
    let session = ctx.session()?;
    let action = if approve {
        ApprovalAction::Approve
    } else {
        ApprovalAction::Reject
    };
    let reply: Option<ApiMessage> = ctx
        .send_json(
            Method::POST,
            &endpoints::approve_user(&args.id),
            Some(&session),
            &ApprovalRequest { action },
        )
        .await?;
    let fallback = if approve {
        format!("User {} approved", args.id)
    } else {
        format!("User {} rejected", args.id)
    };
    render_message(&reply.unwrap_or_default().message_or(&fallback), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CliError;
    use crate::client::test_support::{context_with, logged_in};
    use anyhow::{Result, anyhow};
    use httpmock::prelude::*;
    use kodu_api_models::Role;
    use serde_json::json;

    fn err_text(err: &CliError) -> anyhow::Error {
        anyhow!(err.display_message())
    }

    #[tokio::test]
    async fn pending_users_require_login() {
        let server = MockServer::start_async().await;
        let ctx = context_with(&server);
        let err = handle_pending(&ctx, OutputFormat::Table)
            .await
            .expect_err("no session");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn pending_users_are_fetched_with_bearer() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, bearer) = logged_in(&server, "a1", Role::Admin);
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/admin/pending-users")
                .header("authorization", bearer.as_str());
            then.status(200).json_body(json!([
                { "_id": "u1", "name": "Tara", "email": "tara@kodu.test", "role": "trainer" }
            ]));
        });

        handle_pending(&ctx, OutputFormat::Json)
            .await
            .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn reject_posts_action() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, bearer) = logged_in(&server, "a1", Role::Admin);
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/admin/approve/u1")
                .header("authorization", bearer.as_str())
                .json_body(json!({ "action": "reject" }));
            then.status(200).json_body(json!({ "message": "User rejected" }));
        });

        handle_decision(&ctx, IdArg { id: "u1".into() }, false, OutputFormat::Table)
            .await
            .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn approve_posts_action() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "a1", Role::Admin);
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/admin/approve/u2")
                .json_body(json!({ "action": "approve" }));
            then.status(200).json_body(json!({ "message": "User approved" }));
        });

        handle_decision(&ctx, IdArg { id: "u2".into() }, true, OutputFormat::Json)
            .await
            .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }
}
