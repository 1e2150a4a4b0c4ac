use anyhow::anyhow;
use kodu_api_models::{ApiMessage, LoginRequest, LoginResponse, RegisterRequest};
use kodu_core::endpoints;
use kodu_core::session::{establish, logout};
use reqwest::Method;

use crate::cli::{LoginArgs, OutputFormat, RegisterArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{render_message, render_session};

fn password_or_prompt(password: Option<String>) -> CliResult<String> {
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")
            .map_err(|err| CliError::failure(anyhow!("failed to read password: {err}")))?,
    };
    if password.is_empty() {
        return Err(CliError::validation("password must not be empty"));
    }
    Ok(password)
}

fn non_blank(field: &str, value: String) -> CliResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CliError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

pub(crate) async fn handle_login(
    ctx: &AppContext,
    args: LoginArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let request = LoginRequest {
        email: non_blank("email", args.email)?,
        password: password_or_prompt(args.password)?,
    };

    let reply: LoginResponse = ctx
        .send_json(Method::POST, endpoints::LOGIN, None, &request)
        .await?;
    let session = establish(&ctx.tokens, &reply.token).map_err(|err| {
        CliError::failure(anyhow!("could not store the session returned by the server: {err}"))
    })?;
    tracing::info!(user_id = session.user_id(), role = %session.role(), "logged in");
    if matches!(format, OutputFormat::Table) {
        println!("Logged in; token saved to {}", ctx.tokens.path().display());
    }
    render_session(&session, format)
}

pub(crate) fn handle_logout(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    logout(&ctx.tokens);
    render_message(
        &format!("Logged out; removed {}", ctx.tokens.path().display()),
        format,
    )
}

pub(crate) async fn handle_register(
    ctx: &AppContext,
    args: RegisterArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let request = RegisterRequest {
        name: non_blank("name", args.name)?,
        email: non_blank("email", args.email)?,
        password: password_or_prompt(args.password)?,
        role: args.role,
    };

    let reply: Option<ApiMessage> = ctx
        .send_json(Method::POST, endpoints::REGISTER, None, &request)
        .await?;
    let message = reply
        .unwrap_or_default()
        .message_or("Registration submitted; wait for approval before logging in");
    render_message(&message, format)
}

pub(crate) fn handle_whoami(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let session = ctx.session()?;
    render_session(&session, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{context_with, logged_in};
    use anyhow::Result;
    use httpmock::prelude::*;
    use kodu_api_models::Role;
    use kodu_core::TokenStore;
    use kodu_test_support::fixtures::token_for;
    use serde_json::json;

    fn err_text(err: &CliError) -> anyhow::Error {
        anyhow!(err.display_message())
    }

    #[tokio::test]
    async fn login_posts_credentials_and_stores_token() -> Result<()> {
        let server = MockServer::start_async().await;
        let token = token_for("t1", Role::Trainer);
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/auth/login")
                .json_body(json!({ "email": "tara@kodu.test", "password": "secret" }));
            then.status(200).json_body(json!({ "token": token }));
        });
        let ctx = context_with(&server);

        handle_login(
            &ctx,
            LoginArgs {
                email: " tara@kodu.test ".into(),
                password: Some("secret".into()),
            },
            OutputFormat::Json,
        )
        .await
        .map_err(|err| err_text(&err))?;

        mock.assert();
        assert_eq!(ctx.tokens.load().as_deref(), Some(token.as_str()));
        let session = ctx.session().map_err(|err| err_text(&err))?;
        assert_eq!(session.role(), Role::Trainer);
        ctx.tokens.clear();
        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_keeps_previous_token() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, _) = logged_in(&server, "a1", Role::Admin);
        let before = ctx.tokens.load();
        server.mock(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(400).json_body(json!({ "message": "Invalid credentials" }));
        });

        let err = handle_login(
            &ctx,
            LoginArgs {
                email: "a@kodu.test".into(),
                password: Some("wrong".into()),
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("login should fail");

        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "Invalid credentials");
        assert_eq!(ctx.tokens.load(), before);
        ctx.tokens.clear();
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_token_is_not_stored() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200).json_body(json!({ "token": "not-a-jwt" }));
        });
        let ctx = context_with(&server);

        let err = handle_login(
            &ctx,
            LoginArgs {
                email: "a@kodu.test".into(),
                password: Some("pw".into()),
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("malformed token");
        assert_eq!(err.exit_code(), 3);
        assert!(ctx.tokens.load().is_none());
    }

    #[tokio::test]
    async fn blank_email_fails_before_any_request() {
        let server = MockServer::start_async().await;
        let ctx = context_with(&server);
        let err = handle_login(
            &ctx,
            LoginArgs {
                email: "   ".into(),
                password: Some("pw".into()),
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("blank email");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "email must not be empty");
    }

    #[tokio::test]
    async fn register_sends_role() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/users/register").json_body(json!({
                "name": "Chitra",
                "email": "chitra@kodu.test",
                "password": "pw",
                "role": "counsellor",
            }));
            then.status(201)
                .json_body(json!({ "message": "Registered, awaiting approval" }));
        });
        let ctx = context_with(&server);

        handle_register(
            &ctx,
            RegisterArgs {
                name: "Chitra".into(),
                email: "chitra@kodu.test".into(),
                password: Some("pw".into()),
                role: Role::Counsellor,
            },
            OutputFormat::Table,
        )
        .await
        .map_err(|err| err_text(&err))?;
        mock.assert();
        Ok(())
    }

    #[test]
    fn logout_forgets_token() {
        let server = MockServer::start();
        let (ctx, _) = logged_in(&server, "s1", Role::Student);
        assert!(handle_whoami(&ctx, OutputFormat::Table).is_ok());

        handle_logout(&ctx, OutputFormat::Table).expect("logout");
        assert!(ctx.tokens.load().is_none());
        let err = handle_whoami(&ctx, OutputFormat::Table).expect_err("logged out");
        assert!(err.display_message().contains("kodu login"));
    }
}
