//! Shared HTTP client, error types, and session plumbing for the CLI.

use std::fmt::{self, Display, Formatter};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::anyhow;
use kodu_core::endpoints;
use kodu_core::session::{Session, resolve_session};
use kodu_core::FetchFailure;
use kodu_telemetry::{record_status, request_span};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Instrument;
use url::Url;

use crate::token_store::FileTokenStore;

/// Hint attached to every "you need a session" error.
pub(crate) const LOGIN_HINT: &str = "not logged in (or the session expired); run `kodu login` first";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<kodu_core::FormError> for CliError {
    fn from(error: kodu_core::FormError) -> Self {
        Self::Validation(error.to_string())
    }
}

/// Build the shared HTTP client.
pub(crate) fn build_client(timeout_secs: u64) -> CliResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))
}

/// Application context passed to command handlers.
pub(crate) struct AppContext {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) tokens: FileTokenStore,
}

impl AppContext {
    /// Absolute URL of a backend path.
    pub(crate) fn endpoint(&self, path: &str) -> CliResult<Url> {
        endpoints::join(self.base_url.as_str(), path)
            .parse::<Url>()
            .map_err(|err| CliError::failure(anyhow!("invalid endpoint URL for {path}: {err}")))
    }

    /// Session from the token file; missing, malformed and expired tokens
    /// are validation errors pointing at `kodu login`.
    pub(crate) fn session(&self) -> CliResult<Session> {
        resolve_session(&self.tokens, now_secs()).map_err(|_| CliError::validation(LOGIN_HINT))
    }

    /// Start a request, attaching the bearer header when a session is given.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        session: Option<&Session>,
    ) -> CliResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        let builder = self.client.request(method, url);
        Ok(match session {
            Some(session) => builder.bearer_auth(session.token()),
            None => builder,
        })
    }

    /// Send a prepared request. Transport errors are CLI failures; non-2xx
    /// responses come back classified so callers can special-case them.
    pub(crate) async fn fetch(
        &self,
        request: RequestBuilder,
        method: &Method,
        path: &str,
    ) -> CliResult<Result<Response, FetchFailure>> {
        let span = request_span(method.as_str(), path);
        let response = request
            .send()
            .instrument(span.clone())
            .await
            .map_err(|err| CliError::failure(anyhow!("request to {path} failed: {err}")))?;
        let status = response.status().as_u16();
        record_status(&span, status);
        tracing::debug!(parent: &span, status, "response received");
        if response.status().is_success() {
            return Ok(Ok(response));
        }
        let body = response.text().await.unwrap_or_default();
        Ok(Err(FetchFailure::from_status(status, &body)))
    }

    /// Send a prepared request, turning non-2xx responses into CLI errors.
    pub(crate) async fn execute(
        &self,
        request: RequestBuilder,
        method: &Method,
        path: &str,
    ) -> CliResult<Response> {
        self.fetch(request, method, path)
            .await?
            .map_err(classify_problem)
    }

    /// GET `path` and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
    ) -> CliResult<T> {
        let request = self.request(Method::GET, path, session)?;
        let response = self.execute(request, &Method::GET, path).await?;
        decode(response, path).await
    }

    /// Send `body` as JSON with `method` and decode the JSON reply.
    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        session: Option<&Session>,
        body: &B,
    ) -> CliResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method.clone(), path, session)?.json(body);
        let response = self.execute(request, &method, path).await?;
        decode(response, path).await
    }

    /// Send a request without a body and decode the JSON reply.
    pub(crate) async fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        session: Option<&Session>,
    ) -> CliResult<T> {
        let request = self.request(method.clone(), path, session)?;
        let response = self.execute(request, &method, path).await?;
        decode(response, path).await
    }
}

/// Decode a JSON body; an empty body decodes as `null`.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> CliResult<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|err| CliError::failure(anyhow!("failed to read response from {path}: {err}")))?;
    let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &bytes
    };
    serde_json::from_slice(bytes)
        .map_err(|err| CliError::failure(anyhow!("failed to parse response from {path}: {err}")))
}

/// Seconds since the Unix epoch.
#[must_use]
pub(crate) fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| i64::try_from(duration.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Parse the API URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

/// Classify a failed response into a CLI error.
pub(crate) fn classify_problem(failure: FetchFailure) -> CliError {
    match failure {
        FetchFailure::Unauthorized => CliError::validation(
            "the server rejected the session; run `kodu login` again",
        ),
        FetchFailure::Api {
            status: status @ (400 | 409 | 422),
            message,
        } => CliError::validation(
            message.unwrap_or_else(|| format!("request rejected with status {status}")),
        ),
        FetchFailure::Api {
            status,
            message: Some(message),
        } => CliError::failure(anyhow!("{message} (status {status})")),
        FetchFailure::Api {
            status,
            message: None,
        } => CliError::failure(anyhow!("request failed with status {status}")),
        other => CliError::failure(other),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    use httpmock::MockServer;
    use kodu_api_models::Role;
    use kodu_core::TokenStore;
    use kodu_test_support::fixtures::token_for;
    use reqwest::Client;
    use uuid::Uuid;

    use super::AppContext;
    use crate::token_store::FileTokenStore;

    pub(crate) fn temp_token_path() -> PathBuf {
        std::env::temp_dir().join(format!(
            "kodu-cli-test-{}-{}/token",
            std::process::id(),
            Uuid::new_v4()
        ))
    }

    /// Context pointed at `server` with no stored token.
    pub(crate) fn context_with(server: &MockServer) -> AppContext {
        AppContext {
            client: Client::new(),
            base_url: server.base_url().parse().expect("valid URL"),
            tokens: FileTokenStore::new(temp_token_path()),
        }
    }

    /// Context pointed at `server` holding a token for `user_id`/`role`.
    /// Returns the token so mocks can match the bearer header.
    pub(crate) fn logged_in(server: &MockServer, user_id: &str, role: Role) -> (AppContext, String) {
        let ctx = context_with(server);
        let token = token_for(user_id, role);
        ctx.tokens.save(&token).expect("store token");
        (ctx, format!("Bearer {token}"))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{context_with, logged_in};
    use super::*;
    use anyhow::Result;
    use httpmock::prelude::*;
    use reqwest::Method;
    use kodu_api_models::{ApiMessage, Role};
    use serde_json::json;

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(CliError::validation("bad").exit_code(), 2);
        assert_eq!(CliError::failure(anyhow!("boom")).exit_code(), 3);
        assert_eq!(CliError::validation("bad").display_message(), "bad");
    }

    #[test]
    fn parse_url_rejects_invalid_input() {
        assert!(parse_url("not a url").is_err());
        assert!(parse_url("https://kodu-erp.onrender.com/api").is_ok());
    }

    #[test]
    fn endpoint_keeps_api_prefix() -> Result<()> {
        let server = MockServer::start();
        let mut ctx = context_with(&server);
        ctx.base_url = format!("{}/api", server.base_url()).parse()?;
        let url = ctx.endpoint("auth/login").map_err(|err| anyhow!(err.display_message()))?;
        assert_eq!(url.path(), "/api/auth/login");
        Ok(())
    }

    #[test]
    fn session_requires_stored_token() {
        let server = MockServer::start();
        let ctx = context_with(&server);
        let err = ctx.session().expect_err("no token stored");
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("kodu login"));
    }

    #[tokio::test]
    async fn bearer_header_is_attached() -> Result<()> {
        let server = MockServer::start_async().await;
        let (ctx, bearer) = logged_in(&server, "u1", Role::Admin);
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/complaints/all")
                .header("authorization", bearer.as_str());
            then.status(200).json_body(json!({"message": "ok"}));
        });

        let session = ctx.session().map_err(|err| anyhow!(err.display_message()))?;
        let reply: ApiMessage = ctx
            .get_json("complaints/all", Some(&session))
            .await
            .map_err(|err| anyhow!(err.display_message()))?;
        assert_eq!(reply.message.as_deref(), Some("ok"));
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn problems_are_classified() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/bad");
            then.status(400).json_body(json!({"message": "Email already exists"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/denied");
            then.status(401);
        });
        server.mock(|when, then| {
            when.method(GET).path("/broken");
            then.status(500).body("oops");
        });
        let ctx = context_with(&server);

        let bad = ctx.get_json::<ApiMessage>("bad", None).await.expect_err("400");
        assert_eq!(bad.exit_code(), 2);
        assert_eq!(bad.display_message(), "Email already exists");

        let denied = ctx.get_json::<ApiMessage>("denied", None).await.expect_err("401");
        assert_eq!(denied.exit_code(), 2);
        assert!(denied.display_message().contains("kodu login"));

        let broken = ctx.get_json::<ApiMessage>("broken", None).await.expect_err("500");
        assert_eq!(broken.exit_code(), 3);
        assert!(broken.display_message().contains("status 500"));
        Ok(())
    }

    #[tokio::test]
    async fn empty_success_body_decodes_as_null() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/students/approve-all");
            then.status(200);
        });
        let ctx = context_with(&server);
        let reply: Option<ApiMessage> = ctx
            .send_empty(Method::POST, "students/approve-all", None)
            .await
            .map_err(|err| anyhow!(err.display_message()))?;
        assert!(reply.is_none());
        Ok(())
    }
}
