//! HTTP client helpers (REST).
//!
//! # Design
//! - Every call returns `Result<_, FetchFailure>` so pages share one failure
//!   taxonomy with the CLI.
//! - Non-2xx bodies are read as text and classified by
//!   [`FetchFailure::from_status`]; nothing is retried.
//! - Empty success bodies decode as JSON `null`.

use gloo::console;
use gloo_net::http::{Request, Response};
use kodu_api_models::StudentProfile;
use kodu_core::fetch::coerce_list;
use kodu_core::profile::decode_profile;
use kodu_core::{FetchFailure, Session, endpoints};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use web_sys::FormData;

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        endpoints::join(&self.base_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
    ) -> Result<T, FetchFailure> {
        let request = authorize(Request::get(&self.url(path)), session);
        finish(path, request.send().await).await
    }

    /// GET a list, tolerating the wrapped and malformed shapes the backend
    /// sometimes returns.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
    ) -> Result<Vec<T>, FetchFailure> {
        let raw: Value = self.get(path, session).await?;
        Ok(coerce_list(raw))
    }

    /// Profile of one student, unwrapped from its response envelope.
    pub(crate) async fn student_profile(
        &self,
        student_id: &str,
        session: &Session,
    ) -> Result<StudentProfile, FetchFailure> {
        let raw: Value = self.get(&endpoints::student(student_id), Some(session)).await?;
        decode_profile(raw).map_err(|err| FetchFailure::Decode(err.to_string()))
    }

    pub(crate) async fn post_json<B, T>(
        &self,
        path: &str,
        session: Option<&Session>,
        body: &B,
    ) -> Result<T, FetchFailure>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = authorize(Request::post(&self.url(path)), session);
        send_json(path, request, body).await
    }

    pub(crate) async fn put_json<B, T>(
        &self,
        path: &str,
        session: Option<&Session>,
        body: &B,
    ) -> Result<T, FetchFailure>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = authorize(Request::put(&self.url(path)), session);
        send_json(path, request, body).await
    }

    /// POST without a body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
    ) -> Result<T, FetchFailure> {
        let request = authorize(Request::post(&self.url(path)), session);
        finish(path, request.send().await).await
    }

    /// POST a multipart form; the browser supplies the boundary header.
    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
        form: FormData,
    ) -> Result<T, FetchFailure> {
        let request = authorize(Request::post(&self.url(path)), session).body(form);
        finish(path, request.send().await).await
    }
}

fn authorize(request: Request, session: Option<&Session>) -> Request {
    match session {
        Some(session) => request.header("Authorization", &session.bearer()),
        None => request,
    }
}

async fn send_json<B, T>(path: &str, request: Request, body: &B) -> Result<T, FetchFailure>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let request = request
        .json(body)
        .map_err(|err| FetchFailure::Decode(err.to_string()))?;
    finish(path, request.send().await).await
}

async fn finish<T: DeserializeOwned>(
    path: &str,
    sent: Result<Response, gloo_net::Error>,
) -> Result<T, FetchFailure> {
    let response = sent.map_err(|err| {
        console::error!("request failed", path, err.to_string());
        FetchFailure::Network(err.to_string())
    })?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| FetchFailure::Network(err.to_string()))?;
    if !response.ok() {
        console::warn!("request rejected", path, status);
        return Err(FetchFailure::from_status(status, &body));
    }
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    serde_json::from_str(body).map_err(|err| {
        console::error!("unexpected response body", path, err.to_string());
        FetchFailure::Decode(err.to_string())
    })
}
