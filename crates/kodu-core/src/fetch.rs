//! Fetch state shared by every page.
//!
//! # Design
//! - Each request takes a [`Ticket`]; responses carrying an outdated ticket are
//!   dropped so late replies never overwrite newer selections.
//! - Failures keep the previously loaded data visible.
//! - Retries are manual: callers simply `begin` again.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use kodu_api_models::ApiMessage;

/// Object keys the backend uses to wrap lists.
const LIST_KEYS: [&str; 4] = ["batches", "students", "assignments", "data"];

/// Handle identifying one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Coarse lifecycle of a [`Resource`], for rendering branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request failed.
    Failed,
    /// Data is available.
    Ready,
}

/// Data loaded from the backend plus its request bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> Resource<T> {
    /// Empty resource.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request: marks loading, clears the error and invalidates every
    /// earlier ticket.
    pub fn begin(&mut self) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        self.loading = true;
        self.error = None;
        Ticket(self.generation)
    }

    /// Whether `ticket` still belongs to the latest request.
    #[must_use]
    pub const fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Store a successful response. Returns `false` when the ticket is stale.
    pub fn resolve(&mut self, ticket: Ticket, value: T) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.data = Some(value);
        self.loading = false;
        self.error = None;
        true
    }

    /// Record a failure without touching loaded data. Returns `false` when the
    /// ticket is stale.
    pub fn reject(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        self.error = Some(message.into());
        true
    }

    /// Forget data and invalidate in-flight requests, e.g. when the selection
    /// the data depends on changes.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.data = None;
        self.loading = false;
        self.error = None;
    }

    /// Apply an in-place change to loaded data.
    pub fn update(&mut self, change: impl FnOnce(&mut T)) {
        if let Some(data) = self.data.as_mut() {
            change(data);
        }
    }

    /// Loaded data, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Last error message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Rendering branch for the current state. Loading wins over stale data.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.data.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }
}

/// Why a backend call failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchFailure {
    /// 401 or 403: the session is missing or rejected.
    #[error("not authorized")]
    Unauthorized,
    /// Any other non-2xx status.
    #[error("request failed with status {status}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Backend `message` field, when present.
        message: Option<String>,
    },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl FetchFailure {
    /// Classify a non-2xx response from its status and raw body.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        if matches!(status, 401 | 403) {
            return Self::Unauthorized;
        }
        let message = serde_json::from_str::<ApiMessage>(body)
            .ok()
            .and_then(|parsed| parsed.message)
            .filter(|text| !text.trim().is_empty());
        Self::Api { status, message }
    }

    /// Text shown to the user: the backend message when one was sent,
    /// otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Whether the user must log in again.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Whether the failure is a 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

/// Decode a list that the backend may send bare or wrapped in an object.
///
/// Elements that do not decode are skipped; unrecognised shapes yield an
/// empty list.
#[must_use]
pub fn coerce_list<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Value::Object(mut map) => LIST_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(inner @ Value::Array(_)) => Some(inner),
                _ => None,
            })
            .map_or_else(Vec::new, coerce_list),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kodu_api_models::Batch;
    use serde_json::json;

    #[test]
    fn resolve_replaces_data() {
        let mut resource = Resource::new();
        assert_eq!(resource.phase(), Phase::Idle);
        let ticket = resource.begin();
        assert_eq!(resource.phase(), Phase::Loading);
        assert!(resource.resolve(ticket, vec![1, 2]));
        assert_eq!(resource.data(), Some(&vec![1, 2]));
        assert_eq!(resource.phase(), Phase::Ready);
    }

    #[test]
    fn reject_keeps_prior_data() {
        let mut resource = Resource::new();
        let first = resource.begin();
        resource.resolve(first, "roster");
        let second = resource.begin();
        assert!(resource.reject(second, "Error fetching students"));
        assert_eq!(resource.data(), Some(&"roster"));
        assert_eq!(resource.error(), Some("Error fetching students"));
        assert_eq!(resource.phase(), Phase::Failed);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut resource = Resource::new();
        let old = resource.begin();
        let new = resource.begin();
        assert!(!resource.resolve(old, "batch A"));
        assert!(resource.is_loading());
        assert!(resource.resolve(new, "batch B"));
        assert!(!resource.reject(old, "late failure"));
        assert_eq!(resource.data(), Some(&"batch B"));
        assert_eq!(resource.error(), None);
    }

    #[test]
    fn reset_invalidates_in_flight_request() {
        let mut resource = Resource::new();
        let ticket = resource.begin();
        resource.reset();
        assert!(!resource.resolve(ticket, 5));
        assert_eq!(resource.phase(), Phase::Idle);
    }

    #[test]
    fn begin_clears_error() {
        let mut resource: Resource<u8> = Resource::new();
        let ticket = resource.begin();
        resource.reject(ticket, "boom");
        resource.begin();
        assert_eq!(resource.error(), None);
    }

    #[test]
    fn failures_are_classified() {
        assert_eq!(FetchFailure::from_status(401, ""), FetchFailure::Unauthorized);
        assert!(FetchFailure::from_status(403, "{}").requires_login());
        let failure = FetchFailure::from_status(400, r#"{"message":"Email already exists"}"#);
        assert_eq!(failure.user_message("Registration failed"), "Email already exists");
        let bare = FetchFailure::from_status(500, "<html>");
        assert_eq!(bare.user_message("Registration failed"), "Registration failed");
        assert!(FetchFailure::from_status(404, "").is_not_found());
        assert_eq!(
            FetchFailure::Network("offline".into()).user_message("Failed"),
            "Failed"
        );
    }

    #[test]
    fn coerce_list_accepts_bare_and_wrapped_lists() {
        let bare: Vec<Batch> = coerce_list(json!([{"_id": "b1", "batchName": "Morning"}]));
        assert_eq!(bare.len(), 1);
        let wrapped: Vec<Batch> =
            coerce_list(json!({"batches": [{"_id": "b1", "batchName": "Morning"}, 7]}));
        assert_eq!(wrapped.len(), 1);
        assert_eq!(wrapped[0].batch_name, "Morning");
        let data: Vec<String> = coerce_list(json!({"data": ["x", "y"]}));
        assert_eq!(data, vec!["x".to_string(), "y".to_string()]);
        let nothing: Vec<Batch> = coerce_list(json!({"message": "none"}));
        assert!(nothing.is_empty());
        let scalar: Vec<Batch> = coerce_list(json!("oops"));
        assert!(scalar.is_empty());
    }
}
