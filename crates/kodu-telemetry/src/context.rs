//! Span helpers for commands and outbound requests.
//!
//! # Design
//! - One span per CLI invocation carries the command name and build identifier.
//! - Each outbound request gets a child span; the status is recorded once known.

use tracing::Span;

use crate::init::build_sha;

/// Span wrapping a whole CLI invocation.
#[must_use]
pub fn command_span(command: &str) -> Span {
    tracing::info_span!("kodu", command = %command, build_sha = %build_sha())
}

/// Span for one outbound HTTP request. `status` starts empty and is filled in
/// with [`record_status`].
#[must_use]
pub fn request_span(method: &str, path: &str) -> Span {
    tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        status = tracing::field::Empty
    )
}

/// Record the response status on a request span.
pub fn record_status(span: &Span, status: u16) {
    span.record("status", status);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_build_without_subscriber() {
        let span = request_span("GET", "batches/allbatches");
        record_status(&span, 200);
        let _entered = command_span("batches list").entered();
    }
}
