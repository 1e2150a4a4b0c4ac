#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Telemetry primitives shared by the Kodu native binaries.
//!
//! Layout: init.rs (subscriber setup and build identifier), context.rs
//! (command and request spans), error.rs (telemetry errors).

pub mod context;
pub mod error;
pub mod init;

pub use context::{command_span, record_status, request_span};
pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
