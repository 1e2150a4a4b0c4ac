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
#![allow(clippy::module_name_repetitions)]
//! Session handling, endpoint paths, fetch state and form logic for Kodu ERP.
//!
//! Nothing in this crate touches the network or the DOM. The web UI and the
//! CLI each bring their own HTTP transport and storage, and drive these types
//! so that both front ends share one set of rules.
//!
//! Layout:
//! - `session.rs`: bearer-token claims, token storage, login gating
//! - `endpoints.rs`: backend paths
//! - `fetch.rs`: request lifecycle state and failure taxonomy
//! - `course_builder.rs`, `batch_form.rs`, `profile.rs`: form drafts
//! - `attendance.rs`, `approvals.rs`, `assignments.rs`, `fees.rs`: page logic
//! - `routes.rs`: client route table

pub mod approvals;
pub mod assignments;
pub mod attendance;
pub mod batch_form;
pub mod course_builder;
pub mod endpoints;
pub mod error;
pub mod fees;
pub mod fetch;
pub mod profile;
pub mod routes;
pub mod session;

pub use error::{FormError, FormResult};
pub use fetch::{FetchFailure, Phase, Resource, Ticket};
pub use routes::Route;
pub use session::{AuthRedirect, Claims, Session, SessionError, TokenStore};
