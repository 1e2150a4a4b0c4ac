//! Command handlers grouped by dashboard.

pub(crate) mod assignments;
pub(crate) mod attendance;
pub(crate) mod auth;
pub(crate) mod batches;
pub(crate) mod complaints;
pub(crate) mod courses;
pub(crate) mod fees;
pub(crate) mod students;
pub(crate) mod users;
