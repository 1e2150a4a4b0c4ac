//! Student pages.

mod complaint;
mod dashboard;
mod edit_profile;
mod submission;

pub(crate) use dashboard::StudentDashboard;
pub(crate) use edit_profile::EditProfile;
