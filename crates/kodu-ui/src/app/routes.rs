//! Routing definitions for the Kodu UI.
//!
//! Paths mirror [`kodu_core::Route`]; conversions go through the path string
//! so the two tables cannot drift apart silently.

use kodu_core::Route;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum AppRoute {
    #[at("/")]
    Landing,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/admin-dashboard")]
    AdminDashboard,
    #[at("/admin/approve-users")]
    ApproveUsers,
    #[at("/fee-portal")]
    FeePortal,
    #[at("/fee-portal/submit-student-fees")]
    SubmitStudentFees,
    #[at("/fee-portal/view-today-fees")]
    ViewTodayFees,
    #[at("/fee-portal/view-student-list")]
    ViewStudentList,
    #[at("/fee-portal/set-fees-for-new-student")]
    SetFeesForNewStudent,
    #[at("/admin/view-queries")]
    ViewQueries,
    #[at("/counsellor-dashboard")]
    CounsellorDashboard,
    #[at("/approve-students")]
    ApproveStudents,
    #[at("/trainer-dashboard")]
    TrainerDashboard,
    #[at("/trainer/add-course")]
    AddCourse,
    #[at("/trainer/add-batch")]
    AddBatch,
    #[at("/trainer/manage-attendance")]
    ManageAttendance,
    #[at("/trainer/upload-assignment")]
    UploadAssignment,
    #[at("/trainer/view-assignments")]
    ViewAssignments,
    #[at("/trainer/student-summary")]
    StudentSummary,
    #[at("/student-dashboard")]
    StudentDashboard,
    #[at("/edit-profile")]
    EditProfile,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl AppRoute {
    /// Router entry for a page of the shared route table.
    pub(crate) fn from_core(route: Route) -> Self {
        Self::recognize(route.path()).unwrap_or(Self::NotFound)
    }

    /// Shared route table entry, `None` for the not-found page.
    pub(crate) fn core(&self) -> Option<Route> {
        Route::from_path(&self.to_path())
    }
}
