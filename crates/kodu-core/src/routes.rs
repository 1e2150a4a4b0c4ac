//! Client route table and dashboard menus.

use kodu_api_models::Role;

/// Every page the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Public landing page.
    Landing,
    /// Login form.
    Login,
    /// Registration form.
    Register,
    /// Admin home.
    AdminDashboard,
    /// Pending account approvals.
    ApproveUsers,
    /// Fee portal home.
    FeePortal,
    /// Raise and pay a fee order.
    SubmitStudentFees,
    /// Today's fee collection.
    ViewTodayFees,
    /// Students with fee details.
    ViewStudentList,
    /// Set the total fee of a new student.
    SetFeesForNewStudent,
    /// Student complaints.
    ViewQueries,
    /// Counsellor home.
    CounsellorDashboard,
    /// Pending student approvals.
    ApproveStudents,
    /// Trainer home.
    TrainerDashboard,
    /// Course builder.
    AddCourse,
    /// Batch creation.
    AddBatch,
    /// Attendance marking.
    ManageAttendance,
    /// Assignment upload.
    UploadAssignment,
    /// Assignments of a batch.
    ViewAssignments,
    /// Attendance summary of one student.
    StudentSummary,
    /// Student home.
    StudentDashboard,
    /// Student profile editor.
    EditProfile,
}

const ALL: [Route; 22] = [
    Route::Landing,
    Route::Login,
    Route::Register,
    Route::AdminDashboard,
    Route::ApproveUsers,
    Route::FeePortal,
    Route::SubmitStudentFees,
    Route::ViewTodayFees,
    Route::ViewStudentList,
    Route::SetFeesForNewStudent,
    Route::ViewQueries,
    Route::CounsellorDashboard,
    Route::ApproveStudents,
    Route::TrainerDashboard,
    Route::AddCourse,
    Route::AddBatch,
    Route::ManageAttendance,
    Route::UploadAssignment,
    Route::ViewAssignments,
    Route::StudentSummary,
    Route::StudentDashboard,
    Route::EditProfile,
];

impl Route {
    /// Every route, public ones first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &ALL
    }

    /// URL path of the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::AdminDashboard => "/admin-dashboard",
            Self::ApproveUsers => "/admin/approve-users",
            Self::FeePortal => "/fee-portal",
            Self::SubmitStudentFees => "/fee-portal/submit-student-fees",
            Self::ViewTodayFees => "/fee-portal/view-today-fees",
            Self::ViewStudentList => "/fee-portal/view-student-list",
            Self::SetFeesForNewStudent => "/fee-portal/set-fees-for-new-student",
            Self::ViewQueries => "/admin/view-queries",
            Self::CounsellorDashboard => "/counsellor-dashboard",
            Self::ApproveStudents => "/approve-students",
            Self::TrainerDashboard => "/trainer-dashboard",
            Self::AddCourse => "/trainer/add-course",
            Self::AddBatch => "/trainer/add-batch",
            Self::ManageAttendance => "/trainer/manage-attendance",
            Self::UploadAssignment => "/trainer/upload-assignment",
            Self::ViewAssignments => "/trainer/view-assignments",
            Self::StudentSummary => "/trainer/student-summary",
            Self::StudentDashboard => "/student-dashboard",
            Self::EditProfile => "/edit-profile",
        }
    }

    /// Route for a URL path. A single trailing slash is ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(rest) => rest,
        };
        ALL.iter().copied().find(|route| route.path() == trimmed)
    }

    /// Whether the page needs a session before it fetches anything.
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        !matches!(self, Self::Landing | Self::Login | Self::Register)
    }

    /// Page heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Landing => "Kodu ERP",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::AdminDashboard => "Admin Dashboard",
            Self::ApproveUsers => "Approve Users",
            Self::FeePortal => "Fee Portal",
            Self::SubmitStudentFees => "Submit Student Fees",
            Self::ViewTodayFees => "Today's Fee Collection",
            Self::ViewStudentList => "Student List",
            Self::SetFeesForNewStudent => "Set Fees for New Student",
            Self::ViewQueries => "Student Queries",
            Self::CounsellorDashboard => "Counsellor Dashboard",
            Self::ApproveStudents => "Approve Students",
            Self::TrainerDashboard => "Trainer Dashboard",
            Self::AddCourse => "Add Course",
            Self::AddBatch => "Add Batch",
            Self::ManageAttendance => "Manage Attendance",
            Self::UploadAssignment => "Upload Assignment",
            Self::ViewAssignments => "View Assignments",
            Self::StudentSummary => "Student Attendance Summary",
            Self::StudentDashboard => "Student Dashboard",
            Self::EditProfile => "Edit Profile",
        }
    }
}

/// Landing page of each role after login.
#[must_use]
pub const fn home_route(role: Role) -> Route {
    match role {
        Role::Student => Route::StudentDashboard,
        Role::Admin => Route::AdminDashboard,
        Role::Trainer => Route::TrainerDashboard,
        Role::Counsellor => Route::CounsellorDashboard,
    }
}

/// One card on a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    /// Destination.
    pub route: Route,
    /// Card blurb.
    pub blurb: &'static str,
}

const fn item(route: Route, blurb: &'static str) -> MenuItem {
    MenuItem { route, blurb }
}

const ADMIN_MENU: [MenuItem; 3] = [
    item(
        Route::ApproveUsers,
        "Approve or reject users like trainers, counsellors, etc.",
    ),
    item(Route::ViewTodayFees, "Review all fee payments received today."),
    item(Route::ViewQueries, "View and resolve student queries and issues."),
];

const COUNSELLOR_MENU: [MenuItem; 2] = [
    item(
        Route::ApproveStudents,
        "Review and approve pending student applications with ease.",
    ),
    item(
        Route::FeePortal,
        "Manage and view student fees in one consolidated place.",
    ),
];

const TRAINER_MENU: [MenuItem; 6] = [
    item(Route::AddCourse, "Create a course with subjects and topics."),
    item(Route::AddBatch, "Schedule a batch and enrol students."),
    item(Route::ManageAttendance, "Mark attendance for a batch."),
    item(Route::UploadAssignment, "Share an assignment file with a batch."),
    item(Route::ViewAssignments, "Review assignments and submissions."),
    item(Route::StudentSummary, "Check a student's attendance record."),
];

const STUDENT_MENU: [MenuItem; 1] = [item(Route::EditProfile, "Update your contact details and courses.")];

const FEE_PORTAL_MENU: [MenuItem; 4] = [
    item(
        Route::SubmitStudentFees,
        "Submit fees for a student seamlessly.",
    ),
    item(Route::ViewTodayFees, "Track today's fee collection."),
    item(Route::ViewStudentList, "Browse every enrolled student."),
    item(
        Route::SetFeesForNewStudent,
        "Set the total fee for a newly admitted student.",
    ),
];

/// Dashboard cards for `role`.
#[must_use]
pub const fn dashboard_menu(role: Role) -> &'static [MenuItem] {
    match role {
        Role::Admin => &ADMIN_MENU,
        Role::Counsellor => &COUNSELLOR_MENU,
        Role::Trainer => &TRAINER_MENU,
        Role::Student => &STUDENT_MENU,
    }
}

/// Cards on the fee portal home.
#[must_use]
pub const fn fee_portal_menu() -> &'static [MenuItem] {
    &FEE_PORTAL_MENU
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip_for_every_route() {
        for route in Route::all() {
            assert_eq!(Route::from_path(route.path()), Some(*route), "{route:?}");
        }
        assert_eq!(Route::from_path("/login/"), Some(Route::Login));
        assert_eq!(Route::from_path("/"), Some(Route::Landing));
        assert_eq!(Route::from_path("/admin/reports"), None);
    }

    #[test]
    fn only_public_pages_skip_auth() {
        let public: Vec<Route> = Route::all()
            .iter()
            .copied()
            .filter(|route| !route.requires_auth())
            .collect();
        assert_eq!(public, vec![Route::Landing, Route::Login, Route::Register]);
    }

    #[test]
    fn each_role_lands_on_its_dashboard() {
        assert_eq!(home_route(Role::Student).path(), "/student-dashboard");
        assert_eq!(home_route(Role::Admin).path(), "/admin-dashboard");
        assert_eq!(home_route(Role::Trainer).path(), "/trainer-dashboard");
        assert_eq!(home_route(Role::Counsellor).path(), "/counsellor-dashboard");
    }

    #[test]
    fn menus_only_link_protected_pages() {
        for role in Role::all() {
            assert!(dashboard_menu(role).iter().all(|item| item.route.requires_auth()));
        }
        assert_eq!(fee_portal_menu().len(), 4);
        assert!(
            fee_portal_menu()
                .iter()
                .all(|item| item.route.path().starts_with("/fee-portal/"))
        );
    }
}
