//! Application root: contexts, router and the route-to-page switch.

use gloo::console;
use kodu_api_models::Role;
use kodu_core::Session;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::shell::AppShell;
use crate::components::status::EmptyState;
use crate::config;
use crate::features::admin::{ApproveUsers, ViewQueries};
use crate::features::counsellor::ApproveStudents;
use crate::features::dashboards::{FeePortal, RoleDashboard};
use crate::features::fees::{SetFeesForNewStudent, SubmitStudentFees, ViewStudentList, ViewTodayFees};
use crate::features::public::{Landing, Login, Register};
use crate::features::student::{EditProfile, StudentDashboard};
use crate::features::trainer::{
    AddBatch, AddCourse, ManageAttendance, StudentSummary, UploadAssignment, ViewAssignments,
};

mod api;
mod routes;
mod session;

pub(crate) use api::ApiCtx;
pub(crate) use routes::AppRoute;
pub(crate) use session::SessionCtx;

#[function_component(KoduApp)]
fn kodu_app() -> Html {
    let api_ctx = use_memo(|_| ApiCtx::new(config::api_base_url()), ());
    let session = use_state(session::restore);

    let session_ctx = SessionCtx {
        current: (*session).clone(),
        on_change: {
            let session = session.clone();
            Callback::from(move |next: Option<Session>| session.set(next))
        },
    };
    let render_ctx = session_ctx.clone();

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <ContextProvider<SessionCtx> context={session_ctx}>
                <BrowserRouter>
                    <AppShell>
                        <Switch<AppRoute> render={move |route| switch(route, render_ctx.active())} />
                    </AppShell>
                </BrowserRouter>
            </ContextProvider<SessionCtx>>
        </ContextProvider<ApiCtx>>
    }
}

/// Page for `route`. Protected pages redirect to login before anything is
/// fetched when no usable session exists.
fn switch(route: AppRoute, session: Option<Session>) -> Html {
    match (route, session) {
        (AppRoute::Landing, _) => html! { <Landing /> },
        (AppRoute::Login, _) => html! { <Login /> },
        (AppRoute::Register, _) => html! { <Register /> },
        (AppRoute::NotFound, _) => html! {
            <EmptyState title="Page not found" description="Use the menu to return to your dashboard." />
        },
        (_, None) => html! { <Redirect<AppRoute> to={AppRoute::Login} /> },
        (AppRoute::AdminDashboard, Some(_)) => html! { <RoleDashboard role={Role::Admin} /> },
        (AppRoute::CounsellorDashboard, Some(_)) => {
            html! { <RoleDashboard role={Role::Counsellor} /> }
        }
        (AppRoute::TrainerDashboard, Some(_)) => html! { <RoleDashboard role={Role::Trainer} /> },
        (AppRoute::FeePortal, Some(_)) => html! { <FeePortal /> },
        (AppRoute::ViewTodayFees, Some(_)) => html! { <ViewTodayFees /> },
        (AppRoute::ApproveUsers, Some(session)) => html! { <ApproveUsers {session} /> },
        (AppRoute::ViewQueries, Some(session)) => html! { <ViewQueries {session} /> },
        (AppRoute::SubmitStudentFees, Some(session)) => html! { <SubmitStudentFees {session} /> },
        (AppRoute::ViewStudentList, Some(session)) => html! { <ViewStudentList {session} /> },
        (AppRoute::SetFeesForNewStudent, Some(session)) => {
            html! { <SetFeesForNewStudent {session} /> }
        }
        (AppRoute::ApproveStudents, Some(session)) => html! { <ApproveStudents {session} /> },
        (AppRoute::AddCourse, Some(session)) => html! { <AddCourse {session} /> },
        (AppRoute::AddBatch, Some(session)) => html! { <AddBatch {session} /> },
        (AppRoute::ManageAttendance, Some(session)) => html! { <ManageAttendance {session} /> },
        (AppRoute::UploadAssignment, Some(session)) => html! { <UploadAssignment {session} /> },
        (AppRoute::ViewAssignments, Some(session)) => html! { <ViewAssignments {session} /> },
        (AppRoute::StudentSummary, Some(session)) => html! { <StudentSummary {session} /> },
        (AppRoute::StudentDashboard, Some(session)) => html! { <StudentDashboard {session} /> },
        (AppRoute::EditProfile, Some(session)) => html! { <EditProfile {session} /> },
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    console::log!("kodu-ui starting", config::api_base_url());
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<KoduApp>::with_root(root).render();
    } else {
        yew::Renderer::<KoduApp>::new().render();
    }
}
