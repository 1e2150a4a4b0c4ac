use kodu_api_models::Role;
use kodu_core::routes::{dashboard_menu, fee_portal_menu};
use yew::prelude::*;

use crate::components::menu::MenuGrid;

#[derive(Properties, PartialEq)]
pub(crate) struct RoleDashboardProps {
    pub(crate) role: Role,
}

fn greeting(role: Role) -> &'static str {
    match role {
        Role::Admin => "Welcome, Admin! Manage your ERP system from here.",
        Role::Counsellor => "Welcome, Counsellor! Approve students and manage fees.",
        Role::Trainer => "Welcome, Trainer! Manage courses, batches and assignments.",
        Role::Student => "Welcome back!",
    }
}

/// Home of admins, counsellors and trainers: a card per menu entry.
#[function_component(RoleDashboard)]
pub(crate) fn role_dashboard(props: &RoleDashboardProps) -> Html {
    html! {
        <section>
            <p class="lead">{greeting(props.role)}</p>
            <MenuGrid items={dashboard_menu(props.role)} />
        </section>
    }
}

#[function_component(FeePortal)]
pub(crate) fn fee_portal() -> Html {
    html! {
        <section>
            <p class="lead">{"Manage student fees: collect payments, set totals and review students."}</p>
            <MenuGrid items={fee_portal_menu()} />
        </section>
    }
}
