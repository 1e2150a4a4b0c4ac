use kodu_core::routes::home_route;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::{AppRoute, SessionCtx};

#[function_component(Landing)]
pub(crate) fn landing() -> Html {
    let home = use_context::<SessionCtx>()
        .and_then(|ctx| ctx.active())
        .map(|session| AppRoute::from_core(home_route(session.role())));

    html! {
        <section class="hero">
            <h1>{"Welcome to Kodu ERP"}</h1>
            <p class="muted">
                {"An all-in-one ERP platform to manage your courses, students, trainers, and more!"}
            </p>
            <div class="actions">
                {match home {
                    Some(home) => html! {
                        <Link<AppRoute> classes="solid" to={home}>{"Go to dashboard"}</Link<AppRoute>>
                    },
                    None => html! {
                        <>
                            <Link<AppRoute> classes="solid" to={AppRoute::Login}>{"Explore Now"}</Link<AppRoute>>
                            <Link<AppRoute> classes="ghost" to={AppRoute::Register}>{"Register"}</Link<AppRoute>>
                        </>
                    },
                }}
            </div>
        </section>
    }
}
