use kodu_core::routes::home_route;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::{AppRoute, SessionCtx};

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub(crate) children: Children,
}

/// Top bar with the page title, the signed-in role and a logout button.
#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let ctx = use_context::<SessionCtx>();
    let route = use_route::<AppRoute>();
    let navigator = use_navigator();

    let title = route
        .as_ref()
        .and_then(AppRoute::core)
        .map_or("Kodu ERP", |route| route.title());
    let session = ctx.as_ref().and_then(SessionCtx::active);

    let logout = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(ctx) = &ctx {
                ctx.sign_out();
            }
            if let Some(navigator) = &navigator {
                navigator.push(&AppRoute::Login);
            }
        })
    };

    html! {
        <div class="app-shell">
            <header class="topbar">
                <Link<AppRoute> classes="brand" to={AppRoute::Landing}>{"Kodu ERP"}</Link<AppRoute>>
                <h1>{title}</h1>
                {match session {
                    Some(session) => html! {
                        <div class="account">
                            <Link<AppRoute> to={AppRoute::from_core(home_route(session.role()))}>
                                {format!("{} home", session.role())}
                            </Link<AppRoute>>
                            <button class="ghost" onclick={logout}>{"Logout"}</button>
                        </div>
                    },
                    None => html! {
                        <div class="account">
                            <Link<AppRoute> to={AppRoute::Login}>{"Login"}</Link<AppRoute>>
                        </div>
                    },
                }}
            </header>
            <main>{ for props.children.iter() }</main>
        </div>
    }
}
