use gloo::console;
use kodu_api_models::{LoginRequest, LoginResponse};
use kodu_core::endpoints;
use kodu_core::routes::home_route;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::{AppRoute, SessionCtx};
use crate::components::inputs::{setter, text_field};
use crate::format::failure_text;
use crate::hooks::use_api;

#[function_component(Login)]
pub(crate) fn login() -> Html {
    let api = use_api();
    let ctx = use_context::<SessionCtx>();
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let request = LoginRequest {
                email: email.trim().to_string(),
                password: (*password).clone(),
            };
            let client = api.client.clone();
            let ctx = ctx.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let busy = busy.clone();
            busy.set(true);
            error.set(None);
            spawn_local(async move {
                let outcome = client
                    .post_json::<_, LoginResponse>(endpoints::LOGIN, None, &request)
                    .await;
                busy.set(false);
                let response = match outcome {
                    Ok(response) => response,
                    Err(failure) => {
                        error.set(Some(failure_text(&failure, "Login failed")));
                        return;
                    }
                };
                let Some(ctx) = ctx else {
                    return;
                };
                match ctx.sign_in(&response.token) {
                    Ok(session) => {
                        console::log!("logged in", session.role().as_str());
                        if let Some(navigator) = navigator {
                            navigator.push(&AppRoute::from_core(home_route(session.role())));
                        }
                    }
                    Err(err) => {
                        console::error!("login token rejected", err.to_string());
                        error.set(Some(
                            "There was an error during login. Please try again.".to_string(),
                        ));
                    }
                }
            });
        })
    };

    html! {
        <section class="card narrow">
            <h2>{"Login"}</h2>
            {error.as_ref().map(|text| html! { <p class="error-text">{text.clone()}</p> }).unwrap_or_default()}
            <form {onsubmit}>
                {text_field("Email", "email", &email, setter(&email))}
                {text_field("Password", "password", &password, setter(&password))}
                <button class="solid" type="submit" disabled={*busy}>
                    {if *busy { "Logging in..." } else { "Login" }}
                </button>
            </form>
            <p class="muted">
                {"New here? "}
                <Link<AppRoute> to={AppRoute::Register}>{"Create an account"}</Link<AppRoute>>
            </p>
        </section>
    }
}
