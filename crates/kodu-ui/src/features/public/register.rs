use gloo::dialogs::alert;
use kodu_api_models::{ApiMessage, RegisterRequest, Role};
use kodu_core::endpoints;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::AppRoute;
use crate::components::inputs::{event_value, setter, text_field};
use crate::format::failure_text;
use crate::hooks::use_api;

/// Roles a visitor may request; admins are provisioned by the backend.
fn offered_roles() -> impl Iterator<Item = Role> {
    Role::all().into_iter().filter(|role| *role != Role::Admin)
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin",
        Role::Trainer => "Trainer",
        Role::Counsellor => "Counsellor",
        Role::Student => "Student",
    }
}

#[function_component(Register)]
pub(crate) fn register() -> Html {
    let api = use_api();
    let navigator = use_navigator();
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let role = use_state(|| Role::Student);

    let onsubmit = {
        let (name, email, password, role) =
            (name.clone(), email.clone(), password.clone(), role.clone());
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let request = RegisterRequest {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password: (*password).clone(),
                role: *role,
            };
            let client = api.client.clone();
            let navigator = navigator.clone();
            let (name, email, password, role) =
                (name.clone(), email.clone(), password.clone(), role.clone());
            spawn_local(async move {
                match client
                    .post_json::<_, Option<ApiMessage>>(endpoints::REGISTER, None, &request)
                    .await
                {
                    Ok(reply) => {
                        alert(&reply.unwrap_or_default().message_or("Registration successful!"));
                        name.set(String::new());
                        email.set(String::new());
                        password.set(String::new());
                        role.set(Role::Student);
                        if let Some(navigator) = navigator {
                            navigator.push(&AppRoute::Landing);
                        }
                    }
                    Err(failure) => alert(&failure_text(&failure, "Registration failed")),
                }
            });
        })
    };

    let onchange = {
        let role = role.clone();
        Callback::from(move |event: Event| {
            if let Ok(next) = event_value(&event).parse::<Role>() {
                role.set(next);
            }
        })
    };

    html! {
        <section class="card narrow">
            <h2>{"Register"}</h2>
            <form {onsubmit}>
                {text_field("Name", "text", &name, setter(&name))}
                {text_field("Email", "email", &email, setter(&email))}
                {text_field("Password", "password", &password, setter(&password))}
                <label class="stack">
                    <span>{"Select Role"}</span>
                    <select {onchange}>
                        { for offered_roles().map(|option| html! {
                            <option value={option.as_str()} selected={option == *role}>
                                {role_label(option)}
                            </option>
                        }) }
                    </select>
                </label>
                <button class="solid" type="submit">{"Register"}</button>
            </form>
            <p class="muted">
                {"Already registered? "}
                <Link<AppRoute> to={AppRoute::Login}>{"Login"}</Link<AppRoute>>
            </p>
        </section>
    }
}
