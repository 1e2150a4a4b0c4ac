use gloo::dialogs::alert;
use kodu_api_models::ApiMessage;
use kodu_core::assignments::SubmissionLink;
use kodu_core::{Session, endpoints};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::inputs::event_value;
use crate::format::failure_text;
use crate::hooks::use_api;

#[derive(Properties, PartialEq)]
pub(super) struct SubmitLinkProps {
    pub(super) session: Session,
    pub(super) assignment_id: AttrValue,
    /// Fired with the accepted link once the backend stored it.
    pub(super) on_submitted: Callback<String>,
}

/// Link input for handing in one assignment.
#[function_component(SubmitLinkForm)]
pub(super) fn submit_link_form(props: &SubmitLinkProps) -> Html {
    let api = use_api();
    let link = use_state(String::new);
    let busy = use_state(|| false);

    let oninput = {
        let link = link.clone();
        Callback::from(move |event: InputEvent| link.set(event_value(&event)))
    };

    let onsubmit = {
        let link = link.clone();
        let busy = busy.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        let assignment_id = props.assignment_id.clone();
        let on_submitted = props.on_submitted.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let parsed = match SubmissionLink::parse(&link) {
                Ok(parsed) => parsed,
                Err(err) => {
                    alert(&format!("Please enter a valid link: {err}"));
                    return;
                }
            };
            let client = client.clone();
            let session = session.clone();
            let assignment_id = assignment_id.clone();
            let on_submitted = on_submitted.clone();
            let link = link.clone();
            let busy = busy.clone();
            busy.set(true);
            spawn_local(async move {
                let outcome = client
                    .post_json::<_, Option<ApiMessage>>(
                        &endpoints::submit_assignment(&assignment_id),
                        Some(&session),
                        &parsed.to_request(),
                    )
                    .await;
                busy.set(false);
                match outcome {
                    Ok(reply) => {
                        alert(&reply.unwrap_or_default().message_or("Assignment submitted"));
                        link.set(String::new());
                        on_submitted.emit(parsed.as_str().to_string());
                    }
                    Err(failure) => alert(&failure_text(&failure, "Error submitting assignment")),
                }
            });
        })
    };

    html! {
        <form class="inline" {onsubmit}>
            <input type="url" placeholder="https://github.com/..." value={(*link).clone()} {oninput} />
            <button class="solid" type="submit" disabled={*busy}>{"Submit"}</button>
        </form>
    }
}
