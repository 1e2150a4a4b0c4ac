use gloo::dialogs::alert;
use kodu_api_models::{ApiMessage, CreateComplaintRequest};
use kodu_core::endpoints;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::inputs::{event_value, setter, text_field};
use crate::features::PageProps;
use crate::format::failure_text;
use crate::hooks::use_api;

/// Complaint about a trainer, listed to admins under queries.
#[function_component(ComplaintForm)]
pub(super) fn complaint_form(props: &PageProps) -> Html {
    let api = use_api();
    let trainer = use_state(String::new);
    let message = use_state(String::new);

    let on_message = {
        let message = message.clone();
        Callback::from(move |event: InputEvent| message.set(event_value(&event)))
    };

    let onsubmit = {
        let trainer = trainer.clone();
        let message = message.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let request = CreateComplaintRequest {
                trainer_id: trainer.trim().to_string(),
                message: message.trim().to_string(),
            };
            if request.trainer_id.is_empty() || request.message.is_empty() {
                alert("Please fill all fields");
                return;
            }
            let client = client.clone();
            let session = session.clone();
            let trainer = trainer.clone();
            let message = message.clone();
            spawn_local(async move {
                match client
                    .post_json::<_, Option<ApiMessage>>(
                        endpoints::CREATE_COMPLAINT,
                        Some(&session),
                        &request,
                    )
                    .await
                {
                    Ok(reply) => {
                        alert(&reply.unwrap_or_default().message_or("Complaint submitted"));
                        trainer.set(String::new());
                        message.set(String::new());
                    }
                    Err(failure) => alert(&failure_text(&failure, "Error submitting complaint")),
                }
            });
        })
    };

    html! {
        <form class="card" {onsubmit}>
            <h3>{"Raise a Query"}</h3>
            {text_field("Trainer ID", "text", &trainer, setter(&trainer))}
            <label class="stack">
                <span>{"Message"}</span>
                <textarea value={(*message).clone()} oninput={on_message} />
            </label>
            <button class="solid" type="submit">{"Send"}</button>
        </form>
    }
}
