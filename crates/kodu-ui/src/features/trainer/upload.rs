use gloo::dialogs::alert;
use kodu_api_models::{ApiMessage, Batch};
use kodu_core::assignments::{MISSING_UPLOAD_FIELDS, UploadDraft};
use kodu_core::endpoints;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::batch_picker;
use crate::components::inputs::{event_file, event_value};
use crate::components::status::render_resource;
use crate::features::PageProps;
use crate::format::failure_text;
use crate::hooks::{use_api, use_listing};

/// Multipart body expected by the upload endpoint.
fn upload_form(draft: &UploadDraft, file: &File) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    form.append_with_str("batchId", draft.batch_id.trim())?;
    form.append_with_str("title", draft.title.trim())?;
    form.append_with_blob_and_filename("assignmentFile", file, &file.name())?;
    Ok(form)
}

#[function_component(UploadAssignment)]
pub(crate) fn upload_assignment(props: &PageProps) -> Html {
    let api = use_api();
    let batches =
        use_listing::<Batch>(endpoints::ALL_BATCHES, props.session.clone(), "Error fetching batches");
    let draft = use_state(UploadDraft::default);
    let file = use_state(|| None::<File>);
    let busy = use_state(|| false);

    let on_pick = {
        let draft = draft.clone();
        Callback::from(move |batch_id: String| {
            draft.set(UploadDraft {
                batch_id,
                ..(*draft).clone()
            });
        })
    };
    let on_title = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            draft.set(UploadDraft {
                title: event_value(&event),
                ..(*draft).clone()
            });
        })
    };
    let on_file = {
        let draft = draft.clone();
        let file = file.clone();
        Callback::from(move |event: Event| {
            let picked = event_file(&event);
            draft.set(UploadDraft {
                file_name: picked.as_ref().map(File::name),
                ..(*draft).clone()
            });
            file.set(picked);
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let file = file.clone();
        let busy = busy.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(chosen) = (*file).clone().filter(|_| draft.validate().is_ok()) else {
                alert(MISSING_UPLOAD_FIELDS);
                return;
            };
            let form = match upload_form(&draft, &chosen) {
                Ok(form) => form,
                Err(err) => {
                    alert(&format!("Unable to prepare the upload: {err:?}"));
                    return;
                }
            };
            let client = client.clone();
            let session = session.clone();
            let draft = draft.clone();
            let file = file.clone();
            let busy = busy.clone();
            busy.set(true);
            spawn_local(async move {
                let outcome = client
                    .post_form::<Option<ApiMessage>>(endpoints::UPLOAD_ASSIGNMENT, Some(&session), form)
                    .await;
                busy.set(false);
                match outcome {
                    Ok(reply) => {
                        alert(&reply.unwrap_or_default().message_or("Assignment uploaded successfully"));
                        draft.set(UploadDraft::default());
                        file.set(None);
                    }
                    Err(failure) => alert(&failure_text(&failure, "Error uploading assignment")),
                }
            });
        })
    };

    let picker = render_resource(&batches.snapshot(), |batches: &Vec<Batch>| {
        batch_picker(batches, &draft.batch_id, on_pick)
    });

    html! {
        <section class="card narrow">
            <h2>{"Upload Assignment"}</h2>
            <form {onsubmit}>
                {picker}
                <label class="stack">
                    <span>{"Title"}</span>
                    <input type="text" value={draft.title.clone()} oninput={on_title} />
                </label>
                <label class="stack">
                    <span>{"File"}</span>
                    <input type="file" onchange={on_file} />
                </label>
                <button class="solid" type="submit" disabled={*busy}>
                    {if *busy { "Uploading..." } else { "Upload" }}
                </button>
            </form>
        </section>
    }
}
