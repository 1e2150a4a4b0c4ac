use gloo::dialogs::alert;
use kodu_api_models::{ApiMessage, StudentProfile};
use kodu_core::endpoints;
use kodu_core::fees::FeeForm;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{fee_inputs, form_problem};
use crate::components::status::render_resource;
use crate::features::PageProps;
use crate::format::failure_text;
use crate::hooks::{use_api, use_listing};

#[function_component(SetFeesForNewStudent)]
pub(crate) fn set_fees_for_new_student(props: &PageProps) -> Html {
    let api = use_api();
    let students = use_listing::<StudentProfile>(
        endpoints::ALL_STUDENTS,
        props.session.clone(),
        "Error fetching students",
    );
    let form = use_state(FeeForm::default);

    let on_student = {
        let form = form.clone();
        Callback::from(move |student_id: String| {
            form.set(FeeForm::new(student_id, form.amount.clone()));
        })
    };
    let on_amount = {
        let form = form.clone();
        Callback::from(move |amount: String| {
            form.set(FeeForm::new(form.student_id.clone(), amount));
        })
    };

    let onsubmit = {
        let form = form.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let request = match form.set_fee_request() {
                Ok(request) => request,
                Err(err) => {
                    alert(&form_problem(&err));
                    return;
                }
            };
            let form = form.clone();
            let client = client.clone();
            let session = session.clone();
            spawn_local(async move {
                match client
                    .post_json::<_, Option<ApiMessage>>(endpoints::SET_FEE, Some(&session), &request)
                    .await
                {
                    Ok(reply) => {
                        alert(&reply.unwrap_or_default().message_or("Fee successfully set"));
                        form.set(FeeForm::default());
                    }
                    Err(failure) => alert(&failure_text(&failure, "Error setting fee")),
                }
            });
        })
    };

    let view = |students: &Vec<StudentProfile>| {
        html! {
            <form {onsubmit}>
                {fee_inputs(students, &form.student_id, &form.amount, on_student, on_amount)}
                <button class="solid" type="submit">{"Set Fee"}</button>
            </form>
        }
    };

    html! {
        <section class="card narrow">
            <h2>{"Set Fees for New Student"}</h2>
            {render_resource(&students.snapshot(), view)}
        </section>
    }
}
