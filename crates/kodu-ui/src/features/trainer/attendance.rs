//! Daily attendance marking for one batch.

use gloo::console;
use gloo::dialogs::alert;
use kodu_api_models::{ApiMessage, AttendanceStatus, Batch, StudentProfile};
use kodu_core::attendance::AttendanceSheet;
use kodu_core::endpoints;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::batch_picker;
use crate::components::inputs::event_value;
use crate::components::status::{EmptyState, render_resource};
use crate::features::PageProps;
use crate::format::{date_from_millis, failure_text, status_label};
use crate::hooks::{use_api, use_listing, use_resource};

fn today() -> String {
    date_from_millis(js_sys::Date::now()).unwrap_or_default()
}

#[function_component(ManageAttendance)]
pub(crate) fn manage_attendance(props: &PageProps) -> Html {
    let api = use_api();
    let batches =
        use_listing::<Batch>(endpoints::ALL_BATCHES, props.session.clone(), "Error fetching batches");
    let selected = use_state(String::new);
    let sheet = use_resource::<AttendanceSheet>();
    let date = use_state(today);

    let on_pick = {
        let selected = selected.clone();
        let sheet = sheet.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |batch_id: String| {
            selected.set(batch_id.clone());
            sheet.reset();
            if batch_id.is_empty() {
                return;
            }
            let client = client.clone();
            let session = session.clone();
            sheet.load(
                async move {
                    client
                        .get_list::<StudentProfile>(&endpoints::batch_students(&batch_id), Some(&session))
                        .await
                        .map(|roster| AttendanceSheet::from_roster(batch_id, &roster))
                },
                "Error fetching students",
            );
        })
    };

    let mark = {
        let sheet = sheet.clone();
        Callback::from(move |(student_id, status): (String, AttendanceStatus)| {
            sheet.update(|sheet| {
                if let Err(err) = sheet.set_status(&student_id, status) {
                    console::warn!("attendance mark ignored", err.to_string());
                }
            });
        })
    };

    let on_date = {
        let date = date.clone();
        Callback::from(move |event: Event| date.set(event_value(&event)))
    };

    let onsubmit = {
        let sheet = sheet.clone();
        let date = date.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(current) = sheet.snapshot().data().cloned() else {
                alert("Please select a batch");
                return;
            };
            let request = match current.submission(&date) {
                Ok(request) => request,
                Err(err) => {
                    alert(&format!("Please complete the form: {err}"));
                    return;
                }
            };
            let client = client.clone();
            let session = session.clone();
            spawn_local(async move {
                match client
                    .post_json::<_, Option<ApiMessage>>(
                        endpoints::MARK_ATTENDANCE,
                        Some(&session),
                        &request,
                    )
                    .await
                {
                    Ok(reply) => {
                        alert(&reply.unwrap_or_default().message_or("Attendance marked successfully"));
                    }
                    Err(failure) => alert(&failure_text(&failure, "Error marking attendance")),
                }
            });
        })
    };

    let picker = render_resource(&batches.snapshot(), |batches: &Vec<Batch>| {
        batch_picker(batches, &selected, on_pick)
    });

    let roster = render_resource(&sheet.snapshot(), |sheet: &AttendanceSheet| {
        if sheet.is_empty() {
            return html! { <EmptyState title="No students in this batch" /> };
        }
        html! {
            <table class="table">
                <thead><tr><th>{"Student"}</th><th>{"Status"}</th></tr></thead>
                <tbody>
                    { for sheet.rows().iter().map(|row| html! {
                        <tr key={row.student_id.clone()}>
                            <td>{row.name.clone()}</td>
                            <td class="actions">
                                { for AttendanceStatus::all().into_iter().map(|status| {
                                    let onchange = {
                                        let mark = mark.clone();
                                        let id = row.student_id.clone();
                                        Callback::from(move |_: Event| mark.emit((id.clone(), status)))
                                    };
                                    html! {
                                        <label>
                                            <input
                                                type="radio"
                                                name={format!("status-{}", row.student_id)}
                                                value={status.as_str()}
                                                checked={row.status == status}
                                                {onchange} />
                                            {status_label(status)}
                                        </label>
                                    }
                                }) }
                            </td>
                        </tr>
                    }) }
                </tbody>
            </table>
        }
    });

    html! {
        <section class="card">
            <h2>{"Manage Attendance"}</h2>
            <form {onsubmit}>
                {picker}
                <label class="stack">
                    <span>{"Date"}</span>
                    <input type="date" value={(*date).clone()} onchange={on_date} />
                </label>
                {roster}
                <button class="solid" type="submit" disabled={selected.is_empty()}>
                    {"Submit Attendance"}
                </button>
            </form>
        </section>
    }
}
