use kodu_api_models::{Batch, SubmissionRow};
use kodu_core::endpoints;
use yew::prelude::*;

use super::batch_picker;
use crate::components::status::{EmptyState, render_resource};
use crate::features::PageProps;
use crate::format::{NOT_AVAILABLE, person_line};
use crate::hooks::{use_api, use_listing, use_resource};

fn link(href: Option<&str>, text: &'static str) -> Html {
    match href.filter(|href| !href.trim().is_empty()) {
        Some(href) => html! {
            <a href={href.to_string()} target="_blank" rel="noopener noreferrer">{text}</a>
        },
        None => html! { {NOT_AVAILABLE} },
    }
}

#[function_component(ViewAssignments)]
pub(crate) fn view_assignments(props: &PageProps) -> Html {
    let api = use_api();
    let batches =
        use_listing::<Batch>(endpoints::ALL_BATCHES, props.session.clone(), "Error fetching batches");
    let selected = use_state(String::new);
    let rows = use_resource::<Vec<SubmissionRow>>();

    let on_pick = {
        let selected = selected.clone();
        let rows = rows.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |batch_id: String| {
            selected.set(batch_id.clone());
            rows.reset();
            if batch_id.is_empty() {
                return;
            }
            let client = client.clone();
            let session = session.clone();
            rows.load(
                async move {
                    client
                        .get_list::<SubmissionRow>(&endpoints::batch_assignments(&batch_id), Some(&session))
                        .await
                },
                "Error fetching assignments",
            );
        })
    };

    let picker = render_resource(&batches.snapshot(), |batches: &Vec<Batch>| {
        batch_picker(batches, &selected, on_pick)
    });

    let table = render_resource(&rows.snapshot(), |rows: &Vec<SubmissionRow>| {
        if rows.is_empty() {
            return html! { <EmptyState title="No assignments for this batch" /> };
        }
        html! {
            <table class="table">
                <thead>
                    <tr>
                        <th>{"Title"}</th><th>{"File"}</th>
                        <th>{"Student"}</th><th>{"Submission"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for rows.iter().enumerate().map(|(index, row)| html! {
                        <tr key={format!("{}-{index}", row.id)}>
                            <td>{row.title.clone()}</td>
                            <td>{link(row.file_url.as_deref(), "Download")}</td>
                            <td>{person_line(row.student.as_ref())}</td>
                            <td>{link(row.submission_link.as_deref(), "Open")}</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        }
    });

    html! {
        <section>
            <h2>{"View Assignments"}</h2>
            {picker}
            {table}
        </section>
    }
}
