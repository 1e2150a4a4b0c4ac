//! Read-only list of complaints raised by students.

use kodu_api_models::Complaint;
use kodu_core::endpoints;
use yew::prelude::*;

use crate::components::status::{EmptyState, render_resource};
use crate::features::PageProps;
use crate::format::person_line;
use crate::hooks::{use_api, use_resource};

#[function_component(ViewQueries)]
pub(crate) fn view_queries(props: &PageProps) -> Html {
    let api = use_api();
    let complaints = use_resource::<Vec<Complaint>>();

    {
        let complaints = complaints.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        use_effect_with_deps(
            move |_| {
                complaints.load(
                    async move {
                        client
                            .get_list::<Complaint>(endpoints::ALL_COMPLAINTS, Some(&session))
                            .await
                    },
                    "Failed to fetch complaints",
                );
                || ()
            },
            (),
        );
    }

    let view = |list: &Vec<Complaint>| {
        if list.is_empty() {
            return html! { <EmptyState title="No queries found" /> };
        }
        html! {
            <div class="stack">
                { for list.iter().map(|complaint| html! {
                    <article class="card" key={complaint.id.clone()}>
                        <p><strong>{"Student: "}</strong>{person_line(complaint.student.as_ref())}</p>
                        <p><strong>{"Trainer: "}</strong>{person_line(complaint.trainer.as_ref())}</p>
                        <p>{complaint.message.clone()}</p>
                    </article>
                }) }
            </div>
        }
    };

    html! {
        <section>
            <h2>{"Student Queries"}</h2>
            {render_resource(&complaints.snapshot(), view)}
        </section>
    }
}
