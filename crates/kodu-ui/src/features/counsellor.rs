//! Counsellor approval queue for student registrations.

use gloo::dialogs::alert;
use kodu_api_models::{ApiMessage, ApprovalAction, ApprovalRequest, StudentProfile};
use kodu_core::approvals::PendingList;
use kodu_core::endpoints;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::status::{EmptyState, render_resource};
use crate::features::PageProps;
use crate::format::failure_text;
use crate::hooks::{use_api, use_resource};

#[function_component(ApproveStudents)]
pub(crate) fn approve_students(props: &PageProps) -> Html {
    let api = use_api();
    let pending = use_resource::<PendingList<StudentProfile>>();

    {
        let pending = pending.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        use_effect_with_deps(
            move |_| {
                pending.load(
                    async move {
                        client
                            .get_list::<StudentProfile>(endpoints::PENDING_STUDENTS, Some(&session))
                            .await
                            .map(PendingList::new)
                    },
                    "Error fetching pending students",
                );
                || ()
            },
            (),
        );
    }

    let approve = {
        let pending = pending.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |student_id: String| {
            let pending = pending.clone();
            let client = client.clone();
            let session = session.clone();
            spawn_local(async move {
                let outcome = client
                    .post_json::<_, Option<ApiMessage>>(
                        &endpoints::approve_student(&student_id),
                        Some(&session),
                        &ApprovalRequest {
                            action: ApprovalAction::Approve,
                        },
                    )
                    .await;
                match outcome {
                    Ok(reply) => {
                        alert(&reply.unwrap_or_default().message_or("Student approved"));
                        pending.update(|list| {
                            list.approve_removed(&student_id);
                        });
                    }
                    Err(failure) => alert(&failure_text(&failure, "Error approving student")),
                }
            });
        })
    };

    let approve_all = {
        let pending = pending.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |_: MouseEvent| {
            let pending = pending.clone();
            let client = client.clone();
            let session = session.clone();
            spawn_local(async move {
                match client
                    .post_empty::<Option<ApiMessage>>(endpoints::APPROVE_ALL_STUDENTS, Some(&session))
                    .await
                {
                    Ok(reply) => {
                        alert(&reply.unwrap_or_default().message_or("All students approved"));
                        pending.update(PendingList::clear);
                    }
                    Err(failure) => alert(&failure_text(&failure, "Error approving all students")),
                }
            });
        })
    };

    let view = |list: &PendingList<StudentProfile>| {
        if list.is_empty() {
            return html! { <EmptyState title="No pending students" /> };
        }
        html! {
            <>
                <div class="toolbar">
                    <button class="solid" onclick={approve_all.clone()}>{"Approve All"}</button>
                </div>
                <table class="table">
                    <thead>
                        <tr><th>{"Name"}</th><th>{"Email"}</th><th>{"Phone"}</th><th>{"Actions"}</th></tr>
                    </thead>
                    <tbody>
                        { for list.entries().iter().map(|student| {
                            let onclick = {
                                let approve = approve.clone();
                                let id = student.id.clone();
                                Callback::from(move |_: MouseEvent| approve.emit(id.clone()))
                            };
                            html! {
                                <tr key={student.id.clone()}>
                                    <td>{student.name.clone()}</td>
                                    <td>{student.email.clone()}</td>
                                    <td>{student.phone_number.clone()}</td>
                                    <td><button class="solid" {onclick}>{"Approve"}</button></td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
            </>
        }
    };

    html! {
        <section>
            <h2>{"Approve Students"}</h2>
            {render_resource(&pending.snapshot(), view)}
        </section>
    }
}
