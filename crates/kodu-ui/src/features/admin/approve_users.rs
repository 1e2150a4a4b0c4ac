//! Approval queue for newly registered users.

use gloo::dialogs::alert;
use kodu_api_models::{ApiMessage, ApprovalAction, ApprovalRequest, User};
use kodu_core::approvals::PendingList;
use kodu_core::endpoints;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::status::{EmptyState, render_resource};
use crate::features::PageProps;
use crate::format::{NOT_AVAILABLE, failure_text};
use crate::hooks::{use_api, use_resource};

#[function_component(ApproveUsers)]
pub(crate) fn approve_users(props: &PageProps) -> Html {
    let api = use_api();
    let pending = use_resource::<PendingList<User>>();

    {
        let pending = pending.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        use_effect_with_deps(
            move |_| {
                pending.load(
                    async move {
                        client
                            .get_list::<User>(endpoints::PENDING_USERS, Some(&session))
                            .await
                            .map(PendingList::new)
                    },
                    "Failed to fetch pending users",
                );
                || ()
            },
            (),
        );
    }

    let decide = {
        let pending = pending.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |(user_id, action): (String, ApprovalAction)| {
            let pending = pending.clone();
            let client = client.clone();
            let session = session.clone();
            spawn_local(async move {
                let outcome = client
                    .post_json::<_, Option<ApiMessage>>(
                        &endpoints::approve_user(&user_id),
                        Some(&session),
                        &ApprovalRequest { action },
                    )
                    .await;
                match outcome {
                    Ok(reply) => {
                        let done = match action {
                            ApprovalAction::Approve => "User approved",
                            ApprovalAction::Reject => "User rejected",
                        };
                        alert(&reply.unwrap_or_default().message_or(done));
                        pending.update(|list| {
                            list.approve_removed(&user_id);
                        });
                    }
                    Err(failure) => alert(&failure_text(&failure, "Something went wrong!")),
                }
            });
        })
    };

    let view = |list: &PendingList<User>| {
        if list.is_empty() {
            return html! { <EmptyState title="No pending users" /> };
        }
        html! {
            <table class="table">
                <thead>
                    <tr><th>{"Name"}</th><th>{"Email"}</th><th>{"Role"}</th><th>{"Actions"}</th></tr>
                </thead>
                <tbody>
                    { for list.entries().iter().map(|user| {
                        let approve = {
                            let decide = decide.clone();
                            let id = user.id.clone();
                            Callback::from(move |_: MouseEvent| decide.emit((id.clone(), ApprovalAction::Approve)))
                        };
                        let reject = {
                            let decide = decide.clone();
                            let id = user.id.clone();
                            Callback::from(move |_: MouseEvent| decide.emit((id.clone(), ApprovalAction::Reject)))
                        };
                        html! {
                            <tr key={user.id.clone()}>
                                <td>{user.name.clone()}</td>
                                <td>{user.email.clone()}</td>
                                <td>{user.role.map_or(NOT_AVAILABLE, |role| role.as_str())}</td>
                                <td class="actions">
                                    <button class="solid" onclick={approve}>{"Approve"}</button>
                                    <button class="danger" onclick={reject}>{"Reject"}</button>
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        }
    };

    html! {
        <section>
            <h2>{"Pending User Approvals"}</h2>
            {render_resource(&pending.snapshot(), view)}
        </section>
    }
}
