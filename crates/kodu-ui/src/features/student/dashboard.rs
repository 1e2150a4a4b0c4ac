//! Student home: profile, attendance, assignments and queries.
//!
//! The profile is fetched first; its batch id then drives the attendance
//! summary and the assignment title list.

use kodu_api_models::{Assignment, AttendanceSummary, PersonRef, StudentProfile, Submission};
use kodu_core::assignments::{empty_when_missing, is_submitted, submission_link};
use kodu_core::endpoints;
use yew::prelude::*;
use yew_router::prelude::*;

use super::complaint::ComplaintForm;
use super::submission::SubmitLinkForm;
use crate::app::AppRoute;
use crate::components::inputs::event_value;
use crate::components::status::{EmptyState, render_resource};
use crate::features::PageProps;
use crate::features::trainer::summary_card;
use crate::format::NOT_AVAILABLE;
use crate::hooks::{use_api, use_resource};

fn profile_card(profile: &StudentProfile) -> Html {
    let or_na = |value: &str| {
        if value.trim().is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            value.to_string()
        }
    };
    html! {
        <div class="card">
            <h3>{format!("Welcome, {}", profile.name)}</h3>
            <dl class="details">
                <dt>{"Email"}</dt><dd>{profile.email.clone()}</dd>
                <dt>{"Phone"}</dt><dd>{or_na(&profile.phone_number)}</dd>
                <dt>{"WhatsApp"}</dt><dd>{or_na(&profile.whatsapp_number)}</dd>
                <dt>{"Parent Phone"}</dt><dd>{or_na(&profile.parent_phone_number)}</dd>
                <dt>{"Education"}</dt><dd>{or_na(&profile.education)}</dd>
            </dl>
            <Link<AppRoute> to={AppRoute::EditProfile} classes="ghost">{"Edit Profile"}</Link<AppRoute>>
        </div>
    }
}

#[function_component(StudentDashboard)]
pub(crate) fn student_dashboard(props: &PageProps) -> Html {
    let api = use_api();
    let profile = use_resource::<StudentProfile>();
    let summary = use_resource::<AttendanceSummary>();
    let titles = use_resource::<Vec<String>>();
    let assignments = use_resource::<Vec<Assignment>>();
    let title = use_state(String::new);

    {
        let profile = profile.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        use_effect_with_deps(
            move |_| {
                profile.load(
                    async move { client.student_profile(session.user_id(), &session).await },
                    "Error fetching profile",
                );
                || ()
            },
            (),
        );
    }

    let batch_id = profile
        .snapshot()
        .data()
        .and_then(|profile| profile.batch_id.clone())
        .filter(|id| !id.is_empty());

    {
        let summary = summary.clone();
        let titles = titles.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        use_effect_with_deps(
            move |batch_id: &Option<String>| {
                if let Some(batch_id) = batch_id.clone() {
                    let summary_path = endpoints::attendance_summary(session.user_id(), &batch_id);
                    let titles_path = endpoints::assignment_titles(&batch_id);
                    let summary_client = client.clone();
                    let summary_session = session.clone();
                    summary.load(
                        async move {
                            summary_client
                                .get::<AttendanceSummary>(&summary_path, Some(&summary_session))
                                .await
                        },
                        "Error fetching attendance",
                    );
                    titles.load(
                        async move { client.get_list::<String>(&titles_path, Some(&session)).await },
                        "Error fetching assignment titles",
                    );
                }
                || ()
            },
            batch_id.clone(),
        );
    }

    let on_title = {
        let title = title.clone();
        let assignments = assignments.clone();
        let batch_id = batch_id.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |event: Event| {
            let picked = event_value(&event);
            title.set(picked.clone());
            assignments.reset();
            let Some(batch_id) = batch_id.clone().filter(|_| !picked.is_empty()) else {
                return;
            };
            let path = endpoints::assignments_by_title(&batch_id, &picked);
            let client = client.clone();
            let session = session.clone();
            assignments.load(
                async move {
                    empty_when_missing(client.get_list::<Assignment>(&path, Some(&session)).await)
                },
                "Error fetching assignments",
            );
        })
    };

    let on_submitted = {
        let assignments = assignments.clone();
        let student_id = props.session.user_id().to_string();
        Callback::from(move |(assignment_id, link): (String, String)| {
            let student_id = student_id.clone();
            assignments.update(|list| {
                if let Some(assignment) = list.iter_mut().find(|item| item.id == assignment_id) {
                    assignment.submissions.push(Submission {
                        student: PersonRef::Id(student_id),
                        submission_link: Some(link),
                    });
                }
            });
        })
    };

    let student_id = props.session.user_id().to_string();
    let assignment_list = |list: &Vec<Assignment>| {
        if list.is_empty() {
            return html! { <EmptyState title="No assignments found" /> };
        }
        html! {
            <ul class="list">
                { for list.iter().map(|assignment| {
                    let status = if is_submitted(assignment, &student_id) {
                        let link = submission_link(assignment, &student_id).map(str::to_string);
                        html! {
                            <span class="text-green">
                                {"Submitted"}
                                {link.map(|href| html! {
                                    <>{" ("}<a href={href} target="_blank" rel="noopener noreferrer">{"view"}</a>{")"}</>
                                }).unwrap_or_default()}
                            </span>
                        }
                    } else {
                        let on_submitted = on_submitted.clone();
                        let id = assignment.id.clone();
                        let forward = Callback::from(move |link: String| on_submitted.emit((id.clone(), link)));
                        html! {
                            <SubmitLinkForm
                                session={props.session.clone()}
                                assignment_id={assignment.id.clone()}
                                on_submitted={forward} />
                        }
                    };
                    html! {
                        <li key={assignment.id.clone()}>
                            <strong>{assignment.title.clone()}</strong>
                            {" "}
                            <a href={assignment.file_url.clone()} target="_blank" rel="noopener noreferrer">
                                {"Download"}
                            </a>
                            <div>{status}</div>
                        </li>
                    }
                }) }
            </ul>
        }
    };

    let title_picker = |list: &Vec<String>| {
        if list.is_empty() {
            return html! { <EmptyState title="No assignments yet" /> };
        }
        html! {
            <label class="stack">
                <span>{"Assignment"}</span>
                <select onchange={on_title}>
                    <option value="" selected={title.is_empty()}>{"Select an assignment"}</option>
                    { for list.iter().map(|entry| html! {
                        <option value={entry.clone()} selected={*entry == *title}>{entry.clone()}</option>
                    }) }
                </select>
            </label>
        }
    };

    let batch_section = if batch_id.is_some() {
        html! {
            <>
                <div class="card">
                    <h3>{"Attendance"}</h3>
                    {render_resource(&summary.snapshot(), summary_card)}
                </div>
                <div class="card">
                    <h3>{"Assignments"}</h3>
                    {render_resource(&titles.snapshot(), title_picker)}
                    {render_resource(&assignments.snapshot(), assignment_list)}
                </div>
            </>
        }
    } else if profile.snapshot().data().is_some() {
        html! {
            <EmptyState
                title="Not assigned to a batch yet"
                description="Attendance and assignments appear once a trainer adds you to a batch." />
        }
    } else {
        html! {}
    };

    html! {
        <section class="stack">
            {render_resource(&profile.snapshot(), profile_card)}
            {batch_section}
            <ComplaintForm session={props.session.clone()} />
        </section>
    }
}
