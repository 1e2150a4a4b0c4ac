use gloo::console;
use gloo::dialogs::alert;
use kodu_api_models::ApiMessage;
use kodu_core::FormResult;
use kodu_core::course_builder::CourseDraft;
use kodu_core::endpoints;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::inputs::event_value;
use crate::features::PageProps;
use crate::format::failure_text;
use crate::hooks::use_api;

/// Apply `change` to a copy of the draft and publish it. Positional edits
/// that miss are logged and leave the draft untouched.
fn edit(draft: &UseStateHandle<CourseDraft>, change: impl FnOnce(&mut CourseDraft) -> FormResult<()>) {
    let mut next = (**draft).clone();
    match change(&mut next) {
        Ok(()) => draft.set(next),
        Err(err) => console::warn!("course edit ignored", err.to_string()),
    }
}

/// Input of `kind` writing its value through `apply`.
fn field(
    label: &'static str,
    kind: &'static str,
    value: &str,
    draft: &UseStateHandle<CourseDraft>,
    apply: impl Fn(&mut CourseDraft, &str) -> FormResult<()> + 'static,
) -> Html {
    let draft = draft.clone();
    let oninput = Callback::from(move |event: InputEvent| {
        let value = event_value(&event);
        edit(&draft, |next| apply(next, &value));
    });
    html! {
        <label class="stack">
            <span>{label}</span>
            <input type={kind} value={value.to_string()} {oninput} />
        </label>
    }
}

fn button(
    label: &'static str,
    class: &'static str,
    draft: &UseStateHandle<CourseDraft>,
    apply: impl Fn(&mut CourseDraft) -> FormResult<()> + 'static,
) -> Html {
    let draft = draft.clone();
    let onclick = Callback::from(move |_: MouseEvent| edit(&draft, &apply));
    html! { <button type="button" class={class} {onclick}>{label}</button> }
}

#[function_component(AddCourse)]
pub(crate) fn add_course(props: &PageProps) -> Html {
    let api = use_api();
    let draft = use_state(CourseDraft::new);

    let onsubmit = {
        let draft = draft.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if let Err(err) = draft.validate() {
                alert(&format!("Please complete the form: {err}"));
                return;
            }
            let request = draft.to_request();
            let draft = draft.clone();
            let client = client.clone();
            let session = session.clone();
            spawn_local(async move {
                match client
                    .post_json::<_, Option<ApiMessage>>(endpoints::ADD_COURSE, Some(&session), &request)
                    .await
                {
                    Ok(reply) => {
                        alert(&reply.unwrap_or_default().message_or("Course added successfully"));
                        draft.set(CourseDraft::new());
                    }
                    Err(failure) => alert(&failure_text(&failure, "Error adding course")),
                }
            });
        })
    };

    let subjects = draft.subjects.iter().enumerate().map(|(s, subject)| {
        let timings = subject.batch_timings.iter().enumerate().map(|(b, timing)| {
            html! {
                <div class="row" key={format!("timing-{s}-{b}")}>
                    {field("Batch Name", "text", &timing.batch_name, &draft,
                        move |next, value| next.set_batch_timing_field(s, b, "batchName", value))}
                    {field("Start Time", "time", &timing.start_time, &draft,
                        move |next, value| next.set_batch_timing_field(s, b, "startTime", value))}
                    {field("End Time", "time", &timing.end_time, &draft,
                        move |next, value| next.set_batch_timing_field(s, b, "endTime", value))}
                    {button("Remove Timing", "ghost", &draft,
                        move |next| next.remove_batch_timing(s, b))}
                </div>
            }
        });
        html! {
            <fieldset class="card" key={format!("subject-{s}")}>
                <legend>{format!("Subject {}", s + 1)}</legend>
                {field("Subject Name", "text", &subject.subject_name, &draft,
                    move |next, value| next.set_subject_field(s, "subjectName", value))}
                { for timings }
                <div class="actions">
                    {button("Add Batch Timing", "ghost", &draft, move |next| next.add_batch_timing(s))}
                    {button("Remove Subject", "danger", &draft, move |next| next.remove_subject(s))}
                </div>
            </fieldset>
        }
    });

    let topics = draft.topics.iter().enumerate().map(|(t, topic)| {
        html! {
            <div class="row" key={format!("topic-{t}")}>
                {field("Topic Name", "text", &topic.topic_name, &draft,
                    move |next, value| next.set_topic_field(t, "topicName", value))}
                {field("Description", "text", &topic.description, &draft,
                    move |next, value| next.set_topic_field(t, "description", value))}
                {button("Remove Topic", "danger", &draft, move |next| next.remove_topic(t))}
            </div>
        }
    });

    html! {
        <section class="card">
            <h2>{"Add Course"}</h2>
            <form {onsubmit}>
                {field("Course Name", "text", &draft.course_name, &draft, |next, value| {
                    value.clone_into(&mut next.course_name);
                    Ok(())
                })}
                {field("Description", "text", &draft.description, &draft, |next, value| {
                    value.clone_into(&mut next.description);
                    Ok(())
                })}
                <h3>{"Subjects"}</h3>
                { for subjects }
                {button("Add Subject", "ghost", &draft, |next| {
                    next.add_subject();
                    Ok(())
                })}
                <h3>{"Topics"}</h3>
                { for topics }
                {button("Add Topic", "ghost", &draft, |next| {
                    next.add_topic();
                    Ok(())
                })}
                <button class="solid" type="submit">{"Add Course"}</button>
            </form>
        </section>
    }
}
