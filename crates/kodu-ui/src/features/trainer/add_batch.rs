use gloo::console;
use gloo::dialogs::alert;
use kodu_api_models::{ApiMessage, Course, StudentProfile};
use kodu_core::batch_form::BatchDraft;
use kodu_core::endpoints;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::inputs::event_value;
use crate::components::status::render_resource;
use crate::features::PageProps;
use crate::format::failure_text;
use crate::hooks::{use_api, use_listing};

/// Input bound to one scalar field of the draft, by wire name.
fn draft_input(
    label: &'static str,
    kind: &'static str,
    name: &'static str,
    draft: &UseStateHandle<BatchDraft>,
    value: &str,
) -> Html {
    let draft = draft.clone();
    let oninput = Callback::from(move |event: InputEvent| {
        let mut next = (*draft).clone();
        match next.set_field(name, &event_value(&event)) {
            Ok(()) => draft.set(next),
            Err(err) => console::warn!("batch edit ignored", err.to_string()),
        }
    });
    html! {
        <label class="stack">
            <span>{label}</span>
            <input type={kind} value={value.to_string()} {oninput} />
        </label>
    }
}

#[function_component(AddBatch)]
pub(crate) fn add_batch(props: &PageProps) -> Html {
    let api = use_api();
    let courses =
        use_listing::<Course>(endpoints::COURSES, props.session.clone(), "Error fetching courses");
    let students = use_listing::<StudentProfile>(
        endpoints::ALL_STUDENTS,
        props.session.clone(),
        "Error fetching students",
    );
    let draft = use_state(BatchDraft::new);

    let on_course = {
        let draft = draft.clone();
        Callback::from(move |event: Event| {
            let mut next = (*draft).clone();
            if next.set_field("courseId", &event_value(&event)).is_ok() {
                draft.set(next);
            }
        })
    };

    let toggle = {
        let draft = draft.clone();
        Callback::from(move |student_id: String| {
            let mut next = (*draft).clone();
            next.toggle_student(&student_id);
            draft.set(next);
        })
    };

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
                    .post_json::<_, Option<ApiMessage>>(endpoints::CREATE_BATCH, Some(&session), &request)
                    .await
                {
                    Ok(reply) => {
                        alert(&reply.unwrap_or_default().message_or("Batch created successfully"));
                        let mut next = (*draft).clone();
                        next.clear();
                        draft.set(next);
                    }
                    Err(failure) => alert(&failure_text(&failure, "Error creating batch")),
                }
            });
        })
    };

    let course_picker = render_resource(&courses.snapshot(), |courses: &Vec<Course>| {
        html! {
            <label class="stack">
                <span>{"Course"}</span>
                <select onchange={on_course}>
                    <option value="" selected={draft.course_id.is_empty()}>{"Select a course"}</option>
                    { for courses.iter().map(|course| html! {
                        <option value={course.id.clone()} selected={course.id == draft.course_id}>
                            {course.course_name.clone()}
                        </option>
                    }) }
                </select>
            </label>
        }
    });

    let student_checks = render_resource(&students.snapshot(), |students: &Vec<StudentProfile>| {
        html! {
            <fieldset class="checklist">
                <legend>{"Students"}</legend>
                { for students.iter().map(|student| {
                    let onchange = {
                        let toggle = toggle.clone();
                        let id = student.id.clone();
                        Callback::from(move |_: Event| toggle.emit(id.clone()))
                    };
                    html! {
                        <label key={student.id.clone()}>
                            <input type="checkbox" checked={draft.is_selected(&student.id)} {onchange} />
                            {format!("{} ({})", student.name, student.email)}
                        </label>
                    }
                }) }
            </fieldset>
        }
    });

    html! {
        <section class="card">
            <h2>{"Add Batch"}</h2>
            <form {onsubmit}>
                {course_picker}
                {draft_input("Batch Name", "text", "batchName", &draft, &draft.batch_name)}
                {draft_input("Start Date", "date", "startDate", &draft, &draft.start_date)}
                {draft_input("End Date", "date", "endDate", &draft, &draft.end_date)}
                {draft_input("Start Time", "time", "startTime", &draft, &draft.start_time)}
                {draft_input("End Time", "time", "endTime", &draft, &draft.end_time)}
                {student_checks}
                <button class="solid" type="submit">{"Create Batch"}</button>
            </form>
        </section>
    }
}
