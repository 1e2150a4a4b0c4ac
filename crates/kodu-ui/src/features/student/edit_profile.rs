use gloo::console;
use gloo::dialogs::alert;
use kodu_api_models::{ApiMessage, Course, StudentProfile};
use kodu_core::endpoints;
use kodu_core::profile::{NO_CHANGES, ProfileForm};
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::AppRoute;
use crate::components::inputs::{event_value, selected_values};
use crate::components::status::render_resource;
use crate::features::PageProps;
use crate::format::failure_text;
use crate::hooks::{use_api, use_listing, use_resource};

fn profile_input(
    label: &'static str,
    name: &'static str,
    value: &str,
    form: &UseStateHandle<ProfileForm>,
) -> Html {
    let form = form.clone();
    let oninput = Callback::from(move |event: InputEvent| {
        let mut next = (*form).clone();
        match next.set_field(name, &event_value(&event)) {
            Ok(()) => form.set(next),
            Err(err) => console::warn!("profile edit ignored", err.to_string()),
        }
    });
    html! {
        <label class="stack">
            <span>{label}</span>
            <input type="text" value={value.to_string()} {oninput} />
        </label>
    }
}

#[function_component(EditProfile)]
pub(crate) fn edit_profile(props: &PageProps) -> Html {
    let api = use_api();
    let navigator = use_navigator();
    let profile = use_resource::<StudentProfile>();
    let courses =
        use_listing::<Course>(endpoints::COURSES, props.session.clone(), "Error fetching courses");
    let form = use_state(ProfileForm::default);

    {
        let profile = profile.clone();
        let form = form.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        use_effect_with_deps(
            move |_| {
                profile.load(
                    async move {
                        let loaded = client.student_profile(session.user_id(), &session).await;
                        if let Ok(current) = &loaded {
                            form.set(ProfileForm::from(current));
                        }
                        loaded
                    },
                    "Error fetching profile",
                );
                || ()
            },
            (),
        );
    }

    let on_courses = {
        let form = form.clone();
        Callback::from(move |event: Event| {
            let mut next = (*form).clone();
            next.set_courses(selected_values(&event));
            form.set(next);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Ok(request) = form.to_request() else {
                alert(NO_CHANGES);
                return;
            };
            let client = client.clone();
            let session = session.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match client
                    .put_json::<_, Option<ApiMessage>>(endpoints::UPDATE_PROFILE, Some(&session), &request)
                    .await
                {
                    Ok(reply) => {
                        alert(&reply.unwrap_or_default().message_or("Profile updated successfully"));
                        if let Some(navigator) = navigator {
                            navigator.push(&AppRoute::StudentDashboard);
                        }
                    }
                    Err(failure) => alert(&failure_text(&failure, "Error updating profile")),
                }
            });
        })
    };

    let course_picker = render_resource(&courses.snapshot(), |courses: &Vec<Course>| {
        html! {
            <label class="stack">
                <span>{"Enrolled Courses"}</span>
                <select multiple=true onchange={on_courses}>
                    { for courses.iter().map(|course| html! {
                        <option
                            value={course.id.clone()}
                            selected={form.enrolled_courses.contains(&course.id)}>
                            {course.course_name.clone()}
                        </option>
                    }) }
                </select>
            </label>
        }
    });

    let fields = render_resource(&profile.snapshot(), |_: &StudentProfile| {
        html! {
            <>
                {profile_input("Phone Number", "phoneNumber", &form.phone_number, &form)}
                {profile_input("WhatsApp Number", "whatsappNumber", &form.whatsapp_number, &form)}
                {profile_input("Parent Phone Number", "parentPhoneNumber", &form.parent_phone_number, &form)}
                {profile_input("Education", "education", &form.education, &form)}
            </>
        }
    });

    html! {
        <section class="card narrow">
            <h2>{"Edit Profile"}</h2>
            <form {onsubmit}>
                {fields}
                {course_picker}
                <button class="solid" type="submit">{"Save"}</button>
            </form>
        </section>
    }
}
