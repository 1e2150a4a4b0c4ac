use kodu_api_models::{ApprovalStatus, StudentProfile};
use kodu_core::endpoints;
use yew::prelude::*;

use crate::components::status::{EmptyState, render_resource};
use crate::features::PageProps;
use crate::format::NOT_AVAILABLE;
use crate::hooks::use_listing;

const fn approval_label(status: Option<ApprovalStatus>) -> &'static str {
    match status {
        Some(ApprovalStatus::Approved) => "Approved",
        Some(ApprovalStatus::Pending) => "Pending",
        Some(ApprovalStatus::Rejected) => "Rejected",
        None => NOT_AVAILABLE,
    }
}

fn or_na(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

#[function_component(ViewStudentList)]
pub(crate) fn view_student_list(props: &PageProps) -> Html {
    let students = use_listing::<StudentProfile>(
        endpoints::ALL_STUDENTS,
        props.session.clone(),
        "Error fetching students",
    );

    let view = |students: &Vec<StudentProfile>| {
        if students.is_empty() {
            return html! { <EmptyState title="No students found" /> };
        }
        html! {
            <table class="table">
                <thead>
                    <tr>
                        <th>{"Name"}</th><th>{"Email"}</th><th>{"Phone"}</th>
                        <th>{"Education"}</th><th>{"Status"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for students.iter().map(|student| html! {
                        <tr key={student.id.clone()}>
                            <td>{student.name.clone()}</td>
                            <td>{student.email.clone()}</td>
                            <td>{or_na(&student.phone_number)}</td>
                            <td>{or_na(&student.education)}</td>
                            <td>{approval_label(student.status)}</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        }
    };

    html! {
        <section>
            <h2>{"Student List"}</h2>
            {render_resource(&students.snapshot(), view)}
        </section>
    }
}
