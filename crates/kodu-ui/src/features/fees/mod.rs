//! Fee portal pages.

use kodu_api_models::StudentProfile;
use kodu_core::FormError;
use kodu_core::fees::MISSING_FEE_INPUT;
use yew::prelude::*;

use crate::components::inputs::event_value;
use crate::components::status::EmptyState;

mod set_fee;
mod student_list;
mod submit;

pub(crate) use set_fee::SetFeesForNewStudent;
pub(crate) use student_list::ViewStudentList;
pub(crate) use submit::SubmitStudentFees;

/// Student and amount inputs shared by the fee forms.
fn fee_inputs(
    students: &[StudentProfile],
    selected: &str,
    amount: &str,
    on_student: Callback<String>,
    on_amount: Callback<String>,
) -> Html {
    let onchange = Callback::from(move |event: Event| on_student.emit(event_value(&event)));
    let oninput = Callback::from(move |event: InputEvent| on_amount.emit(event_value(&event)));
    html! {
        <>
            <label class="stack">
                <span>{"Student"}</span>
                <select {onchange}>
                    <option value="" selected={selected.is_empty()}>{"Select a student"}</option>
                    { for students.iter().map(|student| html! {
                        <option value={student.id.clone()} selected={student.id == selected}>
                            {format!("{} ({})", student.name, student.email)}
                        </option>
                    }) }
                </select>
            </label>
            <label class="stack">
                <span>{"Amount (₹)"}</span>
                <input type="number" min="1" value={amount.to_string()} {oninput} />
            </label>
        </>
    }
}

/// Alert text for a rejected fee form.
fn form_problem(err: &FormError) -> String {
    match err {
        FormError::Required { .. } => MISSING_FEE_INPUT.to_string(),
        other => other.to_string(),
    }
}

/// Payments collected today are not exposed by the backend yet.
#[function_component(ViewTodayFees)]
pub(crate) fn view_today_fees() -> Html {
    html! {
        <section>
            <h2>{"Today's Fees"}</h2>
            <EmptyState
                title="No report available"
                description="Collected payments appear in the gateway dashboard." />
        </section>
    }
}
