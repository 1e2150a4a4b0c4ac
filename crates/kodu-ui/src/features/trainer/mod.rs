//! Trainer pages: course and batch setup, attendance, assignments and the
//! per-student summary.

use kodu_api_models::Batch;
use yew::prelude::*;

use crate::components::inputs::event_value;
use crate::format::batch_label;

mod add_batch;
mod add_course;
mod assignments;
mod attendance;
mod summary;
mod upload;

pub(crate) use add_batch::AddBatch;
pub(crate) use add_course::AddCourse;
pub(crate) use assignments::ViewAssignments;
pub(crate) use attendance::ManageAttendance;
pub(crate) use summary::{StudentSummary, summary_card};
pub(crate) use upload::UploadAssignment;

/// Batch select emitting the chosen id.
fn batch_picker(batches: &[Batch], selected: &str, on_pick: Callback<String>) -> Html {
    let onchange = Callback::from(move |event: Event| on_pick.emit(event_value(&event)));
    html! {
        <label class="stack">
            <span>{"Batch"}</span>
            <select {onchange}>
                <option value="" selected={selected.is_empty()}>{"Select a batch"}</option>
                { for batches.iter().map(|batch| html! {
                    <option value={batch.id.clone()} selected={batch.id == selected}>
                        {batch_label(batch)}
                    </option>
                }) }
            </select>
        </label>
    }
}
