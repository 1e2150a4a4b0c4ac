//! Attendance summary of one student within a batch.

use kodu_api_models::{AttendanceSummary, Batch, StudentProfile};
use kodu_core::attendance::{ChartSlices, SummaryStats};
use kodu_core::endpoints;
use yew::prelude::*;

use super::batch_picker;
use crate::components::inputs::event_value;
use crate::components::status::{EmptyState, render_resource};
use crate::features::PageProps;
use crate::format::{band_class, percent_label};
use crate::hooks::{use_api, use_listing, use_resource};

/// Stacked bar of present, absent and late days.
fn attendance_chart(slices: ChartSlices) -> Html {
    let total = slices.present + slices.absent + slices.late;
    if total == 0 {
        return html! { <p class="muted">{"No attendance recorded yet."}</p> };
    }
    let segment = |days: u32, class: &'static str, label: &'static str| {
        let width = f64::from(days) / f64::from(total) * 100.0;
        html! {
            <span class={classes!("segment", class)} style={format!("width: {width:.1}%")}
                title={format!("{label}: {days}")} />
        }
    };
    html! {
        <div class="chart">
            <div class="bar">
                {segment(slices.present, "present", "Present")}
                {segment(slices.absent, "absent", "Absent")}
                {segment(slices.late, "late", "Late")}
            </div>
            <ul class="legend">
                <li>{format!("Present: {}", slices.present)}</li>
                <li>{format!("Absent: {}", slices.absent)}</li>
                <li>{format!("Late: {}", slices.late)}</li>
            </ul>
        </div>
    }
}

/// Percentage line and chart for a loaded summary.
pub(crate) fn summary_card(summary: &AttendanceSummary) -> Html {
    html! {
        <div class="card">
            <p>
                {format!("Total days: {} | ", summary.total_days)}
                <span class={band_class(summary.band())}>
                    {format!("Attendance: {}", percent_label(summary.percentage()))}
                </span>
            </p>
            {attendance_chart(summary.chart_slices())}
        </div>
    }
}

#[function_component(StudentSummary)]
pub(crate) fn student_summary(props: &PageProps) -> Html {
    let api = use_api();
    let batches =
        use_listing::<Batch>(endpoints::ALL_BATCHES, props.session.clone(), "Error fetching batches");
    let batch = use_state(String::new);
    let student = use_state(String::new);
    let roster = use_resource::<Vec<StudentProfile>>();
    let summary = use_resource::<AttendanceSummary>();

    let on_batch = {
        let batch = batch.clone();
        let student = student.clone();
        let roster = roster.clone();
        let summary = summary.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |batch_id: String| {
            batch.set(batch_id.clone());
            student.set(String::new());
            roster.reset();
            summary.reset();
            if batch_id.is_empty() {
                return;
            }
            let client = client.clone();
            let session = session.clone();
            roster.load(
                async move {
                    client
                        .get_list::<StudentProfile>(&endpoints::batch_students(&batch_id), Some(&session))
                        .await
                },
                "Error fetching students",
            );
        })
    };

    let on_student = {
        let batch = batch.clone();
        let student = student.clone();
        let summary = summary.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |event: Event| {
            let student_id = event_value(&event);
            student.set(student_id.clone());
            summary.reset();
            if student_id.is_empty() {
                return;
            }
            let path = endpoints::attendance_summary(&student_id, &batch);
            let client = client.clone();
            let session = session.clone();
            summary.load(
                async move { client.get::<AttendanceSummary>(&path, Some(&session)).await },
                "Error fetching attendance summary",
            );
        })
    };

    let picker = render_resource(&batches.snapshot(), |batches: &Vec<Batch>| {
        batch_picker(batches, &batch, on_batch)
    });

    let students = render_resource(&roster.snapshot(), |students: &Vec<StudentProfile>| {
        if students.is_empty() {
            return html! { <EmptyState title="No students in this batch" /> };
        }
        html! {
            <label class="stack">
                <span>{"Student"}</span>
                <select onchange={on_student}>
                    <option value="" selected={student.is_empty()}>{"Select a student"}</option>
                    { for students.iter().map(|profile| html! {
                        <option value={profile.id.clone()} selected={profile.id == *student}>
                            {profile.name.clone()}
                        </option>
                    }) }
                </select>
            </label>
        }
    });

    html! {
        <section>
            <h2>{"Student Summary"}</h2>
            {picker}
            {students}
            {render_resource(&summary.snapshot(), summary_card)}
        </section>
    }
}
