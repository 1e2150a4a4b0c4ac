//! Fee collection through the payment gateway.
//!
//! The backend raises an order, the checkout overlay takes the payment, and
//! the backend verifies the receipt. Only that verification decides the
//! status shown here.

use gloo::console;
use gloo::dialogs::alert;
use kodu_api_models::{ApiMessage, PaymentOrder, StudentProfile};
use kodu_core::endpoints;
use kodu_core::fees::{CheckoutOptions, FeeForm, GatewayReceipt, PaymentFlow};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::{fee_inputs, form_problem};
use crate::components::status::render_resource;
use crate::config;
use crate::features::PageProps;
use crate::format::{failure_text, rupees};
use crate::hooks::{use_api, use_listing};
use crate::services::razorpay::open_checkout;

fn advance(flow: &UseStateHandle<PaymentFlow>, change: impl FnOnce(&mut PaymentFlow)) {
    let mut next = (**flow).clone();
    change(&mut next);
    flow.set(next);
}

#[function_component(SubmitStudentFees)]
pub(crate) fn submit_student_fees(props: &PageProps) -> Html {
    let api = use_api();
    let students = use_listing::<StudentProfile>(
        endpoints::ALL_STUDENTS,
        props.session.clone(),
        "Error fetching students",
    );
    let form = use_state(FeeForm::default);
    let flow = use_state(PaymentFlow::default);

    let on_student = {
        let form = form.clone();
        Callback::from(move |student_id: String| {
            form.set(FeeForm::new(student_id, form.amount.clone()));
        })
    };
    let on_amount = {
        let form = form.clone();
        Callback::from(move |amount: String| {
            form.set(FeeForm::new(form.student_id.clone(), amount));
        })
    };

    let on_paid = {
        let form = form.clone();
        let flow = flow.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |receipt: GatewayReceipt| {
            let request = match form.verify_request(&receipt) {
                Ok(request) => request,
                Err(err) => {
                    advance(&flow, |flow| flow.verification_failed(err.to_string()));
                    return;
                }
            };
            let flow = flow.clone();
            let client = client.clone();
            let session = session.clone();
            spawn_local(async move {
                match client
                    .post_json::<_, Option<ApiMessage>>(
                        endpoints::PAYMENT_SUCCESS,
                        Some(&session),
                        &request,
                    )
                    .await
                {
                    Ok(_) => {
                        console::log!("payment verified", request.order_id.clone());
                        advance(&flow, PaymentFlow::verified);
                    }
                    Err(failure) => {
                        console::warn!("payment verification failed", failure.to_string());
                        let message = failure_text(&failure, "Payment verification failed");
                        advance(&flow, |flow| flow.verification_failed(message));
                    }
                }
            });
        })
    };

    let onsubmit = {
        let form = form.clone();
        let flow = flow.clone();
        let client = api.client.clone();
        let session = props.session.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let request = match form.order_request() {
                Ok(request) => request,
                Err(err) => {
                    alert(&form_problem(&err));
                    return;
                }
            };
            let flow = flow.clone();
            let client = client.clone();
            let session = session.clone();
            let on_paid = on_paid.clone();
            spawn_local(async move {
                let order = match client
                    .post_json::<_, PaymentOrder>(
                        endpoints::CREATE_PAYMENT_ORDER,
                        Some(&session),
                        &request,
                    )
                    .await
                {
                    Ok(order) => order,
                    Err(failure) => {
                        alert(&failure_text(&failure, "Error creating payment order"));
                        return;
                    }
                };
                let options = CheckoutOptions::for_order(&config::razorpay_key(), &order);
                advance(&flow, |flow| flow.order_created(order));
                alert("Order created successfully! Please proceed with the payment.");
                if let Err(err) = open_checkout(&options, on_paid) {
                    console::error!("checkout overlay failed", err.clone());
                    alert(&format!("Unable to open the payment window: {err}"));
                }
            });
        })
    };

    let status = match (flow.status_label(), &*flow) {
        (Some(label), PaymentFlow::VerificationFailed(reason)) => html! {
            <p class="status error-text">{format!("{label}: {reason}")}</p>
        },
        (Some(label), _) => html! { <p class="status text-green">{label}</p> },
        (None, _) => flow
            .order()
            .map(|order| html! {
                <div class="status">
                    <p class="muted">{format!("Awaiting payment of {}", rupees(order.amount))}</p>
                    if let Some(link) = flow.payment_link() {
                        <p>
                            <a href={link.to_string()} target="_blank" rel="noopener noreferrer">
                                {"Open payment link"}
                            </a>
                        </p>
                    }
                    if let Some(qr) = flow.qr_code() {
                        <img class="qr-code" src={qr.to_string()} alt="Payment QR code" />
                    }
                </div>
            })
            .unwrap_or_default(),
    };

    let view = |students: &Vec<StudentProfile>| {
        html! {
            <form {onsubmit}>
                {fee_inputs(students, &form.student_id, &form.amount, on_student, on_amount)}
                <button class="solid" type="submit">{"Pay Fee"}</button>
            </form>
        }
    };

    html! {
        <section class="card narrow">
            <h2>{"Submit Student Fees"}</h2>
            {render_resource(&students.snapshot(), view)}
            {status}
        </section>
    }
}
