//! Binding to the gateway's checkout overlay (`window.Razorpay`, loaded by
//! `index.html`).

use gloo::console;
use js_sys::{JSON, Reflect};
use kodu_core::fees::{CheckoutOptions, GatewayReceipt};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use yew::Callback;

#[wasm_bindgen]
extern "C" {
    type Razorpay;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &JsValue) -> Result<Razorpay, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn open(this: &Razorpay) -> Result<(), JsValue>;
}

/// Open the overlay for an order. `on_paid` receives the identifiers the
/// gateway reports once the customer completes the payment.
pub(crate) fn open_checkout(
    options: &CheckoutOptions,
    on_paid: Callback<GatewayReceipt>,
) -> Result<(), String> {
    let encoded = serde_json::to_string(options).map_err(|err| err.to_string())?;
    let js_options = JSON::parse(&encoded).map_err(describe)?;

    let handler = Closure::once_into_js(move |response: JsValue| {
        match decode_receipt(&response) {
            Ok(receipt) => on_paid.emit(receipt),
            Err(err) => console::error!("unreadable gateway response", err),
        }
    });
    Reflect::set(&js_options, &JsValue::from_str("handler"), &handler).map_err(describe)?;

    let checkout = Razorpay::new(&js_options).map_err(describe)?;
    checkout.open().map_err(describe)
}

fn decode_receipt(response: &JsValue) -> Result<GatewayReceipt, String> {
    let text: String = JSON::stringify(response).map_err(describe)?.into();
    serde_json::from_str(&text).map_err(|err| err.to_string())
}

fn describe(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| JSON::stringify(&value).ok().map(String::from))
        .unwrap_or_else(|| "payment overlay unavailable".to_string())
}
