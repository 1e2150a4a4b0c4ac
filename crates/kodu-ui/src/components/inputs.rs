//! Event helpers for form controls.

use web_sys::{File, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Current value of the input, select or textarea that fired `event`.
pub(crate) fn event_value<E: TargetCast>(event: &E) -> String {
    if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
        return select.value();
    }
    event
        .target_dyn_into::<HtmlTextAreaElement>()
        .map(|area| area.value())
        .unwrap_or_default()
}

/// First file picked in a file input.
pub(crate) fn event_file<E: TargetCast>(event: &E) -> Option<File> {
    event
        .target_dyn_into::<HtmlInputElement>()
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

/// Selected option values of a multi-select.
pub(crate) fn selected_values<E: TargetCast>(event: &E) -> Vec<String> {
    let Some(select) = event.target_dyn_into::<HtmlSelectElement>() else {
        return Vec::new();
    };
    let options = select.selected_options();
    (0..options.length())
        .filter_map(|index| options.item(index))
        .filter_map(|option| option.get_attribute("value"))
        .collect()
}

/// Text field bound to `on_value`.
pub(crate) fn text_field(
    label: &str,
    kind: &'static str,
    value: &str,
    on_value: Callback<String>,
) -> Html {
    let oninput = Callback::from(move |event: InputEvent| on_value.emit(event_value(&event)));
    html! {
        <label class="stack">
            <span>{label.to_string()}</span>
            <input type={kind} value={value.to_string()} {oninput} required=true />
        </label>
    }
}

/// Callback storing its argument in `state`.
pub(crate) fn setter<T: 'static>(state: &UseStateHandle<T>) -> Callback<T> {
    let state = state.clone();
    Callback::from(move |value: T| state.set(value))
}
