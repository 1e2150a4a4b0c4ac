//! Loading, error and empty branches shared by the pages.

use kodu_core::{Phase, Resource};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct EmptyStateProps {
    pub(crate) title: AttrValue,
    #[prop_or_default]
    pub(crate) description: Option<AttrValue>,
}

#[function_component(EmptyState)]
pub(crate) fn empty_state(props: &EmptyStateProps) -> Html {
    html! {
        <div class="empty-state">
            <h4>{props.title.clone()}</h4>
            {props.description.clone().map(|text| html! {
                <p class="muted">{text}</p>
            }).unwrap_or_default()}
        </div>
    }
}

/// Render `resource` through `view` once loaded. A failed refresh keeps the
/// earlier data on screen under the error line.
pub(crate) fn render_resource<T>(resource: &Resource<T>, view: impl FnOnce(&T) -> Html) -> Html {
    match resource.phase() {
        Phase::Idle => html! {},
        Phase::Loading => html! { <p class="muted">{"Loading..."}</p> },
        Phase::Failed => html! {
            <>
                <p class="error-text" role="alert">{resource.error().unwrap_or_default()}</p>
                {resource.data().map(view).unwrap_or_default()}
            </>
        },
        Phase::Ready => resource.data().map(view).unwrap_or_default(),
    }
}
