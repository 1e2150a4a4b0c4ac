use kodu_core::routes::MenuItem;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::AppRoute;

#[derive(Properties, PartialEq)]
pub(crate) struct MenuGridProps {
    pub(crate) items: &'static [MenuItem],
}

/// Dashboard cards, one per menu entry.
#[function_component(MenuGrid)]
pub(crate) fn menu_grid(props: &MenuGridProps) -> Html {
    html! {
        <div class="menu-grid">
            { for props.items.iter().map(|item| html! {
                <Link<AppRoute> classes="menu-card" to={AppRoute::from_core(item.route)}>
                    <h3>{item.route.title()}</h3>
                    <p class="muted">{item.blurb}</p>
                </Link<AppRoute>>
            }) }
        </div>
    }
}
