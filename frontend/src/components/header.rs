use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1>{"Hot Dog or Not Hot Dog"}</h1>
        </header>
    }
}
