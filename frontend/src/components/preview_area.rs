use super::super::{Model, Msg};
use super::results::render_overlay;
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(selected) = model.detector.state().selected() else {
        return html! {};
    };

    html! {
        <div id="preview-container" class="container">
            <img
                id="actual-image-preview"
                src={selected.preview_url.to_string()}
                alt="Preview"
                class="my-4-selected object-contain"
                style="max-width: 450px; padding-bottom: 10px;"
            />
            <br />
            <button
                class="bubbly-button"
                onclick={ctx.link().callback(|_| Msg::RunDetection)}
            >
                {"Hot Dog or Not Hot Dog??"}
            </button>
            { render_overlay(model) }
        </div>
    }
}
