use super::super::{Model, Msg};
use super::utils::first_file;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub fn render_upload_section(ctx: &Context<Model>) -> Html {
    let handle_change = ctx.link().batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        first_file(&input).map(Msg::SelectFromDevice)
    });

    html! {
        <section class="upload-section">
            <h1>{"Or try your own!"}</h1>
            <input type="file" id="file-input" class="mb-4" onchange={handle_change} />
        </section>
    }
}
