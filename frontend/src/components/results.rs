use super::super::Model;
use shared::Verdict;
use yew::prelude::*;

pub fn render_overlay(model: &Model) -> Html {
    let overlay = model
        .detector
        .state()
        .verdict()
        .and_then(|verdict| Verdict::classify(verdict).overlay());

    html! {
        <div class="overlay">
            {
                match overlay {
                    Some(overlay) => html! {
                        <>
                            <img src={overlay.icon} alt={overlay.alt} />
                            <div class={overlay.class}>{ overlay.caption }</div>
                        </>
                    },
                    None => html! {},
                }
            }
        </div>
    }
}
