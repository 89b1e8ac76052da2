use super::super::Model;
use gloo_file::File as GlooFile;
use shared::{Phase, Sound};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{HtmlAudioElement, HtmlInputElement};
use yew::prelude::*;

/// First file of a file input, if any. No type filtering.
pub fn first_file(input: &HtmlInputElement) -> Option<GlooFile> {
    input
        .files()
        .and_then(|files| files.item(0))
        .map(GlooFile::from)
}

pub fn play_sound(sound: Sound) {
    let audio = match HtmlAudioElement::new_with_src(sound.asset_path()) {
        Ok(audio) => audio,
        Err(e) => {
            log::warn!("Could not create audio for {}: {:?}", sound.asset_path(), e);
            return;
        }
    };

    match audio.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("Playback blocked: {:?}", e);
            }
        }),
        Err(e) => log::warn!("Playback failed: {:?}", e),
    }
}

pub fn render_loading_overlay(model: &Model) -> Html {
    if model.detector.state().phase() != Phase::Loading {
        return html! {};
    }

    html! {
        <div class="centered-overlay">
            <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
        </div>
    }
}
