use super::super::{Model, Msg, SelectedImage};
use super::utils::play_sound;
use crate::api::{DetectClientError, fetch_gallery_image, request_detection};
use gloo_file::File as GlooFile;
use shared::{DetectionTicket, GalleryImage};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub fn handle_select_from_gallery(ctx: &Context<Model>, image: GalleryImage) -> bool {
    let link = ctx.link().clone();
    spawn_local(async move {
        match fetch_gallery_image(image).await {
            Ok(file) => link.send_message(Msg::GalleryImageLoaded(image, file)),
            Err(e) => gloo_console::error!(format!("Failed to load {}: {}", image.path(), e)),
        }
    });
    false
}

pub fn handle_gallery_image_loaded(model: &mut Model, image: GalleryImage, file: GlooFile) -> bool {
    model
        .detector
        .select_from_gallery(image, SelectedImage::new(file));
    true
}

pub fn handle_select_from_device(model: &mut Model, file: GlooFile) -> bool {
    log::info!("Selected {} ({} bytes)", file.name(), file.size());
    model.detector.select_from_device(SelectedImage::new(file));
    true
}

pub fn handle_run_detection(model: &mut Model, ctx: &Context<Model>) -> bool {
    let Some(ticket) = model.detector.begin_detection() else {
        return false;
    };
    let Some(file) = model.detector.state().selected().map(|img| img.file.clone()) else {
        return false;
    };

    log::info!("Starting {} for {}", ticket, file.name());
    let link = ctx.link().clone();
    spawn_local(async move {
        let outcome = request_detection(&file).await;
        link.send_message(Msg::DetectionFinished(ticket, outcome));
    });

    true
}

pub fn handle_detection_finished(
    model: &mut Model,
    ticket: DetectionTicket,
    outcome: Result<String, DetectClientError>,
) -> bool {
    match model.detector.finish_detection(ticket, outcome) {
        Ok(Some(feedback)) => {
            if let Some(sound) = feedback.sound {
                play_sound(sound);
            }
        }
        Ok(None) => log::debug!("{} finished without a new verdict", ticket),
        Err(e) => gloo_console::error!(format!("{} failed: {}", ticket, e)),
    }
    true
}
