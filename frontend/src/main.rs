mod analytics;
mod api;
mod components;

use analytics::GtagReporter;
use api::DetectClientError;
use components::gallery::render_gallery;
use components::handlers;
use components::header::render_header;
use components::preview_area::render_preview_area;
use components::upload_section::render_upload_section;
use components::utils::render_loading_overlay;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{DetectionTicket, Detector, GalleryImage};
use yew::prelude::*;

/// The picked image and the object URL used to preview it. Dropping it
/// revokes the URL.
#[derive(Clone)]
struct SelectedImage {
    file: GlooFile,
    preview_url: ObjectUrl,
}

impl SelectedImage {
    fn new(file: GlooFile) -> Self {
        let preview_url = ObjectUrl::from(file.clone());
        Self { file, preview_url }
    }
}

enum Msg {
    // Image selection
    SelectFromGallery(GalleryImage),
    GalleryImageLoaded(GalleryImage, GlooFile),
    SelectFromDevice(GlooFile),

    // Detection
    RunDetection,
    DetectionFinished(DetectionTicket, Result<String, DetectClientError>),
}

struct Model {
    detector: Detector<SelectedImage, GtagReporter>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let detector = Detector::new(GtagReporter);
        detector.page_loaded();
        Self { detector }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectFromGallery(image) => handlers::handle_select_from_gallery(ctx, image),
            Msg::GalleryImageLoaded(image, file) => {
                handlers::handle_gallery_image_loaded(self, image, file)
            }
            Msg::SelectFromDevice(file) => handlers::handle_select_from_device(self, file),
            Msg::RunDetection => handlers::handle_run_detection(self, ctx),
            Msg::DetectionFinished(ticket, outcome) => {
                handlers::handle_detection_finished(self, ticket, outcome)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="hotdogpage">
                { render_header() }

                <main class="main-content">
                    { render_preview_area(self, ctx) }
                    { render_gallery(ctx) }
                    { render_upload_section(ctx) }
                </main>

                { render_loading_overlay(self) }
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Hot Dog detector starting, gateway at {}", api::DETECT_URL);
    yew::Renderer::<Model>::new().render();
}
