use super::super::{Model, Msg};
use shared::GalleryImage;
use yew::prelude::*;

pub fn render_gallery(ctx: &Context<Model>) -> Html {
    html! {
        <section class="gallery">
            <h1>{"Choose an Image!"}</h1>
            <div class="thumbs">
                { for GalleryImage::all().map(|image| render_thumbnail(ctx, image)) }
            </div>
        </section>
    }
}

fn render_thumbnail(ctx: &Context<Model>, image: GalleryImage) -> Html {
    html! {
        <img
            key={image.path()}
            src={image.path()}
            alt={image.to_string()}
            title={image.to_string()}
            class="mythumbs"
            onclick={ctx.link().callback(move |_| Msg::SelectFromGallery(image))}
        />
    }
}
