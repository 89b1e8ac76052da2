use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Fixed set of sample images bundled with the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum GalleryImage {
    #[strum(serialize = "Hot Dog")]
    HotDog,
    Banana,
    Car,
    Elephant,
}

impl GalleryImage {
    /// Gallery images in display order.
    pub fn all() -> impl Iterator<Item = GalleryImage> {
        Self::iter()
    }

    pub fn path(self) -> &'static str {
        match self {
            GalleryImage::HotDog => "/images/hotdog.jpg",
            GalleryImage::Banana => "/images/banana.jpg",
            GalleryImage::Car => "/images/car.jpg",
            GalleryImage::Elephant => "/images/elephant.jpg",
        }
    }

    pub fn file_name(self) -> &'static str {
        self.path().rsplit('/').next().unwrap_or_default()
    }
}
