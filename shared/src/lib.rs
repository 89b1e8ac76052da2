pub mod analytics;
pub mod detector;
pub mod gallery;
pub mod verdict;

use serde::{Deserialize, Serialize};

pub use analytics::{AnalyticsEvent, AnalyticsReporter};
pub use detector::{DetectionTicket, Detector, DetectorState, Phase, VerdictFeedback};
pub use gallery::GalleryImage;
pub use verdict::{Overlay, Sound, Verdict};

/// Route served by the gateway and called by the client.
pub const DETECT_PATH: &str = "/hotdog/detect";

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DetectResponse {
    pub result: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}
