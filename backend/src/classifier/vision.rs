use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("model API returned {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("model returned no message content")]
    EmptyResponse,
}

/// A hosted model that answers a text instruction about one image.
#[async_trait]
pub trait VisionClassifier: Send + Sync {
    /// `image_data_url` is a `data:<mime>;base64,...` URL. Returns the
    /// model's raw answer text.
    async fn classify(&self, prompt: &str, image_data_url: &str) -> Result<String, ClassifierError>;
}
