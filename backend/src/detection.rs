use actix_multipart::{Multipart, MultipartError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::TryStreamExt;
use shared::{ErrorResponse, IMAGE_FIELD};
use thiserror::Error;

use crate::classifier::{ClassifierError, VisionClassifier};
use crate::storage::{StorageError, UploadStore};

pub const DETECTION_PROMPT: &str =
    r#"Is this a photo of a hot dog? Respond only with "Hot Dog" or "Not Hot Dog"."#;

const FALLBACK_MIME: &str = "image/jpeg";

/// Every failure in the pipeline answers 500 with `{"error": ...}`.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("failed to read multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("no image file in request")]
    MissingImage,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

impl ResponseError for DetectError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::InternalServerError().json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl ImageUpload {
    /// Takes the first `image` part of the body. Other parts are skipped.
    pub async fn from_multipart(mut payload: Multipart) -> Result<Self, DetectError> {
        let mut upload = None;

        while let Some(mut field) = payload.try_next().await? {
            if upload.is_some() || field.name() != Some(IMAGE_FIELD) {
                while field.try_next().await?.is_some() {}
                continue;
            }

            let content_type = field.content_type().map(|mime| mime.essence_str().to_string());
            let file_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(str::to_string);

            let mut bytes = Vec::new();
            while let Some(chunk) = field.try_next().await? {
                bytes.extend_from_slice(&chunk);
            }

            upload = Some(ImageUpload {
                bytes,
                content_type,
                file_name,
            });
        }

        upload.ok_or(DetectError::MissingImage)
    }
}

/// `data:<mime>;base64,<payload>`. Non-image or missing content types are
/// sent as JPEG.
pub fn encode_data_url(content_type: Option<&str>, image_data: &[u8]) -> String {
    let mime = content_type
        .filter(|ct| ct.starts_with("image/"))
        .unwrap_or(FALLBACK_MIME);
    format!("data:{};base64,{}", mime, STANDARD.encode(image_data))
}

/// Runs one upload through the classifier and returns the trimmed answer.
/// The on-disk copy is gone by the time this returns, whatever the outcome.
pub async fn detect_verdict(
    classifier: &dyn VisionClassifier,
    store: &UploadStore,
    upload: ImageUpload,
) -> Result<String, DetectError> {
    let transient = store.persist(&upload.bytes).await?;
    let stored = transient.read().await?;
    let data_url = encode_data_url(upload.content_type.as_deref(), &stored);

    let answer = classifier.classify(DETECTION_PROMPT, &data_url).await;
    drop(transient);

    Ok(answer?.trim().to_string())
}
