use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use shared::{DETECT_PATH, DetectResponse, ErrorResponse, GalleryImage, IMAGE_FIELD};
use std::fmt;

/// Gateway endpoint. Set `HOTDOG_API_URL` at build time to point the
/// client at a gateway on another origin.
pub const DETECT_URL: &str = match option_env!("HOTDOG_API_URL") {
    Some(url) => url,
    None => DETECT_PATH,
};

#[derive(Debug)]
pub enum DetectClientError {
    Form(String),
    Network(gloo_net::Error),
    Status { status: u16, message: String },
}

impl fmt::Display for DetectClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectClientError::Form(e) => write!(f, "Failed to build form data: {}", e),
            DetectClientError::Network(e) => write!(f, "Network error: {}", e),
            DetectClientError::Status { status, message } => {
                write!(f, "Server error: {} - {}", status, message)
            }
        }
    }
}

impl From<gloo_net::Error> for DetectClientError {
    fn from(err: gloo_net::Error) -> Self {
        DetectClientError::Network(err)
    }
}

async fn status_error(response: gloo_net::http::Response) -> DetectClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    DetectClientError::Status { status, message }
}

/// Posts the image as multipart field `image` and returns the verdict text.
pub async fn request_detection(file: &GlooFile) -> Result<String, DetectClientError> {
    let form_data =
        web_sys::FormData::new().map_err(|e| DetectClientError::Form(format!("{:?}", e)))?;
    form_data
        .append_with_blob_and_filename(IMAGE_FIELD, file.as_ref(), &file.name())
        .map_err(|e| DetectClientError::Form(format!("{:?}", e)))?;

    let response = Request::post(DETECT_URL).body(form_data)?.send().await?;
    if !response.ok() {
        return Err(status_error(response).await);
    }

    let parsed = response.json::<DetectResponse>().await?;
    Ok(parsed.result)
}

/// Downloads a bundled gallery image and wraps it as a file.
pub async fn fetch_gallery_image(image: GalleryImage) -> Result<GlooFile, DetectClientError> {
    let response = Request::get(image.path()).send().await?;
    if !response.ok() {
        return Err(status_error(response).await);
    }

    let mime_type = response.headers().get("content-type");
    let bytes = response.binary().await?;
    Ok(GlooFile::new_with_options(
        image.file_name(),
        bytes.as_slice(),
        mime_type.as_deref(),
        None,
    ))
}
