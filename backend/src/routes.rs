use actix_cors::Cors;
use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{HttpResponse, web};
use log::{error, info};
use shared::{DETECT_PATH, DetectResponse};
use std::path::PathBuf;

use crate::classifier::VisionClassifier;
use crate::detection::{DetectError, ImageUpload, detect_verdict};
use crate::storage::UploadStore;

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: Option<PathBuf>) {
    cfg.service(web::resource(DETECT_PATH).route(web::post().to(handle_detect)));

    if let Some(dir) = frontend_dir {
        cfg.service(Files::new("/", dir).index_file("index.html"));
    }
}

/// Only the listed origins get CORS headers. Requests from anywhere else
/// are still served, the browser just cannot read the response.
pub fn build_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .block_on_origin_mismatch(false)
        .max_age(3600)
}

async fn handle_detect(
    classifier: web::Data<dyn VisionClassifier>,
    store: web::Data<UploadStore>,
    payload: Multipart,
) -> Result<HttpResponse, DetectError> {
    let upload = ImageUpload::from_multipart(payload).await.map_err(|e| {
        error!("Rejected detect request: {}", e);
        e
    })?;

    info!(
        "Classifying upload {} ({} bytes, {})",
        upload.file_name.as_deref().unwrap_or("<unnamed>"),
        upload.bytes.len(),
        upload.content_type.as_deref().unwrap_or("no content type"),
    );

    match detect_verdict(classifier.get_ref(), &store, upload).await {
        Ok(result) => {
            info!("Verdict: {}", result);
            Ok(HttpResponse::Ok().json(DetectResponse { result }))
        }
        Err(e) => {
            error!("Detection failed: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifierError;
    use crate::config::DEFAULT_ALLOWED_ORIGINS;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use async_trait::async_trait;
    use shared::ErrorResponse;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    const BOUNDARY: &str = "----hotdog-test-boundary";
    const ALLOWED_ORIGIN: &str = "https://hotdogdetector.flex-ai.com";

    struct StubClassifier {
        answer: Result<String, (u16, String)>,
        calls: Mutex<Vec<String>>,
    }

    impl StubClassifier {
        fn answering(answer: &str) -> Self {
            Self {
                answer: Ok(answer.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16, message: &str) -> Self {
            Self {
                answer: Err((status, message.to_string())),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl VisionClassifier for StubClassifier {
        async fn classify(&self, _prompt: &str, image_data_url: &str) -> Result<String, ClassifierError> {
            self.calls.lock().unwrap().push(image_data_url.to_string());
            match &self.answer {
                Ok(answer) => Ok(answer.clone()),
                Err((status, message)) => Err(ClassifierError::ApiError {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("hotdog-routes-{}", uuid::Uuid::new_v4().simple()))
    }

    fn leftover_uploads(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
    }

    fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        multipart_parts(&[(field, filename, content_type, data)])
    }

    fn multipart_parts(parts: &[(&str, &str, &str, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (field, filename, content_type, data) in parts {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn detect_request(body: Vec<u8>, origin: Option<&str>) -> test::TestRequest {
        let mut req = test::TestRequest::post().uri(DETECT_PATH).insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ));
        if let Some(origin) = origin {
            req = req.insert_header((header::ORIGIN, origin));
        }
        req.set_payload(body)
    }

    macro_rules! gateway {
        ($classifier:expr, $dir:expr) => {
            gateway!($classifier, $dir, None)
        };
        ($classifier:expr, $dir:expr, $frontend_dir:expr) => {{
            let classifier: Arc<dyn VisionClassifier> = $classifier;
            let frontend_dir: Option<PathBuf> = $frontend_dir;
            let origins: Vec<String> = DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect();
            test::init_service(
                App::new()
                    .wrap(build_cors(&origins))
                    .app_data(web::Data::from(classifier))
                    .app_data(web::Data::new(UploadStore::new($dir)))
                    .configure(|cfg| configure_routes(cfg, frontend_dir)),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn hot_dog_upload_returns_verdict_and_cleans_up() {
        let dir = scratch_dir();
        let stub = Arc::new(StubClassifier::answering("Hot Dog\n"));
        let app = gateway!(stub.clone(), dir.clone());

        let body = multipart_body("image", "hotdog.jpg", "image/jpeg", b"\xff\xd8jpeg-bytes");
        let resp = test::call_service(&app, detect_request(body, None).to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: DetectResponse = test::read_body_json(resp).await;
        assert_eq!(body.result, "Hot Dog");
        assert_eq!(stub.call_count(), 1);
        assert!(stub.calls.lock().unwrap()[0].starts_with("data:image/jpeg;base64,"));
        assert_eq!(leftover_uploads(&dir), 0);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[actix_web::test]
    async fn unexpected_verdict_is_relayed_verbatim() {
        let dir = scratch_dir();
        let app = gateway!(Arc::new(StubClassifier::answering("Probably a sausage")), dir.clone());

        let body = multipart_body("image", "sausage.png", "image/png", b"png");
        let resp = test::call_service(&app, detect_request(body, None).to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: DetectResponse = test::read_body_json(resp).await;
        assert_eq!(body.result, "Probably a sausage");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[actix_web::test]
    async fn model_failure_is_500_and_upload_is_still_removed() {
        let dir = scratch_dir();
        let stub = Arc::new(StubClassifier::failing(401, "Incorrect API key provided"));
        let app = gateway!(stub.clone(), dir.clone());

        let body = multipart_body("image", "car.jpg", "image/jpeg", b"car");
        let resp = test::call_service(&app, detect_request(body, None).to_request()).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "model API returned 401: Incorrect API key provided");
        assert_eq!(stub.call_count(), 1);
        assert_eq!(leftover_uploads(&dir), 0);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[actix_web::test]
    async fn missing_image_field_fails_before_model_call() {
        let dir = scratch_dir();
        let stub = Arc::new(StubClassifier::answering("Hot Dog"));
        let app = gateway!(stub.clone(), dir.clone());

        let body = multipart_body("photo", "hotdog.jpg", "image/jpeg", b"bytes");
        let resp = test::call_service(&app, detect_request(body, None).to_request()).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "no image file in request");
        assert_eq!(stub.call_count(), 0);
    }

    #[actix_web::test]
    async fn non_multipart_body_is_500() {
        let dir = scratch_dir();
        let stub = Arc::new(StubClassifier::answering("Hot Dog"));
        let app = gateway!(stub.clone(), dir.clone());

        let req = test::TestRequest::post()
            .uri(DETECT_PATH)
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload(r#"{"image":"nope"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(!body.error.is_empty());
        assert_eq!(stub.call_count(), 0);
    }

    #[actix_web::test]
    async fn allowed_origin_gets_cors_header() {
        let dir = scratch_dir();
        let app = gateway!(Arc::new(StubClassifier::answering("Not Hot Dog")), dir.clone());

        let body = multipart_body("image", "banana.jpg", "image/jpeg", b"banana");
        let resp = test::call_service(&app, detect_request(body, Some(ALLOWED_ORIGIN)).to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some(ALLOWED_ORIGIN)
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[actix_web::test]
    async fn foreign_origin_gets_no_cors_header() {
        let dir = scratch_dir();
        let app = gateway!(Arc::new(StubClassifier::answering("Not Hot Dog")), dir.clone());

        let body = multipart_body("image", "banana.jpg", "image/jpeg", b"banana");
        let resp = test::call_service(&app, detect_request(body, Some("https://evil.example")).to_request()).await;

        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[actix_web::test]
    async fn only_the_first_image_part_is_classified() {
        let dir = scratch_dir();
        let stub = Arc::new(StubClassifier::answering("Not Hot Dog"));
        let app = gateway!(stub.clone(), dir.clone());

        let body = multipart_parts(&[
            ("note", "note.txt", "text/plain", &b"ignore me"[..]),
            ("image", "first.png", "image/png", &b"hi"[..]),
            ("image", "second.gif", "image/gif", &b"GIF89a"[..]),
        ]);
        let resp = test::call_service(&app, detect_request(body, None).to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: DetectResponse = test::read_body_json(resp).await;
        assert_eq!(body.result, "Not Hot Dog");
        assert_eq!(*stub.calls.lock().unwrap(), ["data:image/png;base64,aGk="]);
        assert_eq!(leftover_uploads(&dir), 0);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[actix_web::test]
    async fn frontend_is_served_next_to_the_api() {
        let dir = scratch_dir();
        let frontend = scratch_dir();
        std::fs::create_dir_all(&frontend).unwrap();
        std::fs::write(frontend.join("index.html"), "<title>Hot Dog or Not Hot Dog</title>").unwrap();

        let stub = Arc::new(StubClassifier::answering("Hot Dog"));
        let app = gateway!(stub.clone(), dir.clone(), Some(frontend.clone()));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let page = test::read_body(resp).await;
        assert_eq!(&page[..], b"<title>Hot Dog or Not Hot Dog</title>");

        let body = multipart_body("image", "hotdog.jpg", "image/jpeg", b"bytes");
        let resp = test::call_service(&app, detect_request(body, None).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: DetectResponse = test::read_body_json(resp).await;
        assert_eq!(body.result, "Hot Dog");
        assert_eq!(stub.call_count(), 1);

        let _ = std::fs::remove_dir_all(&dir);
        let _ = std::fs::remove_dir_all(&frontend);
    }
}
