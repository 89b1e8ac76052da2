mod classifier;
mod config;
mod detection;
mod routes;
mod storage;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use classifier::{OpenAiClassifier, VisionClassifier};
use config::GatewayConfig;
use routes::{build_cors, configure_routes};
use std::sync::Arc;
use storage::UploadStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = GatewayConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, format!("Configuration failed: {}", e))
    })?;

    let classifier: Arc<dyn VisionClassifier> = Arc::new(OpenAiClassifier::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
    ));
    log::info!("Using model {} at {}", config.openai_model, config.openai_base_url);

    let store = UploadStore::new(config.upload_dir.clone());
    log::info!("Transient uploads go to {}", store.dir().display());

    let frontend_dir = if config.frontend_dir.is_dir() {
        log::info!("Serving frontend from {}", config.frontend_dir.display());
        Some(config.frontend_dir.clone())
    } else {
        log::warn!(
            "Frontend directory {} not found, serving the API only",
            config.frontend_dir.display()
        );
        None
    };

    let allowed_origins = config.allowed_origins.clone();
    log::info!("CORS allowed origins: {}", allowed_origins.join(", "));

    let bind_address = config.bind_address();
    log::info!("HotDog API listening at http://localhost:{}", config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(build_cors(&allowed_origins))
            .app_data(web::Data::from(classifier.clone()))
            .app_data(web::Data::new(store.clone()))
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
