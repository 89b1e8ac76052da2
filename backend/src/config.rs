use actix_web::http::Uri;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:3001",
    "http://origin.hotdogdetector.flex-ai.com",
    "https://hotdogdetector.flex-ai.com",
];

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const DEFAULT_UPLOAD_DIR: &str = "uploads";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Gateway settings, read from the process environment (and `.env`).
#[derive(Clone)]
pub struct GatewayConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub allowed_origins: Vec<String>,
    pub frontend_dir: PathBuf,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key = get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = match get("CORS_ALLOWED_ORIGINS") {
            Some(raw) => parse_origins(&raw)?,
            None => DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        let frontend_dir = get("FRONTEND_DIR").map(PathBuf::from).unwrap_or_else(|| {
            match get("CARGO_MANIFEST_DIR") {
                Some(manifest_dir) => PathBuf::from(format!("{}/../frontend/dist", manifest_dir)),
                None => PathBuf::from("/usr/src/app/frontend/dist"),
            }
        });

        Ok(Self {
            openai_api_key,
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            port,
            upload_dir: PathBuf::from(get("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string())),
            allowed_origins,
            frontend_dir,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Comma-separated `scheme://host[:port]` origins. Wildcards are refused,
/// the allow-list must name every origin.
fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let invalid = || ConfigError::Invalid {
        name: "CORS_ALLOWED_ORIGINS",
        value: raw.to_string(),
    };

    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            let uri = origin.parse::<Uri>().map_err(|_| invalid())?;
            let bare_origin = uri.scheme().is_some()
                && uri.host().is_some()
                && uri.query().is_none()
                && matches!(uri.path(), "" | "/");
            if origin == "*" || !bare_origin {
                return Err(invalid());
            }
            Ok(origin.trim_end_matches('/').to_string())
        })
        .collect::<Result<_, _>>()?;

    if origins.is_empty() {
        return Err(invalid());
    }
    Ok(origins)
}
