use anyhow::Result;

/// Backend base address used when `API_BASE_URL` is unset. Points at a local
/// development instance of the processing service.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Application configuration loaded from environment variables. The backend
/// address is the only real setting; everything else is ambient.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: normalize_base_url(
                &std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Endpoint paths are joined with a leading slash, so the base must not
/// carry a trailing one.
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
