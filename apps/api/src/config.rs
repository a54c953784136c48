use anyhow::{Context, Result};

const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Everything has a working default; the LLM key is genuinely optional and
/// its absence only disables LLM-backed analysis.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub render_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            render_timeout_secs: std::env::var("RENDER_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_RENDER_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .context("RENDER_TIMEOUT_SECS must be a number of seconds")?,
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
        })
    }
}

/// Treats unset and blank the same way so `OPENAI_API_KEY=` in a .env file
/// does not produce a client with an empty key.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
