use anyhow::{Context, Result};

use crate::llm_client::GEMINI_API_BASE_URL;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Only malformed values fail startup; a missing API key surfaces on the first AI call.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_base_url: optional_env("GEMINI_API_BASE_URL")
                .unwrap_or_else(|| GEMINI_API_BASE_URL.to_string()),
            host: optional_env("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: optional_env("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Reads an env var, treating empty or whitespace-only values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Config for in-process tests: no key, no network.
    pub fn for_tests() -> Self {
        Config {
            gemini_api_key: None,
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            rust_log: "debug".to_string(),
        }
    }
}
