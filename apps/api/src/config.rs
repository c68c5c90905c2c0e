use std::path::PathBuf;

use anyhow::{Context, Result};

/// Fontsource mirror serving the Inter TTF files the carousel renders with.
pub const DEFAULT_FONT_BASE_URL: &str = "https://cdn.jsdelivr.net/fontsource/fonts/inter@latest";
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
///
/// Only malformed values abort startup. A missing `ANTHROPIC_API_KEY` is
/// tolerated here and reported per request by the optimize endpoint.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub font_base_url: String,
    /// When set, carousel fonts are read from this directory instead of the CDN.
    pub font_dir: Option<PathBuf>,
    pub max_body_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            font_base_url: optional_env("FONT_BASE_URL")
                .unwrap_or_else(|| DEFAULT_FONT_BASE_URL.to_string()),
            font_dir: optional_env("FONT_DIR").map(PathBuf::from),
            max_body_bytes: match optional_env("MAX_BODY_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_BODY_BYTES must be a positive integer")?,
                None => DEFAULT_MAX_BODY_BYTES,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an environment variable, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Configuration used by handler tests: no credential, fonts from `font_dir`.
    pub fn for_tests(font_dir: Option<PathBuf>) -> Self {
        Config {
            anthropic_api_key: None,
            font_base_url: DEFAULT_FONT_BASE_URL.to_string(),
            font_dir,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
