use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::projection::Escaping;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub template_path: PathBuf,
    pub template_escaping: Escaping,
    pub chromium_path: PathBuf,
    pub render_timeout_secs: u64,
    pub session_idle_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: parse_env("PORT", 5001)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            template_path: std::env::var("CV_TEMPLATE_PATH")
                .unwrap_or_else(|_| "templates/cv-template.html".to_string())
                .into(),
            template_escaping: parse_env("CV_TEMPLATE_ESCAPE", Escaping::Html)?,
            chromium_path: std::env::var("CHROMIUM_PATH")
                .unwrap_or_else(|_| "chromium".to_string())
                .into(),
            render_timeout_secs: parse_env("RENDER_TIMEOUT_SECS", 60)?,
            session_idle_minutes: parse_env("SESSION_IDLE_MINUTES", 60)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Parses an optional variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
