use std::path::PathBuf;

use anyhow::{Context, Result};

/// Uploads larger than this are rejected before the handler runs.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory for ephemeral upload files. `/tmp` on serverless hosts.
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Optional TOML file replacing the built-in keyword tables.
    pub vocabulary_path: Option<PathBuf>,
    /// Optional newline-separated stop-word list replacing the built-in one.
    pub stopwords_path: Option<PathBuf>,
    /// Forces the naive whitespace tokenizer.
    pub disable_stopwords: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let upload_dir = match optional_env("UPLOAD_DIR") {
            Some(dir) => PathBuf::from(dir),
            None if optional_env("VERCEL").is_some() => PathBuf::from("/tmp"),
            None => PathBuf::from("uploads"),
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            upload_dir,
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            vocabulary_path: optional_env("VOCABULARY_PATH").map(PathBuf::from),
            stopwords_path: optional_env("STOPWORDS_PATH").map(PathBuf::from),
            disable_stopwords: match optional_env("DISABLE_STOPWORDS") {
                Some(v) => parse_flag(&v)
                    .with_context(|| format!("DISABLE_STOPWORDS must be a boolean, got '{v}'"))?,
                None => false,
            },
        })
    }
}

/// Returns the variable's value, treating unset and blank the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
