use anyhow::{Context, Result};

pub const DEFAULT_AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";
pub const DEFAULT_PRIMARY_COLOR: &str = "#1565C0";

/// Application configuration loaded from environment variables.
/// Startup fails if the data store credentials are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub airtable_api_url: String,
    pub theme_primary_color: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            airtable_api_key: require_env("AIRTABLE_API_KEY")?,
            airtable_base_id: require_env("AIRTABLE_BASE_ID")?,
            airtable_api_url: optional_env("AIRTABLE_API_URL", DEFAULT_AIRTABLE_API_URL),
            theme_primary_color: optional_env("THEME_PRIMARY_COLOR", DEFAULT_PRIMARY_COLOR),
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
