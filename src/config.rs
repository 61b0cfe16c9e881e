// src/config.rs

use crate::cms::client::SanityConfig;
use crate::domain::filters::DEFAULT_PROVINCE;
use crate::geocode::DEFAULT_NOMINATIM_URL;
use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    /// Public base URL, used for sitemap links.
    pub site_url: String,
    pub sanity: SanityConfig,
    pub webhook_secret: Option<String>,
    /// Without a key the contact form reports mail as unavailable.
    pub resend_api_key: Option<String>,
    pub contact_from: String,
    pub contact_to: String,
    pub nominatim_url: String,
    pub cache_ttl: Duration,
    pub default_province: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any variable lookup; unset variables take defaults.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| {
            var(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let secret = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            bind_addr: parsed(&var, "BIND_ADDR", "127.0.0.1:3000")?,
            max_workers: parsed(&var, "MAX_WORKERS", "8")?,
            site_url: text("SITE_URL", "http://localhost:3000")
                .trim_end_matches('/')
                .to_string(),
            sanity: SanityConfig {
                project_id: text("SANITY_PROJECT_ID", "jy06mayv"),
                dataset: text("SANITY_DATASET", "production"),
                api_version: text("SANITY_API_VERSION", "2023-05-03"),
                use_cdn: parsed(&var, "SANITY_USE_CDN", "true")?,
            },
            webhook_secret: secret("SANITY_WEBHOOK_SECRET"),
            resend_api_key: secret("RESEND_API_KEY"),
            contact_from: text(
                "CONTACT_FROM",
                "Hatice Özen Gayrimenkul <noreply@haticeozengayrimenkul.com>",
            ),
            contact_to: text("CONTACT_TO", "info@haticeozengayrimenkul.com"),
            nominatim_url: text("NOMINATIM_URL", DEFAULT_NOMINATIM_URL),
            cache_ttl: Duration::from_secs(parsed(&var, "CACHE_TTL_SECS", "10")?),
            default_province: var("DEFAULT_PROVINCE")
                .map(|p| p.trim().to_string())
                .unwrap_or_else(|| DEFAULT_PROVINCE.to_string()),
        })
    }
}

fn parsed<F, T>(var: &F, key: &str, default: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = var(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .with_context(|| format!("{key} has an invalid value: {raw}"))
}
