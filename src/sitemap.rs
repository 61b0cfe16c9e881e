// src/sitemap.rs

use crate::domain::property::parse_timestamp;
use chrono::{DateTime, SecondsFormat, Utc};
use maud::{html, PreEscaped};
use serde::Deserialize;
use serde_json::Value;

/// Site pages that are always listed.
pub const STATIC_PATHS: [&str; 3] = ["/", "/portfoy", "/iletisim"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SitemapEntry {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(rename = "_updatedAt", default)]
    pub updated_at: Option<String>,
}

/// Decode the sitemap query result, dropping entries without a slug.
pub fn entries_from_value(value: Value) -> Vec<SitemapEntry> {
    let Value::Array(items) = value else {
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<SitemapEntry>(item).ok())
        .filter(|entry| entry.slug.as_deref().is_some_and(|s| !s.is_empty()))
        .collect()
}

/// Render `urlset` XML. Static pages and entries without a usable
/// `_updatedAt` get `now` as their last modification.
pub fn render(site_url: &str, entries: &[SitemapEntry], now: DateTime<Utc>) -> String {
    let base = site_url.trim_end_matches('/');
    let now_str = now.to_rfc3339_opts(SecondsFormat::Secs, true);

    let lastmod = |entry: &SitemapEntry| match entry.updated_at.as_deref() {
        Some(raw) => {
            let parsed = parse_timestamp(Some(raw));
            if parsed == DateTime::<Utc>::MIN_UTC {
                now_str.clone()
            } else {
                parsed.to_rfc3339_opts(SecondsFormat::Secs, true)
            }
        }
        None => now_str.clone(),
    };

    let markup = html! {
        (PreEscaped(r#"<?xml version="1.0" encoding="UTF-8"?>"#))
        urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" {
            @for path in STATIC_PATHS {
                url {
                    loc { (base) (path) }
                    lastmod { (now_str) }
                }
            }
            @for entry in entries {
                @if let Some(slug) = &entry.slug {
                    url {
                        loc { (base) "/ilan/" (slug) }
                        lastmod { (lastmod(entry)) }
                    }
                }
            }
        }
    };

    markup.into_string()
}
