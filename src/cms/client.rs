// src/cms/client.rs
use crate::cms::CmsError;
use crate::domain::PropertyRecord;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// The content store, seen as a function from a query and its parameters
/// to a JSON result.
pub trait ContentSource: Send + Sync {
    fn fetch(&self, query: &str, params: &[(&str, &str)]) -> Result<Value, CmsError>;
}

#[derive(Debug, Clone)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Read from the CDN edge instead of the live API.
    pub use_cdn: bool,
}

pub struct SanityClient {
    cfg: SanityConfig,
    client: Client,
}

impl SanityClient {
    pub fn new(cfg: SanityConfig) -> Result<Self, CmsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| CmsError::Request(e.to_string()))?;

        Ok(Self { cfg, client })
    }

    /// `https://{project}.api[cdn].sanity.io/v{version}/data/query/{dataset}`
    /// with the query and its JSON-encoded `$params`.
    pub fn query_url(&self, query: &str, params: &[(&str, &str)]) -> Result<Url, CmsError> {
        let host = if self.cfg.use_cdn { "apicdn" } else { "api" };
        let mut url = Url::parse(&format!(
            "https://{}.{}.sanity.io/v{}/data/query/{}",
            self.cfg.project_id, host, self.cfg.api_version, self.cfg.dataset
        ))
        .map_err(|e| CmsError::Request(format!("invalid content store url: {e}")))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            for (name, value) in params {
                let encoded = Value::String((*value).to_string()).to_string();
                pairs.append_pair(&format!("${name}"), &encoded);
            }
            pairs.append_pair("perspective", "published");
        }

        Ok(url)
    }
}

impl ContentSource for SanityClient {
    fn fetch(&self, query: &str, params: &[(&str, &str)]) -> Result<Value, CmsError> {
        let url = self.query_url(query, params)?;

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| CmsError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(CmsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut body: Value = resp
            .json()
            .map_err(|e| CmsError::Decode(e.to_string()))?;

        match body.get_mut("result") {
            Some(result) => Ok(result.take()),
            None => Err(CmsError::Decode("response has no `result`".into())),
        }
    }
}

/// Decode a query result into property records.
///
/// Anything other than an array counts as no records. Items that are not
/// property objects are skipped.
pub fn records_from_value(value: Value) -> Vec<PropertyRecord> {
    let Value::Array(items) = value else {
        if !value.is_null() {
            tracing::warn!("expected an array of properties, got {}", kind(&value));
        }
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<PropertyRecord>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping property due to decode error: {e}");
                None
            }
        })
        .collect()
}

/// Decode a single-document query result; `null` means not found.
pub fn record_from_value(value: Value) -> Result<Option<PropertyRecord>, CmsError> {
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| CmsError::Decode(e.to_string()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
