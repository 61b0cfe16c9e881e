// src/cms/webhook.rs

//! Content store webhook used to drop cached listings after an edit.
//!
//! Requests carry `sanity-webhook-signature: t=<timestamp>,v1=<signature>`
//! where the signature is the unpadded URL-safe base64 HMAC-SHA256 of
//! `"{timestamp}.{body}"` keyed by the shared secret.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "sanity-webhook-signature";

#[derive(Debug, Error, PartialEq)]
pub enum WebhookError {
    #[error("webhook secret not configured")]
    NotConfigured,

    #[error("missing signature header")]
    MissingSignature,

    #[error("malformed signature header")]
    MalformedSignature,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Bad Request")]
    BadPayload,
}

#[derive(Debug, Deserialize)]
struct SlugRef {
    current: Option<String>,
}

/// The parts of a changed document the cache cares about.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(rename = "_type")]
    pub doc_type: Option<String>,
    slug: Option<SlugRef>,
}

impl WebhookPayload {
    pub fn slug(&self) -> Option<&str> {
        self.slug
            .as_ref()
            .and_then(|s| s.current.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Site paths whose content may have changed.
    pub fn affected_paths(&self) -> Vec<String> {
        let mut paths = vec!["/".to_string(), "/portfoy".to_string()];
        if let Some(slug) = self.slug() {
            paths.push(format!("/ilan/{slug}"));
        }
        paths
    }
}

/// Split `t=…,v1=…` into timestamp and signature.
fn parse_header(header: &str) -> Result<(&str, &str), WebhookError> {
    let mut timestamp = None;
    let mut signature = None;

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", v)) => timestamp = Some(v),
            Some(("v1", v)) => signature = Some(v),
            _ => {}
        }
    }

    match (timestamp, signature) {
        (Some(t), Some(s)) if !t.is_empty() && !s.is_empty() => Ok((t, s)),
        _ => Err(WebhookError::MalformedSignature),
    }
}

fn mac_for(secret: &str, timestamp: &str, body: &[u8]) -> Result<HmacSha256, WebhookError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| WebhookError::NotConfigured)?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);
    Ok(mac)
}

/// Build a signature header; used by tests and local tooling.
pub fn sign(secret: &str, timestamp: &str, body: &[u8]) -> Result<String, WebhookError> {
    let signature = mac_for(secret, timestamp, body)?.finalize().into_bytes();
    Ok(format!("t={timestamp},v1={}", URL_SAFE_NO_PAD.encode(signature)))
}

pub fn verify_signature(
    secret: Option<&str>,
    header: Option<&str>,
    body: &[u8],
) -> Result<(), WebhookError> {
    let secret = secret
        .filter(|s| !s.is_empty())
        .ok_or(WebhookError::NotConfigured)?;
    let header = header.ok_or(WebhookError::MissingSignature)?;
    let (timestamp, signature) = parse_header(header)?;

    let expected = URL_SAFE_NO_PAD
        .decode(signature.trim_end_matches('='))
        .map_err(|_| WebhookError::InvalidSignature)?;

    mac_for(secret, timestamp, body)?
        .verify_slice(&expected)
        .map_err(|_| WebhookError::InvalidSignature)
}

/// Verify the request and decode its body.
pub fn parse_webhook(
    secret: Option<&str>,
    header: Option<&str>,
    body: &[u8],
) -> Result<WebhookPayload, WebhookError> {
    verify_signature(secret, header, body)?;

    let payload: WebhookPayload =
        serde_json::from_slice(body).map_err(|_| WebhookError::BadPayload)?;
    match payload.doc_type.as_deref() {
        Some(t) if !t.is_empty() => Ok(payload),
        _ => Err(WebhookError::BadPayload),
    }
}
