// src/state.rs

use crate::cms::{ContentSource, ListingStore, SanityClient};
use crate::config::Config;
use crate::geocode::NominatimClient;
use crate::mailer::ResendMailer;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Everything a request handler needs, shared across astra's workers.
pub struct AppState {
    pub config: Config,
    pub store: ListingStore,
    /// `None` when no mail API key is configured.
    pub mailer: Option<ResendMailer>,
    pub geocoder: NominatimClient,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let client = SanityClient::new(config.sanity.clone())
            .context("failed to build content store client")?;
        Self::with_source(config, Arc::new(client))
    }

    pub fn with_source(config: Config, source: Arc<dyn ContentSource>) -> Result<Self> {
        let store = ListingStore::new(source, config.cache_ttl);

        let mailer = match &config.resend_api_key {
            Some(key) => Some(
                ResendMailer::new(
                    key.clone(),
                    config.contact_from.clone(),
                    config.contact_to.clone(),
                )
                .context("failed to build mail client")?,
            ),
            None => {
                tracing::warn!("RESEND_API_KEY not set, contact form mail is disabled");
                None
            }
        };

        let geocoder = NominatimClient::new(config.nominatim_url.clone())
            .context("failed to build geocoding client")?;

        Ok(Self {
            config,
            store,
            mailer,
            geocoder,
        })
    }
}
