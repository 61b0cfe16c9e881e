use crate::config::Config;
use crate::responses::html_error_response;
use crate::router::handle;
use crate::state::AppState;
use anyhow::{Context, Result};
use astra::Server;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cms;
mod config;
mod domain;
mod errors;
mod geocode;
mod geos;
mod mailer;
mod responses;
mod router;
mod sitemap;
mod state;
mod templates;

#[cfg(test)]
mod tests;

fn main() -> Result<()> {
    // 1️⃣ Logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ozen_emlak=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2️⃣ Configuration and shared clients
    let config = Config::from_env().context("Failed to load configuration")?;
    let addr = config.bind_addr;
    let max_workers = config.max_workers;
    let state = Arc::new(AppState::from_config(config)?);

    // 3️⃣ Start the server
    tracing::info!("Starting server at http://{addr}");
    let server = Server::bind(&addr).max_workers(max_workers);

    server
        .serve(move |req, _info| match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => html_error_response(err),
        })
        .context("Server ended with error")?;

    tracing::info!("Server shut down cleanly.");
    Ok(())
}
