pub mod blocks;
pub mod client;
pub mod queries;
pub mod store;
pub mod webhook;

use thiserror::Error;

pub use client::{records_from_value, ContentSource, SanityClient};
pub use store::ListingStore;

#[derive(Debug, Error)]
pub enum CmsError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("content store answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}
