// errors.rs
use crate::cms::CmsError;
use crate::mailer::MailerError;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream services (CMS, mail).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Content store error: {0}")]
    Cms(#[from] CmsError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailerError),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Unauthorized(_) => 401,
            ServerError::Cms(_) => 502,
            ServerError::Mail(_) | ServerError::InternalError => 500,
            ServerError::Unavailable(_) => 503,
        }
    }

    /// Message safe to show to visitors.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::NotFound => "Aradığınız sayfa bulunamadı.".to_string(),
            ServerError::BadRequest(msg) | ServerError::Unauthorized(msg) => msg.clone(),
            ServerError::Cms(_) => "İlan bilgileri şu anda alınamıyor.".to_string(),
            ServerError::Mail(_) => "Failed to send email".to_string(),
            ServerError::Unavailable(msg) => msg.clone(),
            ServerError::InternalError => "Internal server error".to_string(),
        }
    }
}
