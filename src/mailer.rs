// src/mailer.rs

use maud::html;
use reqwest::blocking::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("API error: {0}")]
    ApiError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Name, email and message are required")]
    MissingFields,

    #[error("A valid email address is required")]
    InvalidEmail,
}

impl ContactError {
    /// Text shown above the contact form.
    pub fn visitor_message(self) -> &'static str {
        match self {
            ContactError::MissingFields => "Lütfen ad, e-posta ve mesaj alanlarını doldurun.",
            ContactError::InvalidEmail => "Lütfen geçerli bir e-posta adresi girin.",
        }
    }
}

/// A message from the site's contact form.
///
/// Every field is trimmed on the way in; blank, `null` and non-string
/// values are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactMessage {
    #[serde(default, deserialize_with = "trimmed")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub message: Option<String>,
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => non_blank(&s),
        _ => None,
    })
}

/// `local@domain` with both parts present and no whitespace.
fn plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

impl ContactMessage {
    pub fn from_form(fields: &HashMap<String, String>) -> Self {
        let field = |key: &str| fields.get(key).and_then(|v| non_blank(v));
        Self {
            name: field("name"),
            email: field("email"),
            phone: field("phone"),
            subject: field("subject"),
            message: field("message"),
        }
    }

    /// Name, email and message are required; the email must look like one.
    pub fn validate(&self) -> Result<(), ContactError> {
        let (Some(_), Some(email), Some(_)) = (&self.name, &self.email, &self.message) else {
            return Err(ContactError::MissingFields);
        };
        if !plausible_email(email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }

    pub fn subject_line(&self) -> String {
        let subject = self.subject.as_deref().unwrap_or("Genel Mesaj");
        format!("İletişim Formu: {subject}")
    }

    /// HTML body of the notification email. Visitor input is escaped.
    pub fn render_html(&self) -> String {
        html! {
            div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;" {
                h2 style="color: #1e40af; border-bottom: 2px solid #1e40af; padding-bottom: 10px;" {
                    "Yeni İletişim Formu Mesajı"
                }
                div style="background-color: #f8fafc; padding: 20px; border-radius: 8px; margin: 20px 0;" {
                    h3 style="color: #374151; margin-top: 0;" { "Gönderen Bilgileri" }
                    p { strong { "Ad Soyad:" } " " (self.name.as_deref().unwrap_or_default()) }
                    p { strong { "E-posta:" } " " (self.email.as_deref().unwrap_or_default()) }
                    @if let Some(phone) = &self.phone {
                        p { strong { "Telefon:" } " " (phone) }
                    }
                    @if let Some(subject) = &self.subject {
                        p { strong { "Konu:" } " " (subject) }
                    }
                }
                div style="background-color: #ffffff; padding: 20px; border: 1px solid #e5e7eb; border-radius: 8px;" {
                    h3 style="color: #374151; margin-top: 0;" { "Mesaj" }
                    p style="white-space: pre-wrap; line-height: 1.6;" { (self.message.as_deref().unwrap_or_default()) }
                }
                div style="margin-top: 20px; padding: 15px; background-color: #f0f9ff; border-left: 4px solid #1e40af; border-radius: 4px;" {
                    p style="margin: 0; color: #1e40af; font-size: 14px;" {
                        "Bu mesaj Özen Gayrimenkul web sitesindeki iletişim formundan gönderilmiştir."
                    }
                }
            }
        }
        .into_string()
    }
}

#[derive(Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: String,
    html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Deserialize)]
struct ResendResponse {
    id: Option<String>,
}

pub struct ResendMailer {
    api_key: String,
    sender: String,
    recipient: String,
    client: Client,
}

impl ResendMailer {
    pub fn new(api_key: String, sender: String, recipient: String) -> Result<Self, MailerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;

        Ok(Self {
            api_key,
            sender,
            recipient,
            client,
        })
    }

    /// Forward a contact message to the office inbox. Returns the
    /// provider's message id when it sends one.
    pub fn send_contact(&self, msg: &ContactMessage) -> Result<Option<String>, MailerError> {
        let payload = ResendPayload {
            from: &self.sender,
            to: vec![&self.recipient],
            subject: msg.subject_line(),
            html: msg.render_html(),
            reply_to: msg.email.as_deref(),
        };

        let resp = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_body = resp.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MailerError::ApiError(format!("{status} - {error_body}")));
        }

        let id = resp.json::<ResendResponse>().ok().and_then(|r| r.id);
        tracing::info!(id = id.as_deref().unwrap_or("-"), "contact email sent");
        Ok(id)
    }
}
