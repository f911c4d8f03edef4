//! Transactional email through the Brevo SMTP API.

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub const BREVO_BASE_URL: &str = "https://api.brevo.com";
const SENDER_NAME: &str = "JobOs AI";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("BREVO_API_KEY is not set")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Email API returned status {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Serialize)]
struct Contact<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailPayload<'a> {
    sender: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

#[derive(Clone)]
pub struct EmailNotifier {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    sender: String,
}

impl EmailNotifier {
    pub fn new(base_url: &str, api_key: Option<String>, sender: &str) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            sender: sender.to_string(),
        })
    }

    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), NotifyError> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("Email to {to} not sent: BREVO_API_KEY is not set");
            return Err(NotifyError::MissingApiKey);
        };

        let payload = EmailPayload {
            sender: Contact {
                name: Some(SENDER_NAME),
                email: &self.sender,
            },
            to: vec![Contact {
                name: None,
                email: to,
            }],
            subject,
            html_content: html,
        };

        let response = self
            .client
            .post(format!("{}/v3/smtp/email", self.base_url))
            .header("api-key", api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 201 {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status { status, body });
        }

        info!("Email sent to {to}: {subject}");
        Ok(())
    }
}
