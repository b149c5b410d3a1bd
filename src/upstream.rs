use anyhow::Context;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use lambda_runtime::tracing;
use reqwest::{header::USER_AGENT, Client as HttpClient};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{card::CardEmail, config::Config, error::SendCardError, template};

const AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize, Debug, PartialEq)]
pub struct ResendEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Attachment {
    pub filename: String,
    pub content: String,
}

impl ResendEmail {
    pub fn new(from: &str, card: &CardEmail, image: &[u8]) -> Self {
        Self {
            from: from.to_owned(),
            to: vec![card.to.clone()],
            subject: card.subject(),
            html: template::render(card),
            attachments: vec![Attachment {
                filename: card.attachment_filename(),
                content: BASE64.encode(image),
            }],
        }
    }
}

/// The two outbound calls a card email needs.
pub trait Upstream {
    /// Downloads the card image, failing with `ImageFetch` on a non-2xx reply.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, SendCardError>;

    /// Submits the email and returns the provider's JSON reply.
    async fn send_email(
        &self,
        config: &Config,
        email: &ResendEmail,
    ) -> Result<Value, SendCardError>;
}

pub struct HttpUpstream {
    http: HttpClient,
}

impl HttpUpstream {
    pub fn new() -> Self {
        Self {
            http: HttpClient::new(),
        }
    }
}

impl Upstream for HttpUpstream {
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, SendCardError> {
        let resp = self
            .http
            .get(url)
            .header(USER_AGENT, AGENT)
            .send()
            .await
            .context("image request failed")?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SendCardError::ImageFetch {
                status,
                url: url.to_owned(),
            });
        }

        let image = resp.bytes().await.context("image body unreadable")?;
        tracing::info!("fetched card image :: {} bytes", image.len());
        Ok(image.to_vec())
    }

    async fn send_email(
        &self,
        config: &Config,
        email: &ResendEmail,
    ) -> Result<Value, SendCardError> {
        let resp = self
            .http
            .post(config.emails_endpoint())
            .header(USER_AGENT, AGENT)
            .bearer_auth(&config.api_key)
            .json(email)
            .send()
            .await
            .context("resend request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::error!("resend error :: {} :: {}", status, detail);
            return Err(SendCardError::Provider { status, detail });
        }

        Ok(resp.json().await.unwrap_or_else(|_| json!({})))
    }
}
