// src/email/client.rs
//! Transactional email dispatch through a Resend-style HTTP API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::trace;

pub const DEFAULT_BASE_URL: &str = "https://api.resend.com";

/// Fixed sender for every digest email.
pub const FROM_ADDRESS: &str = "Meridian Staffing <jobs@meridianstaffing.com>";

const SEND_ENDPOINT: &str = "/emails";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Outbound message payload, shaped exactly as the provider expects it.
#[derive(Debug, Clone, Serialize)]
pub struct DigestEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Delivery seam for the batch driver. Injected explicitly so tests can
/// substitute a recording mailer.
#[async_trait]
pub trait DigestMailer: Send + Sync {
    async fn send(&self, email: &DigestEmail) -> Result<()>;
}

pub struct EmailClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: Option<String>,
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: String,
}

impl EmailClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }
}

#[async_trait]
impl DigestMailer for EmailClient {
    async fn send(&self, email: &DigestEmail) -> Result<()> {
        let url = format!("{}{}", self.base_url, SEND_ENDPOINT);
        trace!("Dispatching digest email via {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .context("Email provider request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Email provider returned status {}: {}", status, error_text);
        }

        let body: SendResponse = response
            .json()
            .await
            .context("Failed to parse email provider response")?;

        if let Some(error) = body.error {
            anyhow::bail!("Email provider rejected message: {}", error.message);
        }

        trace!(
            message_id = body.id.as_deref().unwrap_or("unknown"),
            "Provider accepted digest email"
        );
        Ok(())
    }
}
