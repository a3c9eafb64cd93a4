// src/config.rs
//! Environment-driven configuration for the digest process.

use anyhow::Result;

use crate::email::client::DEFAULT_BASE_URL;

pub const DEFAULT_SITE_BASE_URL: &str = "https://meridianstaffing.com";

#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub database_url: String,
    pub resend_api_key: String,
    pub site_base_url: String,
    pub resend_base_url: String,
}

impl DigestConfig {
    /// Read configuration from the environment. The database connection
    /// string and the email provider key are required; the process must not
    /// start without them.
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable not set"))?;

        let resend_api_key = std::env::var("RESEND_API_KEY")
            .map_err(|_| anyhow::anyhow!("RESEND_API_KEY environment variable not set"))?;

        let site_base_url = std::env::var("SITE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_SITE_BASE_URL.to_string());

        let resend_base_url =
            std::env::var("RESEND_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            database_url,
            resend_api_key,
            site_base_url,
            resend_base_url,
        })
    }
}
