use anyhow::Result;
use clap::Parser;

use job_digest::config::DigestConfig;
use job_digest::digest_cli::{handle_digest_command, DigestCli};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging first
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = DigestCli::parse();

    // Both are required before anything touches the network or the store;
    // a missing variable is a non-zero exit.
    let config = DigestConfig::from_env()?;

    handle_digest_command(cli, &config).await
}
