//! Process configuration from the environment.
//!
//! Credentials come from environment variables, with a `.env` file
//! honoured for development. Nothing here is persisted or cached.

use anyhow::Context;
use fsw_alert::smtp::{SmtpConfig, DEFAULT_SMTP_PORT};
use std::env;

pub struct Config {
    pub fred_api_key: String,
    pub smtp: SmtpConfig,
}

/// Everything the panel needs: provider credential plus mail account.
pub fn load() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();
    Ok(Config {
        fred_api_key: load_fred()?,
        smtp: load_smtp()?,
    })
}

pub fn load_fred() -> anyhow::Result<String> {
    dotenv::dotenv().ok();
    env::var("FRED_API_KEY").context("FRED_API_KEY is not set")
}

pub fn load_smtp() -> anyhow::Result<SmtpConfig> {
    dotenv::dotenv().ok();
    let port = match env::var("SMTP_PORT") {
        Ok(raw) => raw
            .parse::<u16>()
            .with_context(|| format!("SMTP_PORT is not a valid port number: {}", raw))?,
        Err(_) => DEFAULT_SMTP_PORT,
    };
    Ok(SmtpConfig {
        server: env::var("SMTP_SERVER").context("SMTP_SERVER is not set")?,
        port,
        sender: env::var("SENDER_EMAIL").context("SENDER_EMAIL is not set")?,
        password: env::var("SENDER_PASSWORD").context("SENDER_PASSWORD is not set")?,
        recipient: env::var("RECIPIENT_EMAIL").context("RECIPIENT_EMAIL is not set")?,
    })
}
