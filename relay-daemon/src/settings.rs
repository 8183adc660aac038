//! Environment-based daemon settings

use anyhow::{Context, Result};
use std::time::Duration;

/// Runtime settings read from the process environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Worlds API bearer token (required)
    pub api_key: String,

    /// Worlds API base URL
    pub api_base: String,

    /// Radio resolver base URL
    pub radio_base: String,

    /// Station stream URL handed to entries the resolver cannot place
    pub stream_url: String,

    /// Delay between poll cycle completions
    pub poll_interval: Duration,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("HR_API_KEY")
            .context("HR_API_KEY is not set; the relay cannot reach world storage without it")?;

        let poll_interval = match std::env::var("POLL_INTERVAL_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .context("POLL_INTERVAL_SECS must be a whole number of seconds")?,
            ),
            Err(_) => Duration::from_secs(3),
        };

        Ok(Self {
            api_key,
            api_base: env_or("HR_API_BASE", provider_highrise::DEFAULT_API_BASE),
            radio_base: env_or("RADIO_BASE_URL", "http://127.0.0.1:5000"),
            stream_url: env_or("RADIO_STREAM_URL", "http://127.0.0.1:8000/radio"),
            poll_interval,
        })
    }
}
