//! HTTP-backed collaborators: headlines, current weather and web lookups.

use std::time::Duration;

use anyhow::{Context, Result};
use jarvis_config::Config;
use reqwest::Client;

mod news;
mod search;
mod weather;

pub use news::NewsApiProvider;
pub use search::GoogleLookup;
pub use weather::OpenWeatherProvider;

/// Shared HTTP client for every provider. Requests are never retried.
pub fn http_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .context("Failed to create HTTP client")
}

fn require_key(name: &str, key: &str) -> Result<()> {
    if !Config::is_configured(key) {
        anyhow::bail!("{name} API key is not configured");
    }
    Ok(())
}
