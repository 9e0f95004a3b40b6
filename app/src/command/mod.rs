//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use std::sync::Arc;
use std::time::Duration;

use jarvis_config::Config;
use jarvis_core::{IntentRegistry, Interpreter, Services};
use jarvis_providers::{GoogleLookup, NewsApiProvider, OpenWeatherProvider, http_client};
use jarvis_tools::{Browser, InMemoryReminders, SystemClock, SystemInfo};
use tracing::info;

mod ask;
mod info;
mod init;
mod run;
mod version;

pub use ask::{AskInput, AskStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use run::{RunInput, RunStrategy};
pub use version::VersionStrategy;

/// Contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

fn build_services(config: &Config) -> anyhow::Result<Services> {
    let providers = &config.providers;
    let client = http_client(
        Duration::from_secs(providers.http.timeout_secs),
        &providers.http.user_agent,
    )?;
    let browser = Browser::system();

    Ok(Services {
        websites: Arc::new(browser.clone()),
        web: Arc::new(browser.clone()),
        music: Arc::new(browser.clone()),
        news: Arc::new(NewsApiProvider::new(
            client.clone(),
            providers.news.api_key.clone(),
            providers.news.country.clone(),
            providers.news.default_category.clone(),
        )),
        weather: Arc::new(OpenWeatherProvider::new(
            client.clone(),
            providers.weather.api_key.clone(),
            providers.weather.units.clone(),
        )),
        lookup: Arc::new(GoogleLookup::new(
            client,
            providers.search.api_key.clone(),
            providers.search.engine_id.clone(),
            browser,
        )),
        system: Arc::new(SystemInfo),
        reminders: Arc::new(InMemoryReminders::new()),
        clock: Arc::new(SystemClock),
    })
}

fn build_interpreter(config: &Config) -> anyhow::Result<Interpreter> {
    let registry = IntentRegistry::standard()?;
    info!("Registered {} intents", registry.len());
    Ok(Interpreter::new(registry, build_services(config)?))
}
