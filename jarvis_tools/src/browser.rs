use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use jarvis_core::{MusicPlayer, WebSearcher, WebsiteOpener};
use tracing::info;
use url::Url;

use crate::command_runner::{build_command, open_command};

/// Site keys the assistant can open by name.
pub const KNOWN_SITES: [(&str, &str); 5] = [
    ("youtube", "https://www.youtube.com"),
    ("google", "https://www.google.com"),
    ("linkedin", "https://www.linkedin.com"),
    ("gmail", "https://mail.google.com"),
    ("github", "https://github.com"),
];

const GOOGLE_SEARCH: &str = "https://www.google.com/search";
const YOUTUBE_MUSIC_SEARCH: &str = "https://music.youtube.com/search";
const LAUNCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens a URL somewhere the user can see it.
#[async_trait]
pub trait Launcher: Send + Sync {
    async fn launch(&self, url: &Url) -> Result<()>;
}

/// Hands URLs to the desktop's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

#[async_trait]
impl Launcher for SystemLauncher {
    async fn launch(&self, url: &Url) -> Result<()> {
        info!("Opening {url}");
        let spec = open_command(url.as_str());
        let status = tokio::time::timeout(LAUNCH_TIMEOUT, build_command(&spec).status())
            .await
            .with_context(|| format!("{} timed out", spec.program))?
            .with_context(|| format!("Failed to run {}", spec.program))?;

        if !status.success() {
            anyhow::bail!("{} exited with {status}", spec.program);
        }
        Ok(())
    }
}

/// Website opener, web searcher and music player, all backed by a browser.
#[derive(Clone)]
pub struct Browser {
    launcher: Arc<dyn Launcher>,
}

impl Browser {
    #[must_use]
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }

    #[must_use]
    pub fn system() -> Self {
        Self::new(Arc::new(SystemLauncher))
    }

    #[must_use]
    pub fn site_url(site: &str) -> Option<&'static str> {
        KNOWN_SITES
            .iter()
            .find(|(key, _)| *key == site)
            .map(|(_, url)| *url)
    }

    pub fn search_url(query: &str) -> Result<Url> {
        Ok(Url::parse_with_params(GOOGLE_SEARCH, &[("q", query)])?)
    }

    /// Opens a Google results page for the query.
    pub async fn open_search(&self, query: &str) -> Result<()> {
        self.launcher.launch(&Self::search_url(query)?).await
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[async_trait]
impl WebsiteOpener for Browser {
    async fn open(&self, site: &str) -> Result<String> {
        let site = site.to_lowercase();
        let Some(address) = Self::site_url(&site) else {
            return Ok(format!("I don't have {site} in my list of websites."));
        };

        self.launcher.launch(&Url::parse(address)?).await?;
        Ok(format!("Opening {}", capitalize(&site)))
    }
}

#[async_trait]
impl WebSearcher for Browser {
    async fn search(&self, query: &str) -> Result<String> {
        self.open_search(query).await?;
        Ok(format!("Searching Google for {query}"))
    }
}

#[async_trait]
impl MusicPlayer for Browser {
    async fn play(&self, kind: &str, artist: Option<&str>) -> Result<String> {
        let query = artist.map_or_else(|| "music".to_string(), |artist| format!("{artist} {kind}"));
        let url = Url::parse_with_params(YOUTUBE_MUSIC_SEARCH, &[("q", query.as_str())])?;
        self.launcher.launch(&url).await?;

        Ok(artist.map_or_else(
            || format!("Playing {kind}"),
            |artist| format!("Playing {kind} by {artist}"),
        ))
    }
}
