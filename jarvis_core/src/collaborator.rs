//! Contracts for everything the interpreter talks to but does not own.
//!
//! Every call is awaited in sequence by the session loop, so implementations
//! may block for as long as their backing service needs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use tracing::info;

use crate::CaptureError;

#[async_trait]
pub trait SpeechCapture: Send + Sync {
    /// Wait for the next utterance. `Ok(None)` means nothing intelligible was heard.
    async fn listen(&self) -> Result<Option<String>, CaptureError>;
}

#[async_trait]
pub trait SpeechOutput: Send + Sync {
    async fn speak(&self, text: &str) -> anyhow::Result<()>;

    /// Status line shown to the user but never spoken.
    fn action(&self, text: &str) {
        info!("[Action] {text}");
    }
}

#[async_trait]
pub trait WebsiteOpener: Send + Sync {
    async fn open(&self, site: &str) -> anyhow::Result<String>;
}

#[async_trait]
pub trait WebSearcher: Send + Sync {
    async fn search(&self, query: &str) -> anyhow::Result<String>;
}

#[async_trait]
pub trait MusicPlayer: Send + Sync {
    async fn play(&self, kind: &str, artist: Option<&str>) -> anyhow::Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub title: String,
}

#[async_trait]
pub trait NewsProvider: Send + Sync {
    async fn fetch(&self, category: Option<&str>) -> anyhow::Result<Option<Vec<Headline>>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    /// Suffix written straight after the number.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Kelvin => " K",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// In `unit`.
    pub temperature: f64,
    pub unit: TemperatureUnit,
    pub description: String,
    pub humidity: f64,
    pub wind_speed: f64,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, city: &str) -> anyhow::Result<Option<WeatherReport>>;
}

#[async_trait]
pub trait InformationLookup: Send + Sync {
    async fn search(&self, query: &str) -> anyhow::Result<Option<String>>;
}

#[async_trait]
pub trait SystemInfoProvider: Send + Sync {
    async fn snapshot(&self) -> anyhow::Result<String>;
}

#[async_trait]
pub trait ReminderService: Send + Sync {
    async fn create(&self, text: &str) -> anyhow::Result<String>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

#[async_trait]
impl<T: SpeechCapture + ?Sized> SpeechCapture for Arc<T> {
    async fn listen(&self) -> Result<Option<String>, CaptureError> {
        (**self).listen().await
    }
}

#[async_trait]
impl<T: SpeechOutput + ?Sized> SpeechOutput for Arc<T> {
    async fn speak(&self, text: &str) -> anyhow::Result<()> {
        (**self).speak(text).await
    }

    fn action(&self, text: &str) {
        (**self).action(text);
    }
}

/// The collaborators handlers can reach during dispatch.
#[derive(Clone)]
pub struct Services {
    pub websites: Arc<dyn WebsiteOpener>,
    pub web: Arc<dyn WebSearcher>,
    pub music: Arc<dyn MusicPlayer>,
    pub news: Arc<dyn NewsProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub lookup: Arc<dyn InformationLookup>,
    pub system: Arc<dyn SystemInfoProvider>,
    pub reminders: Arc<dyn ReminderService>,
    pub clock: Arc<dyn Clock>,
}
