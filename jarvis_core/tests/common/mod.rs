//! Recording fakes for every collaborator the interpreter and session loop use.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone};
use jarvis_core::{
    CaptureError, Clock, Headline, InformationLookup, Interpreter, IntentRegistry, MusicPlayer,
    NewsProvider, ReminderService, Services, SpeechCapture, SpeechOutput, SystemInfoProvider,
    WeatherProvider, WeatherReport, WebSearcher, WebsiteOpener,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open(String),
    Search(String),
    Play(String, Option<String>),
    News(Option<String>),
    Weather(String),
    Lookup(String),
    Snapshot,
    Remind(String),
}

/// One object standing in for every non-speech collaborator.
pub struct Fakes {
    calls: Mutex<Vec<Call>>,
    pub lookup_answer: Mutex<Option<String>>,
    pub headlines: Mutex<Option<Vec<Headline>>>,
    pub weather: Mutex<Option<WeatherReport>>,
    pub fail_websites: Mutex<bool>,
}

impl Fakes {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            lookup_answer: Mutex::new(None),
            headlines: Mutex::new(None),
            weather: Mutex::new(None),
            fail_websites: Mutex::new(false),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: Call) {
        lock(&self.calls).push(call);
    }

    pub fn services(self: &Arc<Self>) -> Services {
        Services {
            websites: self.clone(),
            web: self.clone(),
            music: self.clone(),
            news: self.clone(),
            weather: self.clone(),
            lookup: self.clone(),
            system: self.clone(),
            reminders: self.clone(),
            clock: self.clone(),
        }
    }

    pub fn interpreter(self: &Arc<Self>) -> Interpreter {
        let registry = match IntentRegistry::standard() {
            Ok(registry) => registry,
            Err(e) => panic!("standard registry failed to build: {e}"),
        };
        Interpreter::new(registry, self.services())
    }
}

#[async_trait]
impl WebsiteOpener for Fakes {
    async fn open(&self, site: &str) -> anyhow::Result<String> {
        self.record(Call::Open(site.to_string()));
        if *lock(&self.fail_websites) {
            anyhow::bail!("no browser");
        }
        Ok(format!("Opening {site}"))
    }
}

#[async_trait]
impl WebSearcher for Fakes {
    async fn search(&self, query: &str) -> anyhow::Result<String> {
        self.record(Call::Search(query.to_string()));
        Ok(format!("Searching Google for {query}"))
    }
}

#[async_trait]
impl MusicPlayer for Fakes {
    async fn play(&self, kind: &str, artist: Option<&str>) -> anyhow::Result<String> {
        self.record(Call::Play(kind.to_string(), artist.map(str::to_string)));
        Ok(artist.map_or_else(
            || format!("Playing {kind}"),
            |artist| format!("Playing {kind} by {artist}"),
        ))
    }
}

#[async_trait]
impl NewsProvider for Fakes {
    async fn fetch(&self, category: Option<&str>) -> anyhow::Result<Option<Vec<Headline>>> {
        self.record(Call::News(category.map(str::to_string)));
        Ok(lock(&self.headlines).clone())
    }
}

#[async_trait]
impl WeatherProvider for Fakes {
    async fn fetch(&self, city: &str) -> anyhow::Result<Option<WeatherReport>> {
        self.record(Call::Weather(city.to_string()));
        Ok(lock(&self.weather).clone())
    }
}

#[async_trait]
impl InformationLookup for Fakes {
    async fn search(&self, query: &str) -> anyhow::Result<Option<String>> {
        self.record(Call::Lookup(query.to_string()));
        Ok(lock(&self.lookup_answer).clone())
    }
}

#[async_trait]
impl SystemInfoProvider for Fakes {
    async fn snapshot(&self) -> anyhow::Result<String> {
        self.record(Call::Snapshot);
        Ok("You're running TestOS.".to_string())
    }
}

#[async_trait]
impl ReminderService for Fakes {
    async fn create(&self, text: &str) -> anyhow::Result<String> {
        self.record(Call::Remind(text.to_string()));
        Ok(format!("I've set a reminder: {text}"))
    }
}

impl Clock for Fakes {
    fn now(&self) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(0).unwrap_or_else(|| panic!("zero offset"));
        offset
            .with_ymd_and_hms(2024, 3, 5, 14, 7, 0)
            .single()
            .unwrap_or_else(|| panic!("fixed test time"))
    }
}

/// Replays scripted capture results, then reports the input as closed.
pub struct ScriptedCapture {
    script: Mutex<VecDeque<Result<Option<String>, CaptureError>>>,
    listens: Mutex<usize>,
}

impl ScriptedCapture {
    pub fn new(script: Vec<Result<Option<String>, CaptureError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            listens: Mutex::new(0),
        })
    }

    pub fn lines(lines: &[&str]) -> Arc<Self> {
        Self::new(lines.iter().map(|l| Ok(Some((*l).to_string()))).collect())
    }

    pub fn listens(&self) -> usize {
        *lock(&self.listens)
    }
}

#[async_trait]
impl SpeechCapture for ScriptedCapture {
    async fn listen(&self) -> Result<Option<String>, CaptureError> {
        *lock(&self.listens) += 1;
        lock(&self.script)
            .pop_front()
            .unwrap_or(Err(CaptureError::Closed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Said {
    Spoken(String),
    Action(String),
}

/// Records everything spoken and every action line.
#[derive(Default)]
pub struct RecordingOutput {
    log: Mutex<Vec<Said>>,
    pub fail_on: Mutex<Option<String>>,
}

impl RecordingOutput {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn log(&self) -> Vec<Said> {
        lock(&self.log).clone()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.log()
            .into_iter()
            .filter_map(|said| match said {
                Said::Spoken(text) => Some(text),
                Said::Action(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl SpeechOutput for RecordingOutput {
    async fn speak(&self, text: &str) -> anyhow::Result<()> {
        if lock(&self.fail_on)
            .as_deref()
            .is_some_and(|needle| text.contains(needle))
        {
            anyhow::bail!("speaker unplugged");
        }
        lock(&self.log).push(Said::Spoken(text.to_string()));
        Ok(())
    }

    fn action(&self, text: &str) {
        lock(&self.log).push(Said::Action(text.to_string()));
    }
}
