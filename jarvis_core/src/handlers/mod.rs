//! Handler contract and the built-in command set.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{Args, HandlerError, IntentRegistry, Interpreter, RegistryError, Response};

mod builtin;

pub use builtin::{
    DateHandler, HELP_TEXT, HelpHandler, MusicHandler, NewsHandler, OpenWebsiteHandler,
    ReminderHandler, SearchHandler, SystemInfoHandler, TellAboutHandler, TimeHandler,
    WeatherHandler,
};

/// How many positional arguments a handler takes. Optional arguments always
/// trail the required ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub required: usize,
    pub optional: usize,
}

impl Arity {
    pub const NONE: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(required: usize, optional: usize) -> Self {
        Self { required, optional }
    }

    #[must_use]
    pub const fn required(count: usize) -> Self {
        Self::new(count, 0)
    }

    #[must_use]
    pub const fn optional(count: usize) -> Self {
        Self::new(0, count)
    }

    #[must_use]
    pub const fn total(self) -> usize {
        self.required + self.optional
    }
}

/// A capability an intent routes to.
///
/// The handler receives exactly `arity().total()` argument slots and the
/// interpreter that dispatched it, which gives access to collaborators and
/// allows re-interpreting a sub-phrase.
#[async_trait]
pub trait Handler: Send + Sync {
    fn arity(&self) -> Arity;

    async fn handle(&self, args: Args, cx: &Interpreter) -> Result<Response, HandlerError>;
}

pub const OPEN_WEBSITE: &str = r"open\s+(youtube|google|linkedin|gmail|github)";
pub const SEARCH_WEB: &str = r"search\s+(?:for\s+)?(.+?)(?:\s+on\s+google)?$";
pub const PLAY_MUSIC: &str = r"play\s+(music|song)(?:\s+by\s+(.+))?";
pub const TELL_NEWS: &str = r"tell\s+me\s+(?:about\s+)?the\s+news(?:\s+about\s+(.+))?";
pub const WEATHER_QUESTION: &str =
    r"what(?:'s|\s+is)?\s+(?:the\s+)?weather(?:\s+like)?(?:\s+(?:in|at|for)\s+(.+))?";
pub const WEATHER_REPORT: &str =
    r"weather(?:\s+(?:report|forecast|update))?(?:\s+(?:in|at|for)\s+(.+))?";
pub const CURRENT_WEATHER: &str = r"(?:current|today's)\s+weather(?:\s+(?:in|at|for)\s+(.+))?";
pub const TELL_TIME: &str = concat!(
    r"what(?:'s|\s+is)?\s+(?:the\s+)?time(?:\s+(?:now|right now|currently))?",
    r"|tell\s+(?:me\s+)?(?:the\s+)?time",
    r"|(?:current|present)\s+time",
    r"|time\s+(?:now|please|right now)",
);
pub const TELL_DATE: &str =
    r"what(?:'s|\s+is)?\s+(?:the\s+date|today'?s\s+date)|today'?s\s+date";
pub const SYSTEM_INFO: &str = r"system\s+info(?:rmation)?";
pub const SET_REMINDER: &str = r"set\s+(?:a\s+)?reminder(?:\s+to\s+(.+))?";
pub const HELP: &str = r"help";
pub const TELL_ABOUT: &str = r"tell\s+me\s+(?:about\s+)?(.+)";

/// Built-in intents in precedence order.
///
/// `set_reminder` comes first so the reminder text may itself name another
/// command ("set a reminder to check the weather").
/// The three weather patterns and every fixed-phrase command sit ahead of the
/// `tell me about` catch-all, so "tell me about the weather" reports the weather
/// and "tell me the time" tells the time.
pub fn standard_registry() -> Result<IntentRegistry, RegistryError> {
    let weather: Arc<dyn Handler> = Arc::new(WeatherHandler);

    IntentRegistry::builder()
        .intent("set_reminder", SET_REMINDER, ReminderHandler)
        .intent("open_website", OPEN_WEBSITE, OpenWebsiteHandler)
        .intent("search_web", SEARCH_WEB, SearchHandler)
        .intent("play_music", PLAY_MUSIC, MusicHandler)
        .intent("tell_news", TELL_NEWS, NewsHandler)
        .shared_intent("weather_question", WEATHER_QUESTION, Arc::clone(&weather))
        .shared_intent("weather_report", WEATHER_REPORT, Arc::clone(&weather))
        .shared_intent("current_weather", CURRENT_WEATHER, weather)
        .intent("tell_time", TELL_TIME, TimeHandler)
        .intent("tell_date", TELL_DATE, DateHandler)
        .intent("system_info", SYSTEM_INFO, SystemInfoHandler)
        .intent("help", HELP, HelpHandler)
        .intent("tell_about", TELL_ABOUT, TellAboutHandler)
        .build()
}
