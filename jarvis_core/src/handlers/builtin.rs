use async_trait::async_trait;
use tracing::{info, warn};

use super::{Arity, Handler};
use crate::{Args, HandlerError, Interpreter, Response, Utterance};

pub const HELP_TEXT: &str = concat!(
    "Here are some commands you can use: ",
    "Open websites like 'open YouTube'. ",
    "Search the web with 'search for cats'. ",
    "Play music with 'play music by Taylor Swift'. ",
    "Get news updates with 'tell me the news'. ",
    "Check the weather with 'what's the weather in New York'. ",
    "Ask about something with 'tell me about Mars'. ",
    "Ask for the time with 'what time is it'. ",
    "Set reminders with 'set reminder to call mom'. ",
    "Get system information with 'system info'. ",
    "Exit by saying 'exit' or 'goodbye'."
);

const DEFAULT_CITY: &str = "your current location";
const MAX_HEADLINES: usize = 3;

/// Treats an optional capture that is present but blank as absent.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub struct OpenWebsiteHandler;

#[async_trait]
impl Handler for OpenWebsiteHandler {
    fn arity(&self) -> Arity {
        Arity::required(1)
    }

    async fn handle(&self, args: Args, cx: &Interpreter) -> Result<Response, HandlerError> {
        let site = args.required(0)?;
        let text = match cx.services().websites.open(site).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Website opener failed for {site}: {e}");
                format!("Failed to open {site}. Error: {e}")
            }
        };
        Ok(Response::speech(text))
    }
}

pub struct SearchHandler;

#[async_trait]
impl Handler for SearchHandler {
    fn arity(&self) -> Arity {
        Arity::optional(1)
    }

    async fn handle(&self, args: Args, cx: &Interpreter) -> Result<Response, HandlerError> {
        let Some(query) = non_blank(args.get(0)) else {
            return Ok(Response::speech("What would you like me to search for?"));
        };

        match cx.services().web.search(query).await {
            Ok(confirmation) => {
                info!("{confirmation}");
                Ok(Response::speech(format!("I've searched for {query}")))
            }
            Err(e) => {
                warn!("Web search failed for {query}: {e}");
                Ok(Response::speech(format!(
                    "Failed to search Google. Error: {e}"
                )))
            }
        }
    }
}

pub struct MusicHandler;

#[async_trait]
impl Handler for MusicHandler {
    fn arity(&self) -> Arity {
        Arity::new(1, 1)
    }

    async fn handle(&self, args: Args, cx: &Interpreter) -> Result<Response, HandlerError> {
        let kind = args.required(0)?;
        let artist = non_blank(args.get(1));
        let text = match cx.services().music.play(kind, artist).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Music player failed: {e}");
                format!("Failed to play music. Error: {e}")
            }
        };
        Ok(Response::speech(text))
    }
}

pub struct NewsHandler;

#[async_trait]
impl Handler for NewsHandler {
    fn arity(&self) -> Arity {
        Arity::optional(1)
    }

    async fn handle(&self, args: Args, cx: &Interpreter) -> Result<Response, HandlerError> {
        let category = non_blank(args.get(0));
        let headlines = match cx.services().news.fetch(category).await {
            Ok(headlines) => headlines.unwrap_or_default(),
            Err(e) => {
                warn!("News provider failed: {e}");
                Vec::new()
            }
        };

        if headlines.is_empty() {
            return Ok(Response::speech(
                "Sorry, I couldn't fetch any news at the moment.",
            ));
        }

        let mut text = String::from("Here are the latest headlines: ");
        for (i, headline) in headlines.iter().take(MAX_HEADLINES).enumerate() {
            text.push_str(&format!("{}. {}. ", i + 1, headline.title));
        }
        Ok(Response::speech(text))
    }
}

/// Shared by every weather phrasing. The default city is applied here, never
/// by the matcher.
pub struct WeatherHandler;

#[async_trait]
impl Handler for WeatherHandler {
    fn arity(&self) -> Arity {
        Arity::optional(1)
    }

    async fn handle(&self, args: Args, cx: &Interpreter) -> Result<Response, HandlerError> {
        let city = non_blank(args.get(0)).unwrap_or(DEFAULT_CITY);
        let report = match cx.services().weather.fetch(city).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Weather provider failed for {city}: {e}");
                None
            }
        };

        let text = report.map_or_else(
            || format!("Sorry, I couldn't fetch weather data for {city}."),
            |report| {
                format!(
                    "The weather in {city} is {} with a temperature of {}{}.",
                    report.description,
                    report.temperature,
                    report.unit.symbol()
                )
            },
        );
        Ok(Response::speech(text))
    }
}

pub struct TimeHandler;

#[async_trait]
impl Handler for TimeHandler {
    fn arity(&self) -> Arity {
        Arity::NONE
    }

    async fn handle(&self, _args: Args, cx: &Interpreter) -> Result<Response, HandlerError> {
        let now = cx.services().clock.now();
        Ok(Response::speech(format!(
            "The current time is {}",
            now.format("%I:%M %p")
        )))
    }
}

pub struct DateHandler;

#[async_trait]
impl Handler for DateHandler {
    fn arity(&self) -> Arity {
        Arity::NONE
    }

    async fn handle(&self, _args: Args, cx: &Interpreter) -> Result<Response, HandlerError> {
        let now = cx.services().clock.now();
        Ok(Response::speech(format!(
            "Today is {}",
            now.format("%A, %B %d, %Y")
        )))
    }
}

pub struct SystemInfoHandler;

#[async_trait]
impl Handler for SystemInfoHandler {
    fn arity(&self) -> Arity {
        Arity::NONE
    }

    async fn handle(&self, _args: Args, cx: &Interpreter) -> Result<Response, HandlerError> {
        let text = match cx.services().system.snapshot().await {
            Ok(text) => text,
            Err(e) => {
                warn!("System info provider failed: {e}");
                format!("Sorry, I couldn't read the system information. Error: {e}")
            }
        };
        Ok(Response::speech(text))
    }
}

pub struct ReminderHandler;

#[async_trait]
impl Handler for ReminderHandler {
    fn arity(&self) -> Arity {
        Arity::optional(1)
    }

    async fn handle(&self, args: Args, cx: &Interpreter) -> Result<Response, HandlerError> {
        let Some(text) = non_blank(args.get(0)) else {
            return Ok(Response::speech(
                "What would you like me to remind you about?",
            ));
        };

        let confirmation = match cx.services().reminders.create(text).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                warn!("Reminder service failed: {e}");
                format!("Sorry, I couldn't set that reminder. Error: {e}")
            }
        };
        Ok(Response::speech(confirmation))
    }
}

pub struct HelpHandler;

#[async_trait]
impl Handler for HelpHandler {
    fn arity(&self) -> Arity {
        Arity::NONE
    }

    async fn handle(&self, _args: Args, _cx: &Interpreter) -> Result<Response, HandlerError> {
        Ok(Response::speech(HELP_TEXT))
    }
}

/// "tell me about X": interprets X as if it had been said on its own.
pub struct TellAboutHandler;

#[async_trait]
impl Handler for TellAboutHandler {
    fn arity(&self) -> Arity {
        Arity::required(1)
    }

    async fn handle(&self, args: Args, cx: &Interpreter) -> Result<Response, HandlerError> {
        let subject = Utterance::new(args.required(0)?);
        cx.interpret(&subject).await
    }
}
