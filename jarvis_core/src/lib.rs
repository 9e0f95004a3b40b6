#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Command interpretation and dispatch for the jarvis assistant.
//!
//! A single line of free-form text is matched against an ordered intent
//! registry, dispatched to the first matching handler, or routed through the
//! fallback lookup chain. The session loop drives capture, interpretation and
//! speech output and keeps running across bad input.

use std::ops::Range;

pub mod collaborator;
pub mod error;
pub mod fallback;
pub mod handlers;
pub mod intent;
pub mod interpreter;
pub mod session;

pub use collaborator::{
    Clock, Headline, InformationLookup, MusicPlayer, NewsProvider, ReminderService, Services,
    SpeechCapture, SpeechOutput, SystemInfoProvider, TemperatureUnit, WeatherProvider,
    WeatherReport, WebSearcher, WebsiteOpener,
};
pub use error::{CaptureError, HandlerError, RegistryError};
pub use handlers::{Arity, Handler};
pub use intent::{Args, Intent, IntentRegistry, IntentRegistryBuilder, MatchResult};
pub use interpreter::Interpreter;
pub use session::{
    ExitReason, FAREWELL, Interrupt, SessionConfig, SessionLoop, SessionState, SessionSummary,
    TERMINATION_PHRASES, is_termination,
};

/// A line of user input as captured, plus the lowercased form used for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    raw: String,
    normalized: String,
    aligned: bool,
}

impl Utterance {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = raw.to_lowercase();
        // Byte offsets in `normalized` are valid in `raw` only when every char
        // lowercases to the same encoded width.
        let aligned = raw.len() == normalized.len()
            && raw
                .chars()
                .all(|c| c.to_lowercase().map(char::len_utf8).sum::<usize>() == c.len_utf8());
        Self {
            raw,
            normalized,
            aligned,
        }
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Text covered by a byte range of the normalized form, in the caller's casing
    /// whenever the two forms line up.
    #[must_use]
    pub fn original_span(&self, range: Range<usize>) -> &str {
        if self.aligned {
            if let Some(span) = self.raw.get(range.clone()) {
                return span;
            }
        }
        &self.normalized[range]
    }
}

impl From<&str> for Utterance {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// What the assistant says back for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Speech(String),
    Silence,
}

impl Response {
    pub fn speech(text: impl Into<String>) -> Self {
        Self::Speech(text.into())
    }

    /// Text to speak, or `None` when nothing should reach the speech output.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Speech(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.text().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_keeps_raw_text() {
        let utterance = Utterance::new("Open YouTube");
        assert_eq!(utterance.raw(), "Open YouTube");
        assert_eq!(utterance.normalized(), "open youtube");
        assert_eq!(utterance.original_span(5..12), "YouTube");
    }

    #[test]
    fn misaligned_lowercase_falls_back_to_normalized_span() {
        // 'İ' lowercases to two chars with a wider encoding.
        let utterance = Utterance::new("İstanbul weather");
        assert_ne!(utterance.raw().len(), utterance.normalized().len());
        let start = utterance.normalized().find("weather").unwrap_or_default();
        assert_eq!(
            utterance.original_span(start..start + "weather".len()),
            "weather"
        );
    }

    #[test]
    fn blank_speech_counts_as_silence() {
        assert!(Response::Silence.is_silent());
        assert!(Response::speech("   ").is_silent());
        assert_eq!(Response::speech("Opening Github").text(), Some("Opening Github"));
    }
}
