use regex::Captures;
use tracing::debug;

use super::{Intent, IntentRegistry};
use crate::{HandlerError, Utterance};

/// Positional arguments captured by a pattern, one slot per capture group.
///
/// A group that took no part in the match is `None`; a group that matched
/// nothing is `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args(Vec<Option<String>>);

impl Args {
    #[must_use]
    pub const fn new(slots: Vec<Option<String>>) -> Self {
        Self(slots)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(Option::as_deref)
    }

    pub fn required(&self, index: usize) -> Result<&str, HandlerError> {
        self.get(index)
            .ok_or(HandlerError::MissingArgument { index })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.0.iter().map(Option::as_deref)
    }

    fn from_captures(captures: &Captures<'_>, utterance: &Utterance) -> Self {
        Self(
            captures
                .iter()
                .skip(1)
                .map(|group| group.map(|m| utterance.original_span(m.range()).to_string()))
                .collect(),
        )
    }
}

/// The winning intent for an utterance and the arguments it captured.
#[derive(Debug)]
pub struct MatchResult<'r> {
    /// Position of the intent in the registry.
    pub index: usize,
    pub intent: &'r Intent,
    pub args: Args,
}

impl IntentRegistry {
    /// First intent, in registry order, whose pattern occurs anywhere in the
    /// normalized utterance. Later intents are never consulted.
    #[must_use]
    pub fn find(&self, utterance: &Utterance) -> Option<MatchResult<'_>> {
        let matched = self.iter().enumerate().find_map(|(index, intent)| {
            let captures = intent.pattern().captures(utterance.normalized())?;
            Some(MatchResult {
                index,
                intent,
                args: Args::from_captures(&captures, utterance),
            })
        });

        match &matched {
            Some(m) => debug!(
                "Matched intent #{} '{}' with args {:?}",
                m.index,
                m.intent.name(),
                m.args
            ),
            None => debug!("No intent matched '{}'", utterance.normalized()),
        }

        matched
    }
}
