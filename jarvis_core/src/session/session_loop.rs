use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::Interrupt;
use crate::{CaptureError, Interpreter, SpeechCapture, SpeechOutput, Utterance};

/// Any of these anywhere in the normalized utterance ends the session,
/// before the registry is consulted.
pub const TERMINATION_PHRASES: [&str; 4] = ["exit", "stop", "goodbye", "bye"];

const NOT_CAUGHT: &str = "I didn't catch that. Could you repeat?";
const APOLOGY: &str = "Sorry I didn't catch that. Could you repeat?";
const RECOGNITION_UNAVAILABLE: &str =
    "Sorry, my speech recognition service is currently unavailable.";
pub const FAREWELL: &str = "Shutting down. Goodbye!";
const INTERRUPTED: &str = "Interrupted. Shutting down.";

#[must_use]
pub fn is_termination(utterance: &Utterance) -> bool {
    TERMINATION_PHRASES
        .iter()
        .any(|phrase| utterance.normalized().contains(phrase))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Listening,
    Interpreting,
    Responding,
    Terminating,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Listening => "listening",
            Self::Interpreting => "interpreting",
            Self::Responding => "responding",
            Self::Terminating => "terminating",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The user said one of the [`TERMINATION_PHRASES`].
    TerminationIntent,
    Interrupted,
    /// The capture source has no more input.
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Utterances that reached interpretation.
    pub turns: usize,
    /// Turns that ended in the apology instead of a response.
    pub failures: usize,
    pub exit: ExitReason,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub assistant_name: String,
    /// Pause after a failed turn before listening again.
    pub error_cooldown: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            assistant_name: "Jarvis".to_string(),
            error_cooldown: Duration::from_secs(1),
        }
    }
}

pub struct SessionLoop<C, O>
where
    C: SpeechCapture,
    O: SpeechOutput,
{
    interpreter: Interpreter,
    capture: C,
    output: O,
    config: SessionConfig,
}

impl<C, O> SessionLoop<C, O>
where
    C: SpeechCapture,
    O: SpeechOutput,
{
    pub const fn new(interpreter: Interpreter, capture: C, output: O, config: SessionConfig) -> Self {
        Self {
            interpreter,
            capture,
            output,
            config,
        }
    }

    /// Runs until a termination phrase, an interrupt, or the end of input.
    ///
    /// Nothing said or failed inside a turn stops the loop: handler errors and
    /// speech output errors are logged, apologised for, and followed by the
    /// configured cooldown.
    pub async fn run(&self, interrupt: &Interrupt) -> SessionSummary {
        let name = &self.config.assistant_name;
        info!("Session started");
        self.say(&format!("{name} initialized and ready to assist you."))
            .await;

        let mut turns = 0;
        let mut failures = 0;

        let exit = loop {
            if interrupt.is_triggered() {
                break self.stop(ExitReason::Interrupted, INTERRUPTED).await;
            }

            enter(SessionState::Listening);
            self.output.action("Listening...");

            let heard = tokio::select! {
                biased;
                () = interrupt.triggered() => None,
                heard = self.capture.listen() => Some(heard),
            };

            let Some(heard) = heard else {
                break self.stop(ExitReason::Interrupted, INTERRUPTED).await;
            };

            let text = match heard {
                Ok(Some(text)) => text,
                Ok(None) => {
                    self.say(NOT_CAUGHT).await;
                    continue;
                }
                Err(CaptureError::Closed) => {
                    info!("Speech capture closed");
                    break self.stop(ExitReason::InputClosed, INTERRUPTED).await;
                }
                Err(CaptureError::Unavailable(e)) => {
                    warn!("Speech recognition unavailable: {e}");
                    self.say(RECOGNITION_UNAVAILABLE).await;
                    self.cool_down().await;
                    continue;
                }
            };

            let utterance = Utterance::new(text);
            if is_termination(&utterance) {
                break self.stop(ExitReason::TerminationIntent, FAREWELL).await;
            }

            turns += 1;
            if let Err(e) = self.turn(&utterance).await {
                failures += 1;
                warn!("Turn failed for '{}': {e}", utterance.raw());
                self.say(APOLOGY).await;
                self.cool_down().await;
            }
        };

        self.say(&format!("{name} has been terminated.")).await;
        info!("Session ended after {turns} turns ({failures} failed): {exit:?}");

        SessionSummary {
            turns,
            failures,
            exit,
        }
    }

    async fn turn(&self, utterance: &Utterance) -> anyhow::Result<()> {
        enter(SessionState::Interpreting);
        self.output
            .action(&format!("Processing: {}", utterance.raw()));
        let response = self.interpreter.interpret(utterance).await?;

        enter(SessionState::Responding);
        match response.text() {
            Some(text) => self.output.speak(text).await?,
            None => debug!("Silent response"),
        }
        Ok(())
    }

    async fn stop(&self, reason: ExitReason, message: &str) -> ExitReason {
        enter(SessionState::Terminating);
        self.say(message).await;
        reason
    }

    /// Speaks loop-level text. A failure here has nowhere else to go.
    async fn say(&self, text: &str) {
        if let Err(e) = self.output.speak(text).await {
            warn!("Speech output failed: {e}");
        }
    }

    async fn cool_down(&self) {
        if !self.config.error_cooldown.is_zero() {
            tokio::time::sleep(self.config.error_cooldown).await;
        }
    }
}

fn enter(state: SessionState) {
    debug!("Session state: {state}");
}
