use std::time::Duration;

use jarvis_config::Config;
use jarvis_core::{Interrupt, SessionConfig, SessionLoop};
use jarvis_speech::{ConsoleCapture, ConsoleOutput};
use jarvis_tools::command_runner::CommandSpec;
use tracing::{info, warn};

use super::build_interpreter;

/// Input parameters for the Run command strategy.
#[derive(Debug, Clone)]
pub struct RunInput {
    /// Overrides `speech.tts_command` from the config
    pub tts: Option<String>,
    /// Overrides `assistant.listen_timeout_secs` from the config
    pub timeout: Option<u64>,
}

/// Strategy for the interactive session.
///
/// Reads utterances from the terminal until the user says goodbye, input
/// ends, or Ctrl+C is pressed.
#[derive(Debug, Clone, Copy)]
pub struct RunStrategy;

impl super::CommandStrategy for RunStrategy {
    type Input = RunInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let interpreter = build_interpreter(&config)?;

        let timeout = input
            .timeout
            .or(config.assistant.listen_timeout_secs)
            .map(Duration::from_secs);
        let capture = ConsoleCapture::stdin().with_timeout(timeout);

        let tts = input
            .tts
            .or_else(|| config.speech.tts_command.clone())
            .map(|program| {
                config
                    .speech
                    .tts_args
                    .iter()
                    .fold(CommandSpec::new(program), |spec, arg| spec.arg(arg.as_str()))
            });
        let output = ConsoleOutput::stdout(config.assistant.name.clone()).with_tts(tts);

        let interrupt = Interrupt::new();
        let on_ctrl_c = interrupt.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => on_ctrl_c.trigger(),
                Err(e) => warn!("Cannot listen for Ctrl+C: {e}"),
            }
        });

        let session_config = SessionConfig {
            assistant_name: config.assistant.name.clone(),
            error_cooldown: Duration::from_millis(config.assistant.error_cooldown_ms),
        };
        let summary = SessionLoop::new(interpreter, capture, output, session_config)
            .run(&interrupt)
            .await;

        info!(
            "Session finished: {} turns, {} failed, {:?}",
            summary.turns, summary.failures, summary.exit
        );
        Ok(())
    }
}
