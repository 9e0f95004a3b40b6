use jarvis_config::Config;
use jarvis_core::{FAREWELL, Utterance, is_termination};

use super::build_interpreter;

/// Input parameters for the Ask command strategy.
#[derive(Debug, Clone)]
pub struct AskInput {
    pub message: String,
}

/// Strategy for interpreting one utterance outside a session.
///
/// Prints the response text, nothing for a silent response, and the farewell
/// for a termination phrase.
#[derive(Debug, Clone, Copy)]
pub struct AskStrategy;

impl super::CommandStrategy for AskStrategy {
    type Input = AskInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let utterance = Utterance::new(input.message);
        if is_termination(&utterance) {
            println!("{FAREWELL}");
            return Ok(());
        }

        let config = Config::load_or_default()?;
        let interpreter = build_interpreter(&config)?;
        let response = interpreter.interpret(&utterance).await?;

        if let Some(text) = response.text() {
            println!("{text}");
        }
        Ok(())
    }
}
