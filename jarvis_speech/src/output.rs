use std::io::{Stdout, Write};
use std::sync::{Mutex, PoisonError};

use anyhow::anyhow;
use async_trait::async_trait;
use jarvis_core::SpeechOutput;
use jarvis_tools::command_runner::{CommandSpec, build_command};
use tracing::{debug, warn};

/// Prints what the assistant says and optionally reads it aloud through an
/// external text-to-speech program such as `say` or `espeak`.
pub struct ConsoleOutput<W = Stdout> {
    name: String,
    writer: Mutex<W>,
    tts: Option<CommandSpec>,
}

impl ConsoleOutput<Stdout> {
    #[must_use]
    pub fn stdout(name: impl Into<String>) -> Self {
        Self::new(name, std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleOutput<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(writer),
            tts: None,
        }
    }

    /// The spoken text is appended as the last argument.
    #[must_use]
    pub fn with_tts(mut self, tts: Option<CommandSpec>) -> Self {
        self.tts = tts;
        self
    }

    pub fn into_writer(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn print(&self, line: &str) -> anyhow::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow!("console writer is poisoned"))?;
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl<W: Write + Send> SpeechOutput for ConsoleOutput<W> {
    async fn speak(&self, text: &str) -> anyhow::Result<()> {
        debug!("{}: {text}", self.name);
        self.print(&format!("{}: {text}", self.name))?;

        if let Some(tts) = &self.tts {
            read_aloud(tts, text).await;
        }
        Ok(())
    }

    fn action(&self, text: &str) {
        if let Err(e) = self.print(&format!("[Action] {text}")) {
            warn!("Failed to print action: {e}");
        }
    }
}

async fn read_aloud(tts: &CommandSpec, text: &str) {
    let spec = tts.clone().arg(text);

    match build_command(&spec).status().await {
        Ok(status) if status.success() => {}
        Ok(status) => warn!("{} exited with {status}", spec.program),
        Err(e) => warn!("Failed to run {}: {e}", spec.program),
    }
}
