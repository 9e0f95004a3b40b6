use std::time::Duration;

use async_trait::async_trait;
use jarvis_core::{CaptureError, SpeechCapture};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::debug;

/// Reads one utterance per line of text.
pub struct ConsoleCapture<R> {
    lines: Mutex<Lines<R>>,
    prompt: Option<String>,
    timeout: Option<Duration>,
}

impl ConsoleCapture<BufReader<Stdin>> {
    /// Interactive capture from the terminal with a `> ` prompt.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin())).with_prompt("> ")
    }
}

impl<R> ConsoleCapture<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
            prompt: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Give up on a line after `timeout` and report that nothing was heard.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn show_prompt(&self) -> std::io::Result<()> {
        if let Some(prompt) = &self.prompt {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(prompt.as_bytes()).await?;
            stdout.flush().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<R> SpeechCapture for ConsoleCapture<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn listen(&self) -> Result<Option<String>, CaptureError> {
        let mut lines = self.lines.lock().await;
        self.show_prompt()
            .await
            .map_err(|e| CaptureError::Unavailable(e.into()))?;

        let next = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, lines.next_line()).await {
                Ok(next) => next,
                Err(_) => {
                    debug!("Nothing heard within {limit:?}");
                    return Ok(None);
                }
            },
            None => lines.next_line().await,
        };

        match next {
            Ok(Some(line)) => {
                let line = line.trim();
                Ok((!line.is_empty()).then(|| line.to_string()))
            }
            Ok(None) => Err(CaptureError::Closed),
            Err(e) => Err(CaptureError::Unavailable(e.into())),
        }
    }
}
