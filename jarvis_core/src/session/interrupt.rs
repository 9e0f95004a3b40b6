use std::sync::Arc;

use tokio::sync::watch;

/// Cooperative stop signal shared between the session loop and whoever
/// observes the user's interrupt (Ctrl+C in the binary).
#[derive(Debug, Clone)]
pub struct Interrupt {
    tx: Arc<watch::Sender<bool>>,
}

impl Interrupt {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once [`trigger`](Self::trigger) has been called, immediately if
    /// it already was.
    pub async fn triggered(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel.
        let _ = rx.wait_for(|triggered| *triggered).await;
    }
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn resolves_after_trigger_from_another_task() {
        let interrupt = Interrupt::new();
        let remote = interrupt.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            remote.trigger();
        });

        tokio::time::timeout(Duration::from_secs(2), interrupt.triggered())
            .await
            .unwrap_or_else(|_| panic!("interrupt never resolved"));
        assert!(interrupt.is_triggered());
    }

    #[tokio::test]
    async fn resolves_immediately_when_already_triggered() {
        let interrupt = Interrupt::new();
        interrupt.trigger();
        tokio::time::timeout(Duration::from_millis(100), interrupt.triggered())
            .await
            .unwrap_or_else(|_| panic!("interrupt should already be set"));
    }
}
