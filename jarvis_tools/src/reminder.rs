use async_trait::async_trait;
use chrono::{DateTime, Local};
use jarvis_core::ReminderService;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Local>,
}

/// Keeps reminders for the life of the process only.
#[derive(Debug, Default)]
pub struct InMemoryReminders {
    items: Mutex<Vec<Reminder>>,
}

impl InMemoryReminders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<Reminder> {
        self.items.lock().await.clone()
    }
}

#[async_trait]
impl ReminderService for InMemoryReminders {
    async fn create(&self, text: &str) -> anyhow::Result<String> {
        let reminder = Reminder {
            id: Uuid::now_v7(),
            text: text.to_string(),
            created_at: Local::now(),
        };
        info!("Reminder {} created: {}", reminder.id, reminder.text);
        self.items.lock().await.push(reminder);

        Ok(format!("I've set a reminder: {text}"))
    }
}
