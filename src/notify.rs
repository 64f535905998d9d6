use std::fmt;

use async_trait::async_trait;

use crate::model::reminder::ReminderId;

/// Idempotence key: one alert per (reminder, lead time) pair for the
/// lifetime of a scheduler instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationKey {
    pub reminder_id: ReminderId,
    pub lead_time_minutes: i64,
}

impl fmt::Display for NotificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reminder-{}-{}m", self.reminder_id, self.lead_time_minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Rendered idempotence key, passed through so the platform facility
    /// can use it as a deduplication hint too.
    pub tag: String,
}

#[async_trait]
pub trait NotificationSink: Send + Sync + 'static {
    async fn deliver(&self, notification: Notification) -> anyhow::Result<()>;
}

/// Writes alerts to the log, for running without a platform facility.
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn deliver(&self, notification: Notification) -> anyhow::Result<()> {
        log::info!(
            "[{}] {}: {}",
            notification.tag,
            notification.title,
            notification.body
        );
        Ok(())
    }
}
