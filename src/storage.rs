use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tokio::sync::RwLock;

use crate::model::UserId;
use crate::model::reminder::{
    DisciplineId, Priority, Reminder, ReminderId, ReminderKind, ReminderStatus,
};

pub struct NewReminder {
    pub user_id: UserId,
    pub discipline_id: Option<DisciplineId>,
    pub title: String,
    pub kind: ReminderKind,
    pub due_date: NaiveDate,
    pub due_time: Option<NaiveTime>,
    pub priority: Priority,
    pub notifications_enabled: bool,
}

/// Partial update of the status fields. Reapplying the same target
/// state has no additional effect, so retries are safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPatch {
    pub id: ReminderId,
    pub status: ReminderStatus,
    pub completed_at: Option<NaiveDateTime>,
}

#[async_trait]
pub trait ReminderStorage: Send + Sync {
    async fn insert(&self, reminder: NewReminder) -> anyhow::Result<Reminder>;
    async fn patch_status(&self, patch: StatusPatch) -> anyhow::Result<ReminderId>;
    async fn get(&self, id: ReminderId) -> anyhow::Result<Option<Reminder>>;
    async fn get_all_user_reminders(&self, user_id: &UserId) -> anyhow::Result<Vec<Reminder>>;
}

pub struct InMemoryReminderStorage {
    store: RwLock<(ReminderId, HashMap<ReminderId, Reminder>)>,
}

impl InMemoryReminderStorage {
    pub fn new() -> Self {
        InMemoryReminderStorage {
            store: RwLock::new((0, HashMap::new())),
        }
    }
}

impl Default for InMemoryReminderStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReminderStorage for InMemoryReminderStorage {
    async fn insert(&self, reminder: NewReminder) -> anyhow::Result<Reminder> {
        let mut store = self.store.write().await;
        let current_id = store.0;
        let inserted = Reminder {
            id: current_id,
            user_id: reminder.user_id,
            discipline_id: reminder.discipline_id,
            title: reminder.title,
            kind: reminder.kind,
            due_date: reminder.due_date,
            due_time: reminder.due_time,
            priority: reminder.priority,
            notifications_enabled: reminder.notifications_enabled,
            status: ReminderStatus::Pending,
            completed_at: None,
        };

        store.1.insert(current_id, inserted.clone());
        store.0 += 1;
        log::debug!("Inserted reminder {current_id}");
        Ok(inserted)
    }

    async fn patch_status(&self, patch: StatusPatch) -> anyhow::Result<ReminderId> {
        let mut store = self.store.write().await;
        if let Some(reminder) = store.1.get_mut(&patch.id) {
            reminder.status = patch.status;
            reminder.completed_at = patch.completed_at;
            Ok(patch.id)
        } else {
            anyhow::bail!("Does not exist")
        }
    }

    async fn get(&self, id: ReminderId) -> anyhow::Result<Option<Reminder>> {
        let store = self.store.read().await;
        Ok(store.1.get(&id).cloned())
    }

    async fn get_all_user_reminders(&self, user_id: &UserId) -> anyhow::Result<Vec<Reminder>> {
        let store = self.store.read().await;
        Ok(store
            .1
            .values()
            .filter(|reminder| &reminder.user_id == user_id)
            .cloned()
            .collect())
    }
}
