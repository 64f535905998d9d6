use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate, NaiveTime};

use crate::model::reminder::{Priority, Reminder, ReminderId, ReminderKind, ReminderStatus};
use crate::notify::{Notification, NotificationSink};
use crate::storage::{InMemoryReminderStorage, NewReminder, ReminderStorage, StatusPatch};

use super::*;

type Delivered = Arc<Mutex<Vec<Notification>>>;

struct RecordingSink {
    delivered: Delivered,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, notification: Notification) -> anyhow::Result<()> {
        self.delivered.lock().unwrap().push(notification);
        Ok(())
    }
}

/// Fails the first status patch, then behaves like the inner store.
struct FlakyStorage {
    inner: InMemoryReminderStorage,
    fail_next_patch: AtomicBool,
}

impl FlakyStorage {
    fn new() -> Self {
        Self {
            inner: InMemoryReminderStorage::new(),
            fail_next_patch: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl ReminderStorage for FlakyStorage {
    async fn insert(&self, reminder: NewReminder) -> anyhow::Result<Reminder> {
        self.inner.insert(reminder).await
    }

    async fn patch_status(&self, patch: StatusPatch) -> anyhow::Result<ReminderId> {
        if self.fail_next_patch.swap(false, Ordering::SeqCst) {
            anyhow::bail!("transient write failure")
        }
        self.inner.patch_status(patch).await
    }

    async fn get(&self, id: ReminderId) -> anyhow::Result<Option<Reminder>> {
        self.inner.get(id).await
    }

    async fn get_all_user_reminders(&self, user_id: &UserId) -> anyhow::Result<Vec<Reminder>> {
        self.inner.get_all_user_reminders(user_id).await
    }
}

fn new_reminder(due_date: NaiveDate, due_time: Option<NaiveTime>, enabled: bool) -> NewReminder {
    NewReminder {
        user_id: "student".to_string(),
        discipline_id: None,
        title: "Submit thesis draft".to_string(),
        kind: ReminderKind::Deadline,
        due_date,
        due_time,
        priority: Priority::High,
        notifications_enabled: enabled,
    }
}

fn scheduler(
    storage: Arc<dyn ReminderStorage>,
    sink: Arc<dyn NotificationSink>,
) -> NotificationScheduler {
    NotificationScheduler::new(
        storage,
        sink,
        "student".to_string(),
        Duration::from_secs(30),
        Duration::from_secs(300),
    )
}

fn recording_sink() -> (Arc<RecordingSink>, Delivered) {
    let delivered = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::new(RecordingSink {
        delivered: delivered.clone(),
    });
    (sink, delivered)
}

#[tokio::test(start_paused = true)]
async fn due_yesterday_is_promoted_on_the_first_tick() {
    let storage = Arc::new(InMemoryReminderStorage::new());
    let (sink, _delivered) = recording_sink();

    let yesterday = Local::now()
        .date_naive()
        .checked_sub_days(Days::new(1))
        .unwrap();
    let inserted = storage
        .insert(new_reminder(yesterday, None, false))
        .await
        .unwrap();

    let running = scheduler(storage.clone(), sink).spawn();
    tokio::time::sleep(Duration::from_secs(1)).await;

    let stored = storage.get(inserted.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ReminderStatus::Overdue);

    running.stop().await;
}

#[tokio::test(start_paused = true)]
async fn lead_time_alert_fires_once_across_ticks() {
    let storage = Arc::new(InMemoryReminderStorage::new());
    let (sink, delivered) = recording_sink();

    // 30 extra seconds keep the whole-minute distance at 5 even after
    // the loop reads the clock a moment later.
    let due = Local::now().naive_local() + chrono::Duration::minutes(5) + chrono::Duration::seconds(30);
    storage
        .insert(new_reminder(due.date(), Some(due.time()), true))
        .await
        .unwrap();

    let running = scheduler(storage.clone(), sink).spawn();
    // Covers the immediate tick plus two more at the 30s cadence.
    tokio::time::sleep(Duration::from_secs(61)).await;

    let delivered = delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].tag, "reminder-0-5m");
    drop(delivered);

    running.stop().await;
}

#[tokio::test(start_paused = true)]
async fn disabled_notifications_are_never_delivered() {
    let storage = Arc::new(InMemoryReminderStorage::new());
    let (sink, delivered) = recording_sink();

    let due = Local::now().naive_local() + chrono::Duration::minutes(5) + chrono::Duration::seconds(30);
    storage
        .insert(new_reminder(due.date(), Some(due.time()), false))
        .await
        .unwrap();

    let running = scheduler(storage.clone(), sink).spawn();
    tokio::time::sleep(Duration::from_secs(61)).await;

    assert!(delivered.lock().unwrap().is_empty());

    running.stop().await;
}

#[tokio::test(start_paused = true)]
async fn stopped_scheduler_does_no_further_work() {
    let storage = Arc::new(InMemoryReminderStorage::new());
    let (sink, delivered) = recording_sink();

    let running = scheduler(storage.clone(), sink).spawn();
    tokio::time::sleep(Duration::from_secs(1)).await;
    running.stop().await;

    // Inserted only after shutdown; a live loop would promote it.
    let yesterday = Local::now()
        .date_naive()
        .checked_sub_days(Days::new(1))
        .unwrap();
    let inserted = storage
        .insert(new_reminder(yesterday, None, true))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(600)).await;

    let stored = storage.get(inserted.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ReminderStatus::Pending);
    assert!(delivered.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_promotion_heals_on_the_next_tick() {
    let storage = Arc::new(FlakyStorage::new());
    let (sink, _delivered) = recording_sink();

    let yesterday = Local::now()
        .date_naive()
        .checked_sub_days(Days::new(1))
        .unwrap();
    let inserted = storage
        .insert(new_reminder(yesterday, None, false))
        .await
        .unwrap();

    let running = scheduler(storage.clone(), sink).spawn();

    tokio::time::sleep(Duration::from_secs(1)).await;
    let after_first_tick = storage.get(inserted.id).await.unwrap().unwrap();
    assert_eq!(after_first_tick.status, ReminderStatus::Pending);

    tokio::time::sleep(Duration::from_secs(30)).await;
    let after_second_tick = storage.get(inserted.id).await.unwrap().unwrap();
    assert_eq!(after_second_tick.status, ReminderStatus::Overdue);

    running.stop().await;
}
