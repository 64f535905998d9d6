use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::model::UserId;
use crate::model::reminder::{Reminder, ReminderStatus};
use crate::notify::{NotificationKey, NotificationSink};
use crate::storage::{ReminderStorage, StatusPatch};

use super::evaluate::{TickEffect, evaluate_tick};

/// Periodic evaluation loop over one user's reminders.
///
/// The snapshot is refreshed from storage on its own cadence and
/// replaced wholesale; each tick is a synchronous pass over whatever
/// snapshot is cached, so at most one evaluation is in flight. The
/// fired-key set lives on the instance and dies with it.
pub struct NotificationScheduler {
    storage: Arc<dyn ReminderStorage>,
    sink: Arc<dyn NotificationSink>,
    user_id: UserId,
    tick_interval: Duration,
    refresh_interval: Duration,
    snapshot: Vec<Reminder>,
    fired: HashSet<NotificationKey>,
}

/// Handle to a spawned scheduler loop.
pub struct RunningScheduler {
    task_handle: JoinHandle<()>,
    cancellation_token: CancellationToken,
}

impl RunningScheduler {
    pub async fn stop(self) {
        self.cancellation_token.cancel();
        let _ = self.task_handle.await;
    }
}

impl NotificationScheduler {
    pub fn new(
        storage: Arc<dyn ReminderStorage>,
        sink: Arc<dyn NotificationSink>,
        user_id: UserId,
        tick_interval: Duration,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            storage,
            sink,
            user_id,
            tick_interval,
            refresh_interval,
            snapshot: Vec::new(),
            fired: HashSet::new(),
        }
    }

    pub fn spawn(mut self) -> RunningScheduler {
        let cancellation_token = CancellationToken::new();
        let task_token = cancellation_token.child_token();
        let task_handle = tokio::spawn(async move {
            self.run(task_token).await;
        });

        RunningScheduler {
            task_handle,
            cancellation_token,
        }
    }

    async fn run(&mut self, token: CancellationToken) {
        let mut tick = tokio::time::interval(self.tick_interval);
        let mut refresh = tokio::time::interval(self.refresh_interval);

        loop {
            tokio::select! {
                // Refresh wins over a simultaneous tick so the first
                // evaluation already sees a snapshot.
                biased;
                _ = token.cancelled() => {
                    log::info!("Reminder scheduler for user {} shutting down", self.user_id);
                    break;
                }
                _ = refresh.tick() => self.refresh_snapshot().await,
                _ = tick.tick() => self.run_tick(Local::now().naive_local()).await,
            }
        }
    }

    async fn refresh_snapshot(&mut self) {
        match self.storage.get_all_user_reminders(&self.user_id).await {
            Ok(reminders) => self.snapshot = reminders,
            Err(error) => {
                log::warn!("Failed to refresh reminder snapshot, keeping the previous one: {error:#}");
            }
        }
    }

    async fn run_tick(&mut self, now: NaiveDateTime) {
        let effects = evaluate_tick(&self.snapshot, now, &mut self.fired);
        for effect in effects {
            self.apply_effect(effect).await;
        }
    }

    async fn apply_effect(&self, effect: TickEffect) {
        match effect {
            TickEffect::PromoteOverdue(id) => {
                let patch = StatusPatch {
                    id,
                    status: ReminderStatus::Overdue,
                    completed_at: None,
                };
                if let Err(error) = self.storage.patch_status(patch).await {
                    // The due instant stays in the past, so the next
                    // tick re-emits the same idempotent patch.
                    log::warn!("Failed to promote reminder {id} to overdue: {error:#}");
                }
            }
            TickEffect::Notify { key, notification } => {
                if let Err(error) = self.sink.deliver(notification).await {
                    log::warn!("Failed to deliver notification {key}: {error:#}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
