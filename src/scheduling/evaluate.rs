//! Pure per-tick evaluation over a reminder snapshot.
//!
//! Takes `now` as a parameter so tests run against fixed instants; the
//! scheduler loop supplies wall-clock time.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::model::reminder::{Reminder, ReminderId, ReminderStatus};
use crate::notify::{Notification, NotificationKey};

/// Minutes before the due instant at which alerts fire.
pub const LEAD_TIMES_MINUTES: [i64; 4] = [15, 5, 3, 1];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEffect {
    /// Persist a `pending -> overdue` transition.
    PromoteOverdue(ReminderId),
    /// Emit a lead-time alert.
    Notify {
        key: NotificationKey,
        notification: Notification,
    },
}

/// One evaluation pass over the snapshot. `fired` is the caller-owned
/// idempotence set; a key already present suppresses its alert.
pub fn evaluate_tick(
    reminders: &[Reminder],
    now: NaiveDateTime,
    fired: &mut HashSet<NotificationKey>,
) -> Vec<TickEffect> {
    let mut effects = Vec::new();

    for reminder in reminders.iter().filter(|reminder| reminder.is_active()) {
        let diff_minutes = minutes_until(reminder.due_instant(), now);

        if diff_minutes < 0 && reminder.status == ReminderStatus::Pending {
            effects.push(TickEffect::PromoteOverdue(reminder.id));
        }

        if !reminder.notifications_enabled {
            continue;
        }

        for lead_time in LEAD_TIMES_MINUTES {
            // Half-open window (lead - 1, lead] on whole minutes.
            if diff_minutes <= lead_time && diff_minutes > lead_time - 1 {
                let key = NotificationKey {
                    reminder_id: reminder.id,
                    lead_time_minutes: lead_time,
                };
                if fired.insert(key) {
                    effects.push(TickEffect::Notify {
                        key,
                        notification: notification_for(reminder, lead_time, &key),
                    });
                }
            }
        }
    }

    effects
}

/// Floor of the signed distance to the due instant, in whole minutes.
pub(crate) fn minutes_until(due: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (due - now).num_seconds().div_euclid(60)
}

fn notification_for(reminder: &Reminder, lead_time: i64, key: &NotificationKey) -> Notification {
    let unit = if lead_time == 1 { "minute" } else { "minutes" };
    Notification {
        title: format!("{} due soon", reminder.kind.label()),
        body: format!("\"{}\" is due in {lead_time} {unit}", reminder.title),
        tag: key.to_string(),
    }
}
