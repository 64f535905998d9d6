use chrono::NaiveDateTime;

use crate::model::reminder::{Reminder, ReminderStatus};

/// Display grouping: completed reminders sit apart, the rest split by
/// due instant relative to the current local day. Cancelled reminders
/// are not shown. Every bucket is ordered by ascending due instant.
#[derive(Debug, Default, Clone)]
pub struct ReminderBuckets {
    pub overdue: Vec<Reminder>,
    pub today: Vec<Reminder>,
    pub upcoming: Vec<Reminder>,
    pub completed: Vec<Reminder>,
}

pub fn bucket_reminders(reminders: &[Reminder], now: NaiveDateTime) -> ReminderBuckets {
    let mut buckets = ReminderBuckets::default();

    for reminder in reminders {
        match reminder.status {
            ReminderStatus::Completed => buckets.completed.push(reminder.clone()),
            ReminderStatus::Cancelled => continue,
            ReminderStatus::Pending | ReminderStatus::Overdue => {
                if reminder.is_overdue(now) {
                    buckets.overdue.push(reminder.clone());
                } else if reminder.due_instant().date() == now.date() {
                    buckets.today.push(reminder.clone());
                } else {
                    buckets.upcoming.push(reminder.clone());
                }
            }
        }
    }

    for bucket in [
        &mut buckets.overdue,
        &mut buckets.today,
        &mut buckets.upcoming,
        &mut buckets.completed,
    ] {
        bucket.sort_by_key(|reminder| reminder.due_instant());
    }

    buckets
}
