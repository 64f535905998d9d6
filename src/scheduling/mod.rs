mod buckets;
mod evaluate;
mod notification_scheduler;

pub use buckets::{ReminderBuckets, bucket_reminders};
pub use evaluate::{LEAD_TIMES_MINUTES, TickEffect, evaluate_tick};
pub use notification_scheduler::{NotificationScheduler, RunningScheduler};
