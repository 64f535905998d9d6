use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::localtime;

use super::UserId;

pub type ReminderId = i64;
pub type DisciplineId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Exam,
    Assignment,
    Presentation,
    Deadline,
}

impl ReminderKind {
    pub fn label(self) -> &'static str {
        match self {
            ReminderKind::Exam => "Exam",
            ReminderKind::Assignment => "Assignment",
            ReminderKind::Presentation => "Presentation",
            ReminderKind::Deadline => "Deadline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Overdue,
    Completed,
    Cancelled,
}

/// Invariant: `completed_at` is set iff `status` is `Completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub user_id: UserId,
    pub discipline_id: Option<DisciplineId>,
    pub title: String,
    pub kind: ReminderKind,
    pub due_date: NaiveDate,
    pub due_time: Option<NaiveTime>,
    pub priority: Priority,
    pub notifications_enabled: bool,
    pub status: ReminderStatus,
    pub completed_at: Option<NaiveDateTime>,
}

impl Reminder {
    /// The instant this reminder is due, end of day when no time is set.
    pub fn due_instant(&self) -> NaiveDateTime {
        localtime::local_instant(self.due_date, self.due_time)
    }

    /// Still actionable by the scheduler.
    pub fn is_active(&self) -> bool {
        !matches!(
            self.status,
            ReminderStatus::Completed | ReminderStatus::Cancelled
        )
    }

    /// Derived display value: the due instant has passed while the
    /// reminder is still actionable.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.is_active() && (self.status == ReminderStatus::Overdue || now > self.due_instant())
    }

    pub fn complete(&mut self, now: NaiveDateTime) {
        self.status = ReminderStatus::Completed;
        self.completed_at = Some(now);
    }

    pub fn uncomplete(&mut self) {
        self.status = ReminderStatus::Pending;
        self.completed_at = None;
    }

    pub fn cancel(&mut self) {
        self.status = ReminderStatus::Cancelled;
        self.completed_at = None;
    }
}
