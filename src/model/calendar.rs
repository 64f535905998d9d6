use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::UserId;

pub type CalendarItemId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarItemKind {
    Event,
    Task,
}

/// A calendar event or a task on a given day. Tasks never carry an end
/// time; a task without a start time occupies the whole day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarItem {
    pub id: CalendarItemId,
    pub user_id: UserId,
    pub title: String,
    pub kind: CalendarItemKind,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// Projection of an overlapping item, reported back to the user so the
/// UI can ask for confirmation. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictItem {
    pub kind: CalendarItemKind,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl From<&CalendarItem> for ConflictItem {
    fn from(item: &CalendarItem) -> Self {
        Self {
            kind: item.kind,
            title: item.title.clone(),
            date: item.date,
            start_time: item.start_time,
            end_time: item.end_time,
        }
    }
}
