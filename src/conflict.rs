//! Same-day overlap detection for calendar items.
//!
//! Advisory only: the caller shows the resulting list to the user and
//! asks for confirmation, nothing blocks creation.

use chrono::{NaiveDate, NaiveTime};

use crate::localtime;
use crate::model::calendar::{CalendarItem, CalendarItemId, ConflictItem};

/// Assumed duration for an event with a start but no end time.
const DEFAULT_DURATION_MINUTES: i64 = 60;

/// A calendar item about to be created or edited, not yet persisted.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// Overlapping items on the candidate's day, events first then tasks,
/// in discovery order. `exclude` skips the item being edited so it does
/// not conflict with itself.
pub fn find_conflicts(
    candidate: &Candidate,
    events: &[CalendarItem],
    tasks: &[CalendarItem],
    exclude: &[CalendarItemId],
) -> Vec<ConflictItem> {
    let mut conflicts = Vec::new();

    for event in events {
        if exclude.contains(&event.id) || event.date != candidate.date {
            continue;
        }
        if ranges_overlap(candidate, event) {
            conflicts.push(ConflictItem::from(event));
        }
    }

    // Tasks carry no time of day. They are only reported against a
    // candidate that occupies the whole day itself; a timed candidate
    // is not checked against same-day tasks.
    if candidate.start_time.is_none() {
        for task in tasks {
            if exclude.contains(&task.id) || task.date != candidate.date {
                continue;
            }
            conflicts.push(ConflictItem::from(task));
        }
    }

    conflicts
}

fn ranges_overlap(candidate: &Candidate, existing: &CalendarItem) -> bool {
    let (Some(s1), Some(s2)) = (
        localtime::time_to_minutes(candidate.start_time),
        localtime::time_to_minutes(existing.start_time),
    ) else {
        // An item without a start time occupies the entire day.
        return true;
    };

    let e1 = localtime::time_to_minutes(candidate.end_time)
        .unwrap_or(s1 + DEFAULT_DURATION_MINUTES);
    let e2 = localtime::time_to_minutes(existing.end_time)
        .unwrap_or(s2 + DEFAULT_DURATION_MINUTES);

    // Half-open intervals: touching ends are not a conflict.
    s1 < e2 && s2 < e1
}
