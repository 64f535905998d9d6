//! SmartPlan scheduling core: calendar conflict detection and reminder
//! notification scheduling over a pluggable storage collaborator.

pub mod appsettings;
pub mod conflict;
pub mod localtime;
pub mod model;
pub mod notify;
pub mod scheduling;
pub mod storage;
