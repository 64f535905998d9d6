pub mod calendar;
pub mod reminder;

pub type UserId = String;
