pub mod expand;
pub mod service;

pub use expand::{RawSchedule, ScheduleDefinition, UpcomingOccurrence, expand};
