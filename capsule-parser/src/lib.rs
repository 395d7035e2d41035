mod error;
mod meeting;
mod parser;
mod recurrence;
mod semester;
mod structs;
mod weekday;

#[cfg(feature = "csv")]
mod csv;

pub use error::{RowError, RowFailure, SemesterError};
pub use meeting::MeetingRecord;
pub use parser::{build_calendar, parse_schedule, CourseBlock};
pub use recurrence::{expand, first_occurrence};
pub use semester::{Season, SemesterCode};
pub use structs::{Calendar, Event, DEFAULT_FILE_NAME};
pub use weekday::Weekday;

#[cfg(feature = "csv")]
pub use csv::{format_date, format_time};
