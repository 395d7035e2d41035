//! Error types for schedule parsing.

use thiserror::Error;

/// Reasons a single timetable row cannot be turned into events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("Unknown weekday code: {0:?}")]
    InvalidWeekdayCode(String),

    #[error("Malformed {field}: {value:?}")]
    MalformedNumericField { field: &'static str, value: String },

    #[error("Row has no cell at index {0}")]
    MissingCell(usize),
}

/// A row that was dropped, with the course it belonged to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{caption}: {error}")]
pub struct RowFailure {
    pub caption: String,
    #[source]
    pub error: RowError,
}

/// Errors for the semester selected on the command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemesterError {
    #[error("Expected a year and a season, e.g. \"2016 Hiver\"")]
    Format,

    #[error("Invalid year: {0:?}")]
    InvalidYear(String),

    #[error("The year should be 2009 or later, got {0}")]
    YearTooEarly(i32),

    #[error("Unknown season {0:?}, expected one of Hiver, Ete, Automne")]
    UnknownSeason(String),
}
