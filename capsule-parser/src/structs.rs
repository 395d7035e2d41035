use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

pub const DEFAULT_FILE_NAME: &str = "schedule.csv";

/// A single occurrence of a course meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub subject: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: String,
    pub description: Option<String>,
}

impl Event {
    pub fn new<S: Into<String>, L: Into<String>>(
        subject: S,
        start: NaiveDateTime,
        end: NaiveDateTime,
        location: L,
        description: Option<String>,
    ) -> Self {
        Event {
            subject: subject.into(),
            start,
            end,
            location: location.into(),
            description,
        }
    }
}

/// Events gathered during a run, written out once at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    file_name: PathBuf,
    events: Vec<Event>,
}

impl Calendar {
    pub fn new<P: Into<PathBuf>>(file_name: P) -> Self {
        Calendar {
            file_name: file_name.into(),
            events: Vec::new(),
        }
    }

    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Calendar::new(DEFAULT_FILE_NAME)
    }
}

impl Extend<Event> for Calendar {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, events: I) {
        self.events.extend(events);
    }
}
