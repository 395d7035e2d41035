use std::fs::File;
use std::io::{self, BufWriter, Write};

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use log::debug;

use crate::{Calendar, Event};

const HEADER: &str = "Subject,Start Date,Start Time,End Date,End Time,Location";
const HEADER_WITH_DESCRIPTION: &str =
    "Subject,Start Date,Start Time,End Date,End Time,Description,Location";

/// `M/D/YYYY`, without zero padding.
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// 12-hour clock, e.g. `8:05 AM`, `12:00 PM`, `1:30 PM`.
///
/// Midnight is written `0:MM AM`.
pub fn format_time(time: NaiveTime) -> String {
    let (hour, minute) = (time.hour(), time.minute());
    match hour {
        0..=11 => format!("{hour}:{minute:02} AM"),
        12 => format!("12:{minute:02} PM"),
        _ => format!("{}:{minute:02} PM", hour - 12),
    }
}

fn quote(description: &str) -> String {
    format!("\"{}\"", description.replace('"', "\"\""))
}

impl Event {
    /// `Subject,StartDate,StartTime,EndDate,EndTime,[Description,]Location`
    #[must_use]
    pub fn to_csv_row(&self, include_description: bool) -> String {
        let mut fields = vec![
            self.subject.clone(),
            format_date(self.start.date()),
            format_time(self.start.time()),
            format_date(self.end.date()),
            format_time(self.end.time()),
        ];

        if include_description {
            fields.push(quote(self.description.as_deref().unwrap_or_default()));
        }

        fields.push(self.location.clone());
        fields.join(",")
    }
}

impl Calendar {
    #[must_use]
    pub fn header(include_description: bool) -> &'static str {
        if include_description {
            HEADER_WITH_DESCRIPTION
        } else {
            HEADER
        }
    }

    /// Header line, then each event on its own line in insertion order.
    pub fn write_csv<W: Write>(&self, mut writer: W, include_description: bool) -> io::Result<()> {
        writer.write_all(Self::header(include_description).as_bytes())?;

        for event in self.events() {
            writer.write_all(b"\n")?;
            writer.write_all(event.to_csv_row(include_description).as_bytes())?;
        }

        writer.flush()
    }

    /// Truncates the target file and writes the whole calendar to it.
    pub fn write_to_file(&self, include_description: bool) -> io::Result<()> {
        debug!(
            "Writing {} events to {}",
            self.len(),
            self.file_name().display()
        );

        let file = File::create(self.file_name())?;
        self.write_csv(BufWriter::new(file), include_description)
    }
}
