use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;

use crate::{Event, MeetingRecord, Weekday};

/// First moment on or after `first_day` that falls on `target`.
///
/// A target weekday earlier in the week than `first_day` rolls over into the
/// following week. Returns `None` when that day is past the last date chrono
/// can represent.
pub fn first_occurrence(
    first_day: NaiveDate,
    start: NaiveTime,
    target: Weekday,
) -> Option<NaiveDateTime> {
    let candidate = first_day.and_time(start);
    let current = candidate.weekday().num_days_from_monday();
    let target = target.ordinal();

    let offset = if target >= current {
        target - current
    } else {
        7 - (current - target)
    };

    candidate.checked_add_signed(Duration::days(offset.into()))
}

/// One event per week from the first occurrence up to the last day of the
/// meeting's date range.
pub fn expand(record: &MeetingRecord, include_description: bool) -> Vec<Event> {
    let Some(first_start) = first_occurrence(record.first_day, record.start, record.weekday)
    else {
        debug!("{}: first {:?} is out of range", record.caption, record.weekday);
        return Vec::new();
    };

    if first_start.date() > record.last_day {
        debug!(
            "{}: no {:?} between {} and {}",
            record.caption, record.weekday, record.first_day, record.last_day
        );
        return Vec::new();
    }

    let first_end = first_start.date().and_time(record.end);
    let span = record.last_day.and_time(record.start) - first_start;
    let repeats = span.num_days() / 7;

    let description = include_description.then(|| record.description());

    (0..=repeats)
        .map_while(|week| {
            let shift = Duration::weeks(week);
            Some(Event::new(
                &record.caption,
                first_start.checked_add_signed(shift)?,
                first_end.checked_add_signed(shift)?,
                &record.location,
                description.clone(),
            ))
        })
        .collect()
}
