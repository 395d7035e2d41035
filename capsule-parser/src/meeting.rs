use chrono::{NaiveDate, NaiveTime};

use crate::{RowError, Weekday};

const CLASS_TYPE: usize = 0;
const TIME_RANGE: usize = 1;
const WEEKDAY: usize = 2;
const LOCATION: usize = 3;
const DATE_RANGE: usize = 4;
const INSTRUCTORS: usize = 6;

/// One row of the detailed schedule, validated and typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingRecord {
    pub caption: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub weekday: Weekday,
    pub location: String,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub class_type: String,
    pub instructors: Vec<String>,
}

impl MeetingRecord {
    /// Reads a row of cell texts.
    ///
    /// Returns `Ok(None)` for rows that are not weekly meetings, such as exams
    /// without a time slot: their time cell has no `HH:MM-HH:MM` range.
    pub fn from_cells<S: AsRef<str>>(caption: &str, cells: &[S]) -> Result<Option<Self>, RowError> {
        let Ok(time_range) = cell(cells, TIME_RANGE) else {
            return Ok(None);
        };

        let mut times = time_range.split('-').map(str::trim);
        let (Some(start_raw), Some(end_raw)) = (times.next(), times.next()) else {
            return Ok(None);
        };

        let (Some(start), Some(end)) = (start_raw.split_once(':'), end_raw.split_once(':')) else {
            return Ok(None);
        };

        let start = parse_time(start, "start time")?;
        let end = parse_time(end, "end time")?;

        let weekday = Weekday::from_code(cell(cells, WEEKDAY)?)?;
        let location = cell(cells, LOCATION)?.trim().to_string();

        let date_range = cell(cells, DATE_RANGE)?;
        let mut dates = date_range.split('-').map(str::trim);
        let (Some(first_raw), Some(last_raw)) = (dates.next(), dates.next()) else {
            return Err(RowError::MalformedNumericField {
                field: "date range",
                value: date_range.to_string(),
            });
        };

        let first_day = parse_date(first_raw, "start date")?;
        let last_day = parse_date(last_raw, "end date")?;

        let class_type = cells
            .get(CLASS_TYPE)
            .map(|class_type| class_type.as_ref().trim().to_string())
            .unwrap_or_default();

        let instructors = cells
            .get(INSTRUCTORS)
            .map(|names| names.as_ref().split_whitespace().map(String::from).collect())
            .unwrap_or_default();

        Ok(Some(MeetingRecord {
            caption: caption.to_string(),
            start,
            end,
            weekday,
            location,
            first_day,
            last_day,
            class_type,
            instructors,
        }))
    }

    /// Class type followed by the instructor names, kept on one line.
    pub fn description(&self) -> String {
        let mut description = self.class_type.clone();

        if !self.instructors.is_empty() {
            description.push_str(" -");
            for name in &self.instructors {
                description.push(' ');
                description.push_str(name);
            }
        }

        description
    }
}

fn cell<S: AsRef<str>>(cells: &[S], index: usize) -> Result<&str, RowError> {
    cells
        .get(index)
        .map(AsRef::as_ref)
        .ok_or(RowError::MissingCell(index))
}

fn number<T: std::str::FromStr>(raw: &str, field: &'static str) -> Result<T, RowError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| RowError::MalformedNumericField {
            field,
            value: raw.to_string(),
        })
}

fn parse_time((hour, minute): (&str, &str), field: &'static str) -> Result<NaiveTime, RowError> {
    NaiveTime::from_hms_opt(number(hour, field)?, number(minute, field)?, 0).ok_or_else(|| {
        RowError::MalformedNumericField {
            field,
            value: format!("{hour}:{minute}"),
        }
    })
}

fn parse_date(raw: &str, field: &'static str) -> Result<NaiveDate, RowError> {
    let malformed = || RowError::MalformedNumericField {
        field,
        value: raw.to_string(),
    };

    let mut parts = raw.split('/');
    let (Some(month), Some(day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    NaiveDate::from_ymd_opt(number(year, field)?, number(month, field)?, number(day, field)?)
        .ok_or_else(malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(time: &str, weekday: &str, dates: &str) -> Vec<String> {
        vec![
            "Cours en classe".into(),
            time.into(),
            weekday.into(),
            "PLT-2501".into(),
            dates.into(),
            "Classe".into(),
            "Jean   Tremblay (P)".into(),
        ]
    }

    #[test]
    fn parses_a_meeting_row() {
        let record = MeetingRecord::from_cells(
            "GLO-2000 - Réseaux",
            &row("08:30-09:20", "L", "01/04/2016-04/25/2016"),
        )
        .unwrap()
        .unwrap();

        assert_eq!(record.caption, "GLO-2000 - Réseaux");
        assert_eq!(record.start, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(record.end, NaiveTime::from_hms_opt(9, 20, 0).unwrap());
        assert_eq!(record.weekday, Weekday::Monday);
        assert_eq!(record.location, "PLT-2501");
        assert_eq!(record.first_day, NaiveDate::from_ymd_opt(2016, 1, 4).unwrap());
        assert_eq!(record.last_day, NaiveDate::from_ymd_opt(2016, 4, 25).unwrap());
        assert_eq!(record.instructors, vec!["Jean", "Tremblay", "(P)"]);
        assert_eq!(record.description(), "Cours en classe - Jean Tremblay (P)");
    }

    #[test]
    fn skips_rows_without_a_time_range() {
        for time in ["TBA", "", "08:30-", "-09:20", "08:30-0920", "0830-0920"] {
            let cells = row(time, "L", "01/04/2016-04/25/2016");
            assert_eq!(MeetingRecord::from_cells("c", &cells), Ok(None), "{time:?}");
        }

        let short: Vec<String> = vec!["Examen".into()];
        assert_eq!(MeetingRecord::from_cells("c", &short), Ok(None));
    }

    #[test]
    fn reports_invalid_weekday() {
        let cells = row("08:30-09:20", "X", "01/04/2016-04/25/2016");
        assert_eq!(
            MeetingRecord::from_cells("c", &cells),
            Err(RowError::InvalidWeekdayCode("X".into()))
        );
    }

    #[test]
    fn reports_malformed_numbers() {
        let cells = row("08:3a-09:20", "L", "01/04/2016-04/25/2016");
        assert!(matches!(
            MeetingRecord::from_cells("c", &cells),
            Err(RowError::MalformedNumericField { field: "start time", .. })
        ));

        let cells = row("25:00-26:00", "L", "01/04/2016-04/25/2016");
        assert!(matches!(
            MeetingRecord::from_cells("c", &cells),
            Err(RowError::MalformedNumericField { field: "start time", .. })
        ));

        let cells = row("08:30-09:20", "L", "13/04/2016-04/25/2016");
        assert!(matches!(
            MeetingRecord::from_cells("c", &cells),
            Err(RowError::MalformedNumericField { field: "start date", .. })
        ));

        let cells = row("08:30-09:20", "L", "01/04/2016");
        assert!(matches!(
            MeetingRecord::from_cells("c", &cells),
            Err(RowError::MalformedNumericField { field: "date range", .. })
        ));
    }

    #[test]
    fn reports_missing_cells() {
        let cells = vec!["Cours", "08:30-09:20", "L"];
        assert_eq!(
            MeetingRecord::from_cells("c", &cells),
            Err(RowError::MissingCell(LOCATION))
        );
    }

    #[test]
    fn description_without_instructors() {
        let mut cells = row("08:30-09:20", "L", "01/04/2016-04/25/2016");
        cells.truncate(5);
        let record = MeetingRecord::from_cells("c", &cells).unwrap().unwrap();
        assert!(record.instructors.is_empty());
        assert_eq!(record.description(), "Cours en classe");
    }
}
