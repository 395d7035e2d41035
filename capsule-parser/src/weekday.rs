use crate::RowError;

/// Day of the week a meeting recurs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Maps the single letter codes used by the portal (French initials,
    /// `R` for mercredi and `D` for dimanche).
    pub fn from_code(code: &str) -> Result<Self, RowError> {
        match code.trim() {
            "L" => Ok(Weekday::Monday),
            "M" => Ok(Weekday::Tuesday),
            "R" => Ok(Weekday::Wednesday),
            "J" => Ok(Weekday::Thursday),
            "V" => Ok(Weekday::Friday),
            "S" => Ok(Weekday::Saturday),
            "D" => Ok(Weekday::Sunday),
            other => Err(RowError::InvalidWeekdayCode(other.to_string())),
        }
    }

    /// Days since Monday.
    pub fn ordinal(self) -> u32 {
        chrono::Weekday::from(self).num_days_from_monday()
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(weekday: Weekday) -> chrono::Weekday {
        match weekday {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}
