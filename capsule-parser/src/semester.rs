use std::fmt;
use std::str::FromStr;

use crate::SemesterError;

const FIRST_YEAR: i32 = 2009;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    /// Hiver
    Winter,
    /// Été
    Summer,
    /// Automne
    Autumn,
}

impl Season {
    /// Month the term starts in, as used in the portal's term codes.
    pub fn code(self) -> &'static str {
        match self {
            Season::Winter => "01",
            Season::Summer => "05",
            Season::Autumn => "09",
        }
    }
}

impl FromStr for Season {
    type Err = SemesterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next().map(|c| c.to_lowercase().collect::<String>()).as_deref() {
            Some("h") => Ok(Season::Winter),
            Some("e" | "é") => Ok(Season::Summer),
            Some("a") => Ok(Season::Autumn),
            _ => Err(SemesterError::UnknownSeason(s.to_string())),
        }
    }
}

/// Term selector sent to the portal, rendered as `YYYY` followed by the
/// season code (`201601` for winter 2016).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SemesterCode {
    pub year: i32,
    pub season: Season,
}

impl SemesterCode {
    pub fn new(year: i32, season: Season) -> Result<Self, SemesterError> {
        if year < FIRST_YEAR {
            return Err(SemesterError::YearTooEarly(year));
        }
        Ok(SemesterCode { year, season })
    }
}

impl FromStr for SemesterCode {
    type Err = SemesterError;

    /// Parses `"YEAR SEASON"`, e.g. `"2016 Hiver"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(year), Some(season), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(SemesterError::Format);
        };

        let year = year
            .parse::<i32>()
            .map_err(|_| SemesterError::InvalidYear(year.to_string()))?;

        SemesterCode::new(year, season.parse()?)
    }
}

impl fmt::Display for SemesterCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.year, self.season.code())
    }
}
