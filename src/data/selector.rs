//! Filter Selectors
//! Month and day-of-week restrictions chosen by the user.

use chrono::{Month, Weekday};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::model::weekday_name;

/// Months covered by the published trip data.
pub const SUPPORTED_MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const ALL: &str = "all";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Unknown city '{0}', expected chicago, nyc or dc")]
    UnknownCity(String),
    #[error("Unknown month '{0}', expected all or january through june")]
    UnknownMonth(String),
    #[error("Unknown day '{0}', expected all or monday through sunday")]
    UnknownDay(String),
}

/// Month restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

impl MonthFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, MonthFilter::All)
    }

    /// 1-based month index, `None` when unrestricted.
    pub fn month_number(&self) -> Option<u32> {
        match self {
            MonthFilter::All => None,
            MonthFilter::Only(month) => Some(month.number_from_month()),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if name == ALL {
            return Ok(MonthFilter::All);
        }
        SUPPORTED_MONTHS
            .into_iter()
            .find(|month| month.name().to_lowercase() == name)
            .map(MonthFilter::Only)
            .ok_or_else(|| SelectorError::UnknownMonth(s.trim().to_string()))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str(ALL),
            MonthFilter::Only(month) => f.write_str(month.name()),
        }
    }
}

/// Day-of-week restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl DayFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, DayFilter::All)
    }

    /// Title-cased day name, `None` when unrestricted.
    pub fn day_name(&self) -> Option<&'static str> {
        match self {
            DayFilter::All => None,
            DayFilter::Only(day) => Some(weekday_name(*day)),
        }
    }
}

impl FromStr for DayFilter {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if name == ALL {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|day| weekday_name(*day).to_lowercase() == name)
            .map(DayFilter::Only)
            .ok_or_else(|| SelectorError::UnknownDay(s.trim().to_string()))
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str(ALL),
            DayFilter::Only(day) => f.write_str(weekday_name(*day)),
        }
    }
}

/// Month and day restrictions for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    pub fn new(month: MonthFilter, day: DayFilter) -> Self {
        Self { month, day }
    }

    pub fn unfiltered() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names_parse_case_insensitively() {
        assert_eq!("January".parse::<MonthFilter>(), Ok(MonthFilter::Only(Month::January)));
        assert_eq!(" june ".parse::<MonthFilter>(), Ok(MonthFilter::Only(Month::June)));
        assert_eq!("ALL".parse::<MonthFilter>(), Ok(MonthFilter::All));
        assert_eq!(
            "july".parse::<MonthFilter>(),
            Err(SelectorError::UnknownMonth("july".to_string()))
        );
    }

    #[test]
    fn test_month_number_is_one_based() {
        assert_eq!(MonthFilter::Only(Month::January).month_number(), Some(1));
        assert_eq!(MonthFilter::Only(Month::June).month_number(), Some(6));
        assert_eq!(MonthFilter::All.month_number(), None);
    }

    #[test]
    fn test_day_names_parse_to_title_case() {
        let day: DayFilter = "wednesday".parse().unwrap();
        assert_eq!(day, DayFilter::Only(Weekday::Wed));
        assert_eq!(day.day_name(), Some("Wednesday"));
        assert!("wed".parse::<DayFilter>().is_err());
        assert!("all".parse::<DayFilter>().unwrap().is_all());
    }
}
