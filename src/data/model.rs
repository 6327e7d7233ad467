//! Trip Data Model
//! Typed trip rows and the in-memory dataset they belong to.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Full English name of a weekday, e.g. "Monday".
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// One bikeshare trip.
///
/// `month`, `day_of_week` and `hour` are derived from `start_time` when the
/// record is built and cannot be changed on their own.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    start_time: NaiveDateTime,
    month: u32,
    day_of_week: Weekday,
    hour: u32,
    pub end_time: Option<String>,
    pub start_station: String,
    pub end_station: String,
    pub trip_duration: f64,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

impl TripRecord {
    pub fn new(
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        trip_duration: f64,
    ) -> Self {
        Self {
            start_time,
            month: start_time.month(),
            day_of_week: start_time.weekday(),
            hour: start_time.hour(),
            end_time: None,
            start_station: start_station.into(),
            end_station: end_station.into(),
            trip_duration,
            user_type: None,
            gender: None,
            birth_year: None,
        }
    }

    pub fn with_user_type(mut self, user_type: Option<String>) -> Self {
        self.user_type = user_type;
        self
    }

    pub fn with_gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_birth_year(mut self, birth_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self
    }

    pub fn with_end_time(mut self, end_time: Option<String>) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Calendar month of the start time, 1-based.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day_of_week(&self) -> Weekday {
        self.day_of_week
    }

    pub fn day_name(&self) -> &'static str {
        weekday_name(self.day_of_week)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Key used for the popular-trip statistic.
    pub fn trip_key(&self) -> String {
        format!("{} TO {}", self.start_station, self.end_station)
    }
}

/// Which optional columns the source file carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub has_end_time: bool,
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// Trip records for one city, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    schema: Schema,
    records: Vec<TripRecord>,
}

impl Dataset {
    pub fn new(schema: Schema, records: Vec<TripRecord>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_derived_fields_follow_start_time() {
        let start = NaiveDate::from_ymd_opt(2017, 6, 23)
            .unwrap()
            .and_hms_opt(15, 9, 32)
            .unwrap();
        let trip = TripRecord::new(start, "Wood St & Hubbard St", "Damen Ave & Chicago Ave", 321.0);

        assert_eq!(trip.month(), 6);
        assert_eq!(trip.day_of_week(), Weekday::Fri);
        assert_eq!(trip.day_name(), "Friday");
        assert_eq!(trip.hour(), 15);
        assert_eq!(trip.trip_key(), "Wood St & Hubbard St TO Damen Ave & Chicago Ave");
    }

    #[test]
    fn test_weekday_names_are_capitalized() {
        assert_eq!(weekday_name(Weekday::Mon), "Monday");
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
    }
}
