//! Trip Data Loader Module
//! Reads a city's trip CSV with Polars and builds typed trip records.

use chrono::NaiveDateTime;
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::filter::apply_filter;
use super::model::{Dataset, Schema, TripRecord};
use super::selector::FilterSelection;
use crate::config::{City, Config};

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Trip data file not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Row {row}: invalid {column} value '{value}'")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Loads trip data for a city and applies the session's filters.
///
/// Every call re-reads the source file.
pub struct DataLoader<'a> {
    config: &'a Config,
}

impl<'a> DataLoader<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Load `city` and keep only the trips matching `selection`.
    pub fn load(&self, city: City, selection: &FilterSelection) -> Result<Dataset, LoaderError> {
        let path = self.config.source_path(city);
        info!("Loading {} trips from {}", city, path.display());

        let dataset = read_trips(&path)?;
        info!("Loaded {} trips for {}", dataset.len(), city);

        Ok(apply_filter(&dataset, selection))
    }
}

/// Read a trip CSV into a dataset, failing on the first unparseable row.
pub fn read_trips(path: &Path) -> Result<Dataset, LoaderError> {
    if !path.is_file() {
        return Err(LoaderError::SourceNotFound(path.to_path_buf()));
    }

    // Every column comes back as text; `trips_from_frame` does the typing.
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect()?;

    trips_from_frame(&df)
}

/// Convert a trip DataFrame into typed records.
///
/// Columns are matched by name; `End Time`, `Gender` and `Birth Year` are
/// optional and their presence is recorded in the dataset's [`Schema`].
pub fn trips_from_frame(df: &DataFrame) -> Result<Dataset, LoaderError> {
    let start_times = required_text(df, START_TIME)?;
    let start_stations = required_text(df, START_STATION)?;
    let end_stations = required_text(df, END_STATION)?;
    let durations = required_text(df, TRIP_DURATION)?;
    let user_types = required_text(df, USER_TYPE)?;
    let end_times = text_column(df, END_TIME)?;
    let genders = text_column(df, GENDER)?;
    let birth_years = text_column(df, BIRTH_YEAR)?;

    let schema = Schema {
        has_end_time: end_times.is_some(),
        has_gender: genders.is_some(),
        has_birth_year: birth_years.is_some(),
    };

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let line = row + 1;

        let start_time = parse_start_time(line, cell(&start_times, row))?;
        let start_station = required_cell(line, START_STATION, &start_stations, row)?;
        let end_station = required_cell(line, END_STATION, &end_stations, row)?;
        let duration = parse_duration(line, cell(&durations, row))?;

        let birth_year = match &birth_years {
            Some(values) => parse_birth_year(line, cell(values, row))?,
            None => None,
        };

        let trip = TripRecord::new(start_time, start_station, end_station, duration)
            .with_user_type(owned_cell(&user_types, row))
            .with_end_time(end_times.as_deref().and_then(|v| owned_cell(v, row)))
            .with_gender(genders.as_deref().and_then(|v| owned_cell(v, row)))
            .with_birth_year(birth_year);
        records.push(trip);
    }

    Ok(Dataset::new(schema, records))
}

/// Parse a `Start Time` value such as `2017-01-01 09:07:57`.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Column values as trimmed text, blanks mapped to `None`.
/// Returns `Ok(None)` when the column does not exist.
fn text_column(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<String>>>, LoaderError> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };

    let text = column.cast(&DataType::String)?;
    let values = text
        .str()?
        .into_iter()
        .map(|v| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string))
        .collect();

    Ok(Some(values))
}

fn required_text(df: &DataFrame, name: &'static str) -> Result<Vec<Option<String>>, LoaderError> {
    text_column(df, name)?.ok_or(LoaderError::MissingColumn(name))
}

fn cell(values: &[Option<String>], row: usize) -> Option<&str> {
    values.get(row).and_then(|v| v.as_deref())
}

fn owned_cell(values: &[Option<String>], row: usize) -> Option<String> {
    cell(values, row).map(str::to_string)
}

fn parse_error(row: usize, column: &'static str, value: Option<&str>) -> LoaderError {
    LoaderError::Parse {
        row,
        column,
        value: value.unwrap_or_default().to_string(),
    }
}

fn required_cell(
    row: usize,
    column: &'static str,
    values: &[Option<String>],
    index: usize,
) -> Result<String, LoaderError> {
    owned_cell(values, index).ok_or_else(|| parse_error(row, column, None))
}

fn parse_start_time(row: usize, value: Option<&str>) -> Result<NaiveDateTime, LoaderError> {
    value
        .and_then(parse_timestamp)
        .ok_or_else(|| parse_error(row, START_TIME, value))
}

fn parse_duration(row: usize, value: Option<&str>) -> Result<f64, LoaderError> {
    value
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
        .ok_or_else(|| parse_error(row, TRIP_DURATION, value))
}

/// Birth years are stored as decimals (`1989.0`) in some files. Fractions are
/// truncated toward zero.
fn parse_birth_year(row: usize, value: Option<&str>) -> Result<Option<i32>, LoaderError> {
    let Some(text) = value else {
        return Ok(None);
    };
    text.parse::<f64>()
        .ok()
        .filter(|year| year.is_finite())
        .map(|year| Some(year.trunc() as i32))
        .ok_or_else(|| parse_error(row, BIRTH_YEAR, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Weekday};

    fn frame(start_times: Vec<&str>) -> DataFrame {
        let n = start_times.len();
        DataFrame::new(vec![
            Column::new(START_TIME.into(), start_times),
            Column::new(END_TIME.into(), vec!["2017-01-01 10:00:00"; n]),
            Column::new(TRIP_DURATION.into(), vec![600_i64; n]),
            Column::new(START_STATION.into(), vec!["Canal St & Adams St"; n]),
            Column::new(END_STATION.into(), vec!["Clinton St & Madison St"; n]),
            Column::new(USER_TYPE.into(), vec!["Subscriber"; n]),
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let ts = parse_timestamp("2017-01-01 09:07:57").unwrap();
        assert_eq!(ts.hour(), 9);
        assert!(parse_timestamp("2017-01-01T09:07:57").is_some());
        assert!(parse_timestamp("2017-01-01 09:07:57.123").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_frame_without_optional_columns() {
        let df = frame(vec!["2017-01-01 09:07:57", "2017-03-06 17:30:00"]);
        let dataset = trips_from_frame(&df).unwrap();

        assert_eq!(dataset.len(), 2);
        assert!(!dataset.schema().has_gender);
        assert!(!dataset.schema().has_birth_year);
        assert!(dataset.schema().has_end_time);

        let second = &dataset.records()[1];
        assert_eq!(second.month(), 3);
        assert_eq!(second.day_of_week(), Weekday::Mon);
        assert_eq!(second.hour(), 17);
        assert_eq!(second.trip_duration, 600.0);
        assert_eq!(second.user_type.as_deref(), Some("Subscriber"));
    }

    #[test]
    fn test_decimal_birth_years_become_integers() {
        let mut df = frame(vec!["2017-01-01 09:07:57", "2017-01-02 09:07:57"]);
        df.with_column(Column::new(BIRTH_YEAR.into(), vec![Some(1989.0), None]))
            .unwrap();
        df.with_column(Column::new(GENDER.into(), vec![Some("Male"), None]))
            .unwrap();

        let dataset = trips_from_frame(&df).unwrap();
        assert!(dataset.schema().has_birth_year);
        assert!(dataset.schema().has_gender);
        assert_eq!(dataset.records()[0].birth_year, Some(1989));
        assert_eq!(dataset.records()[1].birth_year, None);
        assert_eq!(dataset.records()[1].gender, None);
    }

    #[test]
    fn test_fractional_birth_year_truncates() {
        let mut df = frame(vec!["2017-01-01 09:07:57"]);
        df.with_column(Column::new(BIRTH_YEAR.into(), vec!["1989.7"]))
            .unwrap();

        let dataset = trips_from_frame(&df).unwrap();
        assert_eq!(dataset.records()[0].birth_year, Some(1989));
    }

    #[test]
    fn test_bad_start_time_fails_whole_load() {
        let df = frame(vec!["2017-01-01 09:07:57", "not a date"]);
        let err = trips_from_frame(&df).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::Parse { row: 2, column: START_TIME, .. }
        ));
    }

    #[test]
    fn test_missing_required_column() {
        let df = frame(vec!["2017-01-01 09:07:57"])
            .drop(USER_TYPE)
            .unwrap();
        assert!(matches!(
            trips_from_frame(&df),
            Err(LoaderError::MissingColumn(USER_TYPE))
        ));
    }

    #[test]
    fn test_missing_file_is_source_not_found() {
        let err = read_trips(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::SourceNotFound(_)));
    }
}
