//! Statistics Calculator Module
//! Travel-time, station, trip-duration and user statistics over a trip dataset.

use log::debug;
use serde::{Serialize, Serializer};
use std::time::{Duration, Instant};
use thiserror::Error;

use super::frequency::{mode, value_counts};
use crate::data::{Dataset, FilterSelection};

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StatsError {
    #[error("No trips to compute {0} from")]
    EmptyDataset(&'static str),
}

/// A most-frequent value together with how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Popular<T> {
    pub value: T,
    pub count: usize,
}

impl<T> Popular<T> {
    fn from_mode((value, count): (T, usize)) -> Self {
        Self { value, count }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Most frequent times of travel. Month and day are only reported when the
/// dataset was not already restricted to a single month or day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular_month: Option<Popular<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular_day: Option<Popular<String>>,
    pub popular_hour: Popular<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub popular_start_station: Popular<String>,
    pub popular_end_station: Popular<String>,
    /// Keyed as `"{start} TO {end}"`.
    pub popular_trip: Popular<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripDurationStats {
    pub trip_count: usize,
    pub total_seconds: f64,
    pub mean_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub oldest: i32,
    pub youngest: i32,
    pub most_common: Popular<i32>,
}

/// User demographics. `genders` and `birth_years` are `None` when the
/// city's file has no such column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<ValueCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genders: Option<Vec<ValueCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_years: Option<Result<BirthYearStats, StatsError>>,
}

/// An analysis result and the wall-clock time it took.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timed<T> {
    pub result: T,
    #[serde(rename = "elapsed_seconds", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// All four analyses for one filtered dataset. Each one succeeds or fails
/// on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub time: Timed<Result<TimeStats, StatsError>>,
    pub stations: Timed<Result<StationStats, StatsError>>,
    pub trip_duration: Timed<Result<TripDurationStats, StatsError>>,
    pub users: Timed<UserStats>,
}

fn timed<T>(name: &str, analysis: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let result = analysis();
    let elapsed = start.elapsed();
    debug!("{name} took {:.6}s", elapsed.as_secs_f64());
    Timed { result, elapsed }
}

fn to_value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<ValueCount> {
    value_counts(values)
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

/// Stateless statistics over a borrowed dataset.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Most popular month, day and start hour.
    pub fn time_stats(
        dataset: &Dataset,
        selection: &FilterSelection,
    ) -> Result<TimeStats, StatsError> {
        let popular_hour = mode(dataset.iter().map(|t| t.hour()))
            .map(Popular::from_mode)
            .ok_or(StatsError::EmptyDataset("popular travel times"))?;

        let popular_month = selection
            .month
            .is_all()
            .then(|| mode(dataset.iter().map(|t| t.month())))
            .flatten()
            .map(Popular::from_mode);

        let popular_day = selection
            .day
            .is_all()
            .then(|| mode(dataset.iter().map(|t| t.day_name())))
            .flatten()
            .map(|(day, count)| Popular {
                value: day.to_string(),
                count,
            });

        Ok(TimeStats {
            popular_month,
            popular_day,
            popular_hour,
        })
    }

    /// Most popular start station, end station and start/end combination.
    pub fn station_stats(dataset: &Dataset) -> Result<StationStats, StatsError> {
        let empty = || StatsError::EmptyDataset("popular stations");

        let start = mode(dataset.iter().map(|t| t.start_station.as_str())).ok_or_else(empty)?;
        let end = mode(dataset.iter().map(|t| t.end_station.as_str())).ok_or_else(empty)?;
        let trip = mode(dataset.iter().map(|t| t.trip_key())).ok_or_else(empty)?;

        Ok(StationStats {
            popular_start_station: Popular {
                value: start.0.to_string(),
                count: start.1,
            },
            popular_end_station: Popular {
                value: end.0.to_string(),
                count: end.1,
            },
            popular_trip: Popular::from_mode(trip),
        })
    }

    /// Total and mean trip duration in seconds. Fails as a whole on an
    /// empty dataset since the mean is undefined.
    pub fn trip_duration_stats(dataset: &Dataset) -> Result<TripDurationStats, StatsError> {
        if dataset.is_empty() {
            return Err(StatsError::EmptyDataset("trip duration"));
        }

        let total_seconds: f64 = dataset.iter().map(|t| t.trip_duration).sum();
        let trip_count = dataset.len();

        Ok(TripDurationStats {
            trip_count,
            total_seconds,
            mean_seconds: total_seconds / trip_count as f64,
        })
    }

    /// User type and gender breakdowns plus birth-year extremes.
    pub fn user_stats(dataset: &Dataset) -> UserStats {
        let schema = dataset.schema();

        let user_types = to_value_counts(dataset.iter().filter_map(|t| t.user_type.as_deref()));

        let genders = schema
            .has_gender
            .then(|| to_value_counts(dataset.iter().filter_map(|t| t.gender.as_deref())));

        let birth_years = schema
            .has_birth_year
            .then(|| Self::birth_year_stats(dataset));

        UserStats {
            user_types,
            genders,
            birth_years,
        }
    }

    fn birth_year_stats(dataset: &Dataset) -> Result<BirthYearStats, StatsError> {
        let years = || dataset.iter().filter_map(|t| t.birth_year);
        let empty = || StatsError::EmptyDataset("birth years");

        let oldest = years().min().ok_or_else(empty)?;
        let youngest = years().max().ok_or_else(empty)?;
        let most_common = mode(years()).map(Popular::from_mode).ok_or_else(empty)?;

        Ok(BirthYearStats {
            oldest,
            youngest,
            most_common,
        })
    }

    /// Run all four analyses in parallel.
    pub fn analyze(dataset: &Dataset, selection: &FilterSelection) -> StatsReport {
        let ((time, stations), (trip_duration, users)) = rayon::join(
            || {
                rayon::join(
                    || timed("time stats", || Self::time_stats(dataset, selection)),
                    || timed("station stats", || Self::station_stats(dataset)),
                )
            },
            || {
                rayon::join(
                    || timed("trip duration stats", || Self::trip_duration_stats(dataset)),
                    || timed("user stats", || Self::user_stats(dataset)),
                )
            },
        );

        StatsReport {
            time,
            stations,
            trip_duration,
            users,
        }
    }
}
