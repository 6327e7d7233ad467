//! Statistics module - travel, station, duration and user statistics

mod calculator;
mod frequency;

pub use calculator::{
    BirthYearStats, Popular, StationStats, StatsCalculator, StatsError, StatsReport, TimeStats,
    Timed, TripDurationStats, UserStats, ValueCount,
};
pub use frequency::{mode, value_counts};
