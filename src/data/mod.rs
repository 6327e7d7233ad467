//! Data module - trip loading, model and filtering
//!
//! ```text
//!  chicago.csv / new_york_city.csv / washington.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  polars CSV → typed TripRecords + derived month/day/hour
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter  │  month / day selectors → new Dataset
//!   └──────────┘
//! ```

mod filter;
mod loader;
mod model;
mod selector;

pub use filter::apply_filter;
pub use loader::{
    parse_timestamp, read_trips, trips_from_frame, DataLoader, LoaderError, BIRTH_YEAR, END_STATION,
    END_TIME, GENDER, START_STATION, START_TIME, TRIP_DURATION, USER_TYPE,
};
pub use model::{weekday_name, Dataset, Schema, TripRecord};
pub use selector::{
    DayFilter, FilterSelection, MonthFilter, SelectorError, SUPPORTED_MONTHS, WEEKDAYS,
};
