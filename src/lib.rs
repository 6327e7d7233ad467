//! Bikeshare Explorer - US bikeshare trip statistics
//!
//! Loads trip records for Chicago, New York City or Washington, narrows them
//! by month and day of week, and reports popular travel times, stations, trip
//! durations and user demographics.

pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod report;
pub mod session;
pub mod stats;
