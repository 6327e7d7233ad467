//! Report Renderer
//! Console and JSON output for a [`StatsReport`].

use chrono::Month;
use serde::Serialize;
use std::io::{self, Write};

use crate::data::FilterSelection;
use crate::stats::{
    BirthYearStats, Popular, StationStats, StatsError, StatsReport, TimeStats, Timed,
    TripDurationStats, UserStats, ValueCount,
};

const SEPARATOR_WIDTH: usize = 40;

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Render seconds the way pandas prints a `Timedelta`, e.g. `1 days 02:03:04`.
///
/// A fractional part prints as microseconds (`00:02:00.500000`), or as
/// nanoseconds when it is not a whole number of microseconds
/// (`00:05:33.333333333`).
pub fn format_timedelta(seconds: f64) -> String {
    const NANOS_PER_DAY: i64 = 86_400_000_000_000;

    let total = (seconds * 1e9).round() as i64;
    let days = total.div_euclid(NANOS_PER_DAY);
    let rem = total.rem_euclid(NANOS_PER_DAY);

    let hours = rem / 3_600_000_000_000;
    let minutes = rem / 60_000_000_000 % 60;
    let secs = rem / 1_000_000_000 % 60;
    let nanos = rem % 1_000_000_000;

    let clock = format!("{days} days {hours:02}:{minutes:02}:{secs:02}");
    if nanos == 0 {
        clock
    } else if nanos % 1_000 == 0 {
        format!("{clock}.{:06}", nanos / 1_000)
    } else {
        format!("{clock}.{nanos:09}")
    }
}

fn month_label(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| format!("{month} ({})", m.name()))
        .unwrap_or_else(|| month.to_string())
}

fn write_counts<W: Write>(out: &mut W, counts: &[ValueCount]) -> io::Result<()> {
    let width = counts.iter().map(|c| c.value.len()).max().unwrap_or(0);
    for entry in counts {
        writeln!(out, "{:<width$}    {}", entry.value, entry.count)?;
    }
    Ok(())
}

fn write_popular<W: Write, T: std::fmt::Display>(
    out: &mut W,
    question: &str,
    popular: &Popular<T>,
) -> io::Result<()> {
    writeln!(out, "\n{question}")?;
    writeln!(out, "{} (count: {})", popular.value, popular.count)
}

fn write_footer<W: Write, T>(out: &mut W, timed: &Timed<T>) -> io::Result<()> {
    writeln!(out, "\nThis took {} seconds.", timed.elapsed.as_secs_f64())?;
    writeln!(out, "{}", separator())
}

fn write_empty<W: Write>(out: &mut W, err: &StatsError) -> io::Result<()> {
    writeln!(out, "\nNo trips match the selected filters ({err}).")
}

fn write_time<W: Write>(out: &mut W, stats: &TimeStats) -> io::Result<()> {
    if let Some(month) = &stats.popular_month {
        writeln!(out, "\nWhat is the most popular month for traveling?")?;
        writeln!(out, "{} (count: {})", month_label(month.value), month.count)?;
    }
    if let Some(day) = &stats.popular_day {
        write_popular(out, "What is the most popular day for traveling?", day)?;
    }
    write_popular(
        out,
        "What is the most popular hour of the day to start your travels?",
        &stats.popular_hour,
    )
}

fn write_stations<W: Write>(out: &mut W, stats: &StationStats) -> io::Result<()> {
    write_popular(out, "What is the most popular start station?", &stats.popular_start_station)?;
    write_popular(out, "What is the most popular end station?", &stats.popular_end_station)?;
    write_popular(out, "What was the most popular trip from start to end?", &stats.popular_trip)
}

fn write_duration<W: Write>(out: &mut W, stats: &TripDurationStats) -> io::Result<()> {
    writeln!(out, "\nWhat was the total traveling time?")?;
    writeln!(out, "{}", format_timedelta(stats.total_seconds))?;
    writeln!(out, "\nWhat was the average time spent on each trip?")?;
    writeln!(out, "{}", format_timedelta(stats.mean_seconds))
}

fn write_birth_years<W: Write>(out: &mut W, stats: &BirthYearStats) -> io::Result<()> {
    writeln!(out, "Oldest = {}", stats.oldest)?;
    writeln!(out, "Youngest = {}", stats.youngest)?;
    writeln!(out, "Most Common = {}", stats.most_common.value)
}

fn write_users<W: Write>(out: &mut W, stats: &UserStats) -> io::Result<()> {
    writeln!(out, "\nWhat is the breakdown of users?")?;
    write_counts(out, &stats.user_types)?;

    writeln!(out, "\nWhat is the breakdown of gender?")?;
    match &stats.genders {
        Some(genders) => write_counts(out, genders)?,
        None => writeln!(out, "No gender data to share.")?,
    }

    writeln!(
        out,
        "\nWhat is the oldest, youngest, and most popular year of birth, respectively?"
    )?;
    match &stats.birth_years {
        Some(Ok(years)) => write_birth_years(out, years),
        Some(Err(err)) => write_empty(out, err),
        None => writeln!(out, "No birth year data to share."),
    }
}

fn write_section<W: Write, T>(
    out: &mut W,
    heading: &str,
    timed: &Timed<Result<T, StatsError>>,
    body: impl FnOnce(&mut W, &T) -> io::Result<()>,
) -> io::Result<()> {
    writeln!(out, "\n{heading}")?;
    match &timed.result {
        Ok(stats) => body(out, stats)?,
        Err(err) => write_empty(out, err)?,
    }
    write_footer(out, timed)
}

/// Print every analysis in the order the interactive tool always used.
pub fn write_report<W: Write>(out: &mut W, report: &StatsReport) -> io::Result<()> {
    write_section(
        out,
        "Calculating The Most Frequent Times of Travel...",
        &report.time,
        write_time,
    )?;
    write_section(
        out,
        "Calculating The Most Popular Stations and Trip...",
        &report.stations,
        write_stations,
    )?;
    write_section(
        out,
        "Calculating Trip Duration...",
        &report.trip_duration,
        write_duration,
    )?;

    writeln!(out, "\nCalculating User Stats...")?;
    write_users(out, &report.users.result)?;
    write_footer(out, &report.users)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    city: &'a str,
    month: String,
    day: String,
    trips: usize,
    #[serde(flatten)]
    stats: &'a StatsReport,
}

/// Write the report as pretty JSON, tagged with the city and filters.
pub fn write_json<W: Write>(
    out: &mut W,
    city: &str,
    selection: &FilterSelection,
    trips: usize,
    report: &StatsReport,
) -> io::Result<()> {
    let doc = JsonReport {
        city,
        month: selection.month.to_string(),
        day: selection.day.to_string(),
        trips,
        stats: report,
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Schema, TripRecord};
    use crate::stats::StatsCalculator;
    use chrono::NaiveDate;

    #[test]
    fn test_timedelta_whole_seconds() {
        assert_eq!(format_timedelta(360.0), "0 days 00:06:00");
        assert_eq!(format_timedelta(93_784.0), "1 days 02:03:04");
    }

    #[test]
    fn test_timedelta_fractional_seconds() {
        assert_eq!(format_timedelta(120.5), "0 days 00:02:00.500000");
    }

    #[test]
    fn test_timedelta_sub_microsecond_mean() {
        assert_eq!(format_timedelta(1000.0 / 3.0), "0 days 00:05:33.333333333");
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(6), "6 (June)");
        assert_eq!(month_label(13), "13");
    }

    fn sample() -> Dataset {
        let ts = NaiveDate::from_ymd_opt(2017, 6, 5)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap();
        Dataset::new(
            Schema::default(),
            vec![TripRecord::new(ts, "A", "B", 90.0).with_user_type(Some("Subscriber".into()))],
        )
    }

    #[test]
    fn test_text_report_without_demographics() {
        let data = sample();
        let report = StatsCalculator::analyze(&data, &FilterSelection::unfiltered());

        let mut out = Vec::new();
        write_report(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("6 (June) (count: 1)"));
        assert!(text.contains("A TO B (count: 1)"));
        assert!(text.contains("0 days 00:01:30"));
        assert!(text.contains("No gender data to share."));
        assert!(text.contains("No birth year data to share."));
        assert_eq!(text.matches(&separator()).count(), 4);
    }

    #[test]
    fn test_text_report_empty_dataset_is_friendly() {
        let report = StatsCalculator::analyze(&Dataset::default(), &FilterSelection::unfiltered());
        let mut out = Vec::new();
        write_report(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("No trips match the selected filters").count(), 3);
    }

    #[test]
    fn test_json_report_shape() {
        let data = sample();
        let selection = FilterSelection::unfiltered();
        let report = StatsCalculator::analyze(&data, &selection);

        let mut out = Vec::new();
        write_json(&mut out, "chicago", &selection, data.len(), &report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["city"], "chicago");
        assert_eq!(value["trips"], 1);
        assert_eq!(value["stations"]["result"]["Ok"]["popular_trip"]["value"], "A TO B");
        assert_eq!(value["trip_duration"]["result"]["Ok"]["total_seconds"], 90.0);
        assert!(value["users"]["result"].get("genders").is_none());
    }
}
