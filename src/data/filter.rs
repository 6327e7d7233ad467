//! Trip Filter
//! Month and day-of-week restriction of a loaded dataset.

use log::debug;

use super::model::Dataset;
use super::selector::FilterSelection;

/// Return a new dataset holding only the trips that match `selection`.
///
/// A trip passes when:
/// * the month filter is `All`, or the trip's month equals the selected month
/// * the day filter is `All`, or the trip's weekday name equals the selected day
///
/// Row order is preserved and the input is left untouched. No match yields an
/// empty dataset with the same schema.
pub fn apply_filter(dataset: &Dataset, selection: &FilterSelection) -> Dataset {
    let month = selection.month.month_number();
    let day = selection.day.day_name();

    let records: Vec<_> = dataset
        .iter()
        .filter(|trip| month.map_or(true, |m| trip.month() == m))
        .filter(|trip| day.map_or(true, |d| trip.day_name() == d))
        .cloned()
        .collect();

    debug!(
        "Filter month={} day={} kept {} of {} trips",
        selection.month,
        selection.day,
        records.len(),
        dataset.len()
    );

    Dataset::new(dataset.schema(), records)
}
