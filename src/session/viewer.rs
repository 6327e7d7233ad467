//! Raw Trip Viewer
//! Pages through a dataset five trips at a time as Polars tables.

use polars::prelude::*;

use crate::data::{
    Dataset, TripRecord, BIRTH_YEAR, END_STATION, END_TIME, GENDER, START_STATION, START_TIME,
    TRIP_DURATION, USER_TYPE,
};

pub const PAGE_SIZE: usize = 5;

fn text<F>(name: &str, rows: &[&TripRecord], value: F) -> Column
where
    F: Fn(&TripRecord) -> Option<String>,
{
    let values: Vec<Option<String>> = rows.iter().map(|&t| value(t)).collect();
    Column::new(name.into(), values)
}

/// Build the page of trips starting at `offset`, `None` past the end.
///
/// Only source columns are shown, selected by name; derived month, day and
/// hour never appear.
pub fn page_frame(dataset: &Dataset, offset: usize) -> PolarsResult<Option<DataFrame>> {
    let rows: Vec<&TripRecord> = dataset.iter().skip(offset).take(PAGE_SIZE).collect();
    if rows.is_empty() {
        return Ok(None);
    }
    let schema = dataset.schema();

    let mut columns = vec![text(START_TIME, &rows, |t| {
        Some(t.start_time().format("%Y-%m-%d %H:%M:%S").to_string())
    })];
    if schema.has_end_time {
        columns.push(text(END_TIME, &rows, |t| t.end_time.clone()));
    }
    columns.push(Column::new(
        TRIP_DURATION.into(),
        rows.iter().map(|t| t.trip_duration).collect::<Vec<f64>>(),
    ));
    columns.push(text(START_STATION, &rows, |t| Some(t.start_station.clone())));
    columns.push(text(END_STATION, &rows, |t| Some(t.end_station.clone())));
    columns.push(text(USER_TYPE, &rows, |t| t.user_type.clone()));
    if schema.has_gender {
        columns.push(text(GENDER, &rows, |t| t.gender.clone()));
    }
    if schema.has_birth_year {
        columns.push(Column::new(
            BIRTH_YEAR.into(),
            rows.iter().map(|t| t.birth_year).collect::<Vec<Option<i32>>>(),
        ));
    }

    DataFrame::new(columns).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Schema;
    use chrono::NaiveDate;

    fn dataset(n: usize, schema: Schema) -> Dataset {
        let records = (0..n)
            .map(|i| {
                let ts = NaiveDate::from_ymd_opt(2017, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, i as u32, 0)
                    .unwrap();
                TripRecord::new(ts, format!("S{i}"), "E", 60.0)
            })
            .collect();
        Dataset::new(schema, records)
    }

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names().iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pages_of_five() {
        let data = dataset(7, Schema::default());
        assert_eq!(page_frame(&data, 0).unwrap().unwrap().height(), 5);
        assert_eq!(page_frame(&data, 5).unwrap().unwrap().height(), 2);
        assert!(page_frame(&data, 10).unwrap().is_none());
    }

    #[test]
    fn test_projection_follows_schema() {
        let plain = page_frame(&dataset(1, Schema::default()), 0).unwrap().unwrap();
        assert_eq!(
            names(&plain),
            vec![START_TIME, TRIP_DURATION, START_STATION, END_STATION, USER_TYPE]
        );

        let full = Schema {
            has_end_time: true,
            has_gender: true,
            has_birth_year: true,
        };
        let rich = page_frame(&dataset(1, full), 0).unwrap().unwrap();
        assert_eq!(names(&rich).len(), 8);
        assert!(!names(&rich).iter().any(|n| n == "month" || n == "hour"));
    }
}
