//! Calendar feature derivation from timestamp columns.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::{DataError, Result};
use crate::frame::{Column, PanelFrame};

/// Name of the derived year column for a time column.
#[must_use]
pub fn year_column_name(time_col: &str) -> String {
    format!("{time_col}_year")
}

/// Name of the derived month column for a time column.
#[must_use]
pub fn month_column_name(time_col: &str) -> String {
    format!("{time_col}_month")
}

/// Derive `<time_col>_year` and `<time_col>_month` from a calendar time
/// column and append them as float columns. Returns the two appended names.
///
/// Must run before any per-entity segmentation, so the derived columns are
/// visible wherever future covariates are assembled. String columns are
/// parsed (`%Y-%m-%d`, ISO date-times, RFC 3339); integer columns are taken
/// as Unix timestamps in seconds.
pub fn append_calendar_features(
    frame: &mut PanelFrame,
    time_col: &str,
) -> Result<(String, String)> {
    let column = frame
        .column(time_col)
        .ok_or_else(|| DataError::ColumnNotFound(time_col.to_string()))?;

    let mut years = Vec::with_capacity(column.len());
    let mut months = Vec::with_capacity(column.len());
    match column {
        Column::Str(raw) => {
            for value in raw {
                let (year, month) = parse_timestamp(value)?;
                years.push(year as f32);
                months.push(month as f32);
            }
        }
        Column::Int(stamps) => {
            for &stamp in stamps {
                let parsed = DateTime::from_timestamp(stamp, 0).ok_or_else(|| {
                    DataError::Parse(format!("timestamp out of range: {stamp}"))
                })?;
                years.push(parsed.year() as f32);
                months.push(parsed.month() as f32);
            }
        }
        Column::Float(_) => {
            return Err(DataError::TypeMismatch {
                column: time_col.to_string(),
                expected: "calendar strings or integer timestamps",
            });
        }
    }

    let year_name = year_column_name(time_col);
    let month_name = month_column_name(time_col);
    frame.set_float_column(&year_name, years)?;
    frame.set_float_column(&month_name, months)?;
    Ok((year_name, month_name))
}

fn parse_timestamp(value: &str) -> Result<(i32, u32)> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok((date.year(), date.month()));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(value, format) {
            return Ok((stamp.year(), stamp.month()));
        }
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Ok((stamp.year(), stamp.month()));
    }
    Err(DataError::Parse(format!(
        "unrecognized timestamp: {value:?}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date_frame(values: Vec<&str>) -> PanelFrame {
        PanelFrame::new(vec![(
            "ds".to_string(),
            Column::Str(values.into_iter().map(String::from).collect()),
        )])
        .unwrap()
    }

    #[test]
    fn test_derives_year_and_month() {
        let mut frame = date_frame(vec!["2023-01-15", "2024-11-03"]);
        let (year_name, month_name) = append_calendar_features(&mut frame, "ds").unwrap();
        assert_eq!(year_name, "ds_year");
        assert_eq!(month_name, "ds_month");
        assert_eq!(frame.float_values("ds_year").unwrap(), vec![2023.0, 2024.0]);
        assert_eq!(frame.float_values("ds_month").unwrap(), vec![1.0, 11.0]);
    }

    #[test]
    fn test_datetime_formats() {
        let mut frame = date_frame(vec![
            "2022-06-01T08:30:00",
            "2022-07-02 09:15:00",
            "2022-08-03T10:00:00+02:00",
        ]);
        append_calendar_features(&mut frame, "ds").unwrap();
        assert_eq!(
            frame.float_values("ds_month").unwrap(),
            vec![6.0, 7.0, 8.0]
        );
    }

    #[test]
    fn test_unix_timestamp_column() {
        let mut frame = PanelFrame::new(vec![(
            "ds".to_string(),
            // 2021-03-01T00:00:00Z
            Column::Int(vec![1_614_556_800]),
        )])
        .unwrap();
        append_calendar_features(&mut frame, "ds").unwrap();
        assert_eq!(frame.float_values("ds_year").unwrap(), vec![2021.0]);
        assert_eq!(frame.float_values("ds_month").unwrap(), vec![3.0]);
    }

    #[test]
    fn test_unparseable_value() {
        let mut frame = date_frame(vec!["yesterday"]);
        let err = append_calendar_features(&mut frame, "ds").unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }
}
