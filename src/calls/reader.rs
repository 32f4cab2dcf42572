use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::path::Path;

use super::models::{CallRecord, RawRow, RawValue, FIELDS};
use crate::error::{ReportError, Result};

/// Accepted layouts for timestamps stored as text
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DATETIME_COLUMN: usize = 2;

/// Serial day of 9999-12-31, the last date Excel can hold
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Read every data row of the first worksheet, header excluded
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| ReportError::source_unavailable(path, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReportError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(|e| ReportError::source_unavailable(path, e))?;

    // Sheet row numbers are 1-based and the range may not start at A1
    let first_row = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);

    let rows: Vec<RawRow> = range
        .rows()
        .enumerate()
        .skip(1)
        .filter(|(_, cells)| cells.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|(idx, cells)| RawRow {
            row: first_row + idx,
            cells: cells
                .iter()
                .take(FIELDS.len())
                .enumerate()
                .map(|(col, cell)| coerce_cell(col, cell))
                .collect(),
        })
        .collect();

    tracing::debug!(path = %path.display(), rows = rows.len(), "read call log rows");
    Ok(rows)
}

/// Convert a sheet cell; floats are truncated except in the datetime column
fn coerce_cell(col: usize, cell: &Data) -> RawValue {
    match cell {
        Data::Empty => RawValue::Empty,
        Data::Int(n) => RawValue::Int(*n),
        Data::Float(f) if col == DATETIME_COLUMN => from_excel_serial(*f)
            .map(RawValue::DateTime)
            .unwrap_or(RawValue::Int(f.trunc() as i64)),
        Data::Float(f) => RawValue::Int(f.trunc() as i64),
        Data::String(s) => RawValue::Text(s.trim().to_string()),
        Data::Bool(b) => RawValue::Text(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(parsed) => RawValue::DateTime(parsed),
            None => RawValue::Int(dt.as_f64().trunc() as i64),
        },
        Data::DateTimeIso(s) => parse_datetime_text(s)
            .map(RawValue::DateTime)
            .unwrap_or_else(|| RawValue::Text(s.clone())),
        Data::DurationIso(s) => RawValue::Text(s.clone()),
        Data::Error(e) => RawValue::Text(e.to_string()),
    }
}

/// Excel serial day number (1900 date system) to a timestamp
fn from_excel_serial(days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() || !(0.0..=MAX_EXCEL_SERIAL + 1.0).contains(&days) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (days * 86_400.0).round() as i64;
    epoch.checked_add_signed(Duration::seconds(seconds))
}

fn parse_datetime_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

fn require<'a>(row: &'a RawRow, field: &'static str) -> Result<&'a RawValue> {
    row.get(field)
        .ok_or_else(|| ReportError::malformed(row.row, field, "is missing"))
}

/// Duration in whole seconds
pub fn parse_duration(row: &RawRow) -> Result<i64> {
    match require(row, "duration")? {
        RawValue::Int(n) => Ok(*n),
        RawValue::Text(s) if !s.is_empty() => s
            .parse::<i64>()
            .ok()
            .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
            .ok_or_else(|| ReportError::malformed(row.row, "duration", format!("is not a number: {s:?}"))),
        RawValue::DateTime(_) => Err(ReportError::malformed(row.row, "duration", "is a timestamp")),
        _ => Err(ReportError::malformed(row.row, "duration", "is empty")),
    }
}

fn parse_timestamp(row: &RawRow) -> Result<NaiveDateTime> {
    match require(row, "datetime")? {
        RawValue::DateTime(dt) => Ok(*dt),
        RawValue::Text(s) if !s.is_empty() => parse_datetime_text(s).ok_or_else(|| {
            ReportError::malformed(row.row, "datetime", format!("is not a timestamp: {s:?}"))
        }),
        RawValue::Int(n) => from_excel_serial(*n as f64).ok_or_else(|| {
            ReportError::malformed(row.row, "datetime", format!("is not a timestamp: {n}"))
        }),
        _ => Err(ReportError::malformed(row.row, "datetime", "is empty")),
    }
}

fn text_field(row: &RawRow, field: &'static str) -> Result<String> {
    Ok(require(row, field)?.to_text())
}

/// Keep rows whose duration exceeds `min_duration`
pub fn filter_rows(rows: Vec<RawRow>, min_duration: i64) -> Result<Vec<RawRow>> {
    let mut kept = Vec::with_capacity(rows.len());
    for row in rows {
        if parse_duration(&row)? > min_duration {
            kept.push(row);
        }
    }
    Ok(kept)
}

/// Turn a filtered row into a CallRecord
pub fn normalize_row(row: &RawRow) -> Result<CallRecord> {
    Ok(CallRecord {
        id: text_field(row, "id")?,
        sip: text_field(row, "sip")?,
        datetime: parse_timestamp(row)?,
        clid: text_field(row, "clid")?,
        number: text_field(row, "number")?,
        state: text_field(row, "state")?,
        duration: parse_duration(row)?,
    })
}

/// Raw rows to records, dropping short calls first
pub fn normalize_rows(rows: Vec<RawRow>, min_duration: i64) -> Result<Vec<CallRecord>> {
    let total = rows.len();
    let kept = filter_rows(rows, min_duration)?;
    tracing::debug!(total, kept = kept.len(), min_duration, "filtered short calls");
    kept.iter().map(normalize_row).collect()
}

/// Read and normalize a call-log file
pub fn load_call_records(path: &Path, min_duration: i64) -> Result<Vec<CallRecord>> {
    if !path.is_file() {
        return Err(ReportError::source_unavailable(path, "no such file"));
    }
    let records = normalize_rows(read_rows(path)?, min_duration)?;
    tracing::info!(path = %path.display(), records = records.len(), "loaded call log");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(row: usize, cells: Vec<RawValue>) -> RawRow {
        RawRow { row, cells }
    }

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    fn full_row(n: usize, datetime: &str, number: &str, duration: i64) -> RawRow {
        row(
            n,
            vec![
                RawValue::Int(n as i64),
                RawValue::Int(101),
                text(datetime),
                RawValue::Empty,
                text(number),
                text("ANSWERED"),
                RawValue::Int(duration),
            ],
        )
    }

    #[test]
    fn floats_are_truncated_outside_datetime() {
        assert_eq!(coerce_cell(4, &Data::Float(110.9)), RawValue::Int(110));
        assert_eq!(coerce_cell(6, &Data::Float(10.99)), RawValue::Int(10));
    }

    #[test]
    fn float_datetime_is_an_excel_serial() {
        // 2024-01-15 18:00:00
        let value = coerce_cell(DATETIME_COLUMN, &Data::Float(45306.75));
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        assert_eq!(value, RawValue::DateTime(expected));
    }

    #[test]
    fn text_timestamps_in_several_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(parse_datetime_text("2024-01-15 09:05:00"), Some(expected));
        assert_eq!(parse_datetime_text("15.01.2024 09:05"), Some(expected));
        assert_eq!(parse_datetime_text("yesterday"), None);
    }

    #[test]
    fn short_calls_are_dropped_before_validation() {
        let rows = vec![
            full_row(2, "2024-01-15 09:00:00", "incoming", 20),
            full_row(3, "garbage", "incoming", 5),
            full_row(4, "2024-01-15 09:00:00", "110", 10),
        ];
        let records = normalize_rows(rows, 10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "2");
        assert_eq!(records[0].sip, "101");
        assert_eq!(records[0].clid, "");
    }

    #[test]
    fn fractional_duration_is_truncated_before_the_filter() {
        let mut kept = full_row(2, "2024-01-15 09:00:00", "110", 0);
        kept.cells[6] = coerce_cell(6, &Data::Float(11.2));
        let mut dropped = full_row(3, "2024-01-15 09:00:00", "110", 0);
        dropped.cells[6] = coerce_cell(6, &Data::Float(10.7));

        let records = normalize_rows(vec![kept, dropped], 10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "2");
        assert_eq!(records[0].duration, 11);
    }

    #[test]
    fn missing_column_is_malformed() {
        let short = row(7, vec![RawValue::Int(1), RawValue::Int(101)]);
        match normalize_rows(vec![short], 10) {
            Err(ReportError::MalformedRecord { row, field, .. }) => {
                assert_eq!(row, 7);
                assert_eq!(field, "duration");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn bad_timestamp_on_long_call_is_malformed() {
        let rows = vec![full_row(5, "not a date", "110", 30)];
        match normalize_rows(rows, 10) {
            Err(ReportError::MalformedRecord { row, field, .. }) => {
                assert_eq!(row, 5);
                assert_eq!(field, "datetime");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn duration_text_is_coerced() {
        let mut r = full_row(2, "2024-01-15 09:00:00", "110", 0);
        r.cells[6] = text("42.7");
        assert_eq!(parse_duration(&r).unwrap(), 42);
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let err = load_call_records(Path::new("/nonexistent/01.02.2024.xlsx"), 10).unwrap_err();
        assert!(matches!(err, ReportError::SourceUnavailable { .. }));
    }
}
