// ============================================================
// Layer 4b — Calendar Features
// ============================================================
// Turns the `date` column into four integer fields:
//
//   year, month (1-12), day (1-31), weekday (Monday = 0 … Sunday = 6)
//
// Parsing is total ("coerce" policy): a cell that is missing or
// does not match any accepted layout yields no fields at all for
// that row. A row therefore has either all four values or none of
// them, and a bad date never raises an error.
//
// Accepted layouts, tried in order:
//   2024-03-05T14:30:00Z / 2024-03-05T14:30:00+02:00   (RFC 3339)
//   2024-03-05 14:30:00+0200
//   2024-03-05T14:30:00.123 / 2024-03-05 14:30:00
//   2024-03-05T14:30 / 2024-03-05 14:30
//   2024/03/05 14:30:00, 03/05/2024 14:30[:00]
//   2024-03-05, 2024/03/05, 03/05/2024
//
// Timestamps with an offset report the wall-clock date in that
// offset, not in UTC.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::domain::error::PipelineResult;
use crate::domain::table::PostTable;

const OFFSET_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// The four derived fields of one parsed timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    pub year:    i32,
    pub month:   u32,
    pub day:     u32,
    /// Monday = 0 … Sunday = 6
    pub weekday: u32,
}

impl CalendarFields {
    fn from_datetime(dt: NaiveDateTime) -> Self {
        Self {
            year:    dt.year(),
            month:   dt.month(),
            day:     dt.day(),
            weekday: dt.weekday().num_days_from_monday(),
        }
    }
}

/// Parse one raw cell. Returns None for anything unrecognised.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(s, layout) {
            return Some(dt.naive_local());
        }
    }
    for layout in DATETIME_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(dt);
        }
    }
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(s, layout).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Per-row calendar fields for a whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarFeatures {
    rows: Vec<Option<CalendarFields>>,
}

impl CalendarFeatures {
    /// Parse every cell of `column`. Fails only if the column is absent.
    pub fn extract(table: &PostTable, column: &str) -> PipelineResult<Self> {
        let rows: Vec<_> = table
            .column(column)?
            .into_iter()
            .map(|cell| cell.and_then(parse_timestamp).map(CalendarFields::from_datetime))
            .collect();

        let features = Self { rows };
        let unparsed = features.unparsed();
        if unparsed > 0 {
            tracing::warn!(
                "{} of {} '{}' values could not be parsed; their calendar fields are undefined",
                unparsed,
                features.len(),
                column,
            );
        }
        Ok(features)
    }

    pub fn rows(&self) -> &[Option<CalendarFields>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose date was missing or unparsable.
    pub fn unparsed(&self) -> usize {
        self.rows.iter().filter(|r| r.is_none()).count()
    }

    /// The four fields as float columns [year, month, day, weekday],
    /// NaN where undefined.
    pub fn to_columns(&self) -> [Vec<f64>; 4] {
        let pick = |f: fn(&CalendarFields) -> f64| -> Vec<f64> {
            self.rows.iter().map(|r| r.as_ref().map_or(f64::NAN, f)).collect()
        };
        [
            pick(|c| c.year as f64),
            pick(|c| c.month as f64),
            pick(|c| c.day as f64),
            pick(|c| c.weekday as f64),
        ]
    }
}

/// Calendar fields of the standard `date` column.
pub fn extract_date_features(table: &PostTable) -> PipelineResult<CalendarFeatures> {
    CalendarFeatures::extract(table, crate::domain::columns::DATE)
}
