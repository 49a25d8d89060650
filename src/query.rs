//! Query-string construction for the appointments list and cancel endpoints.
//!
//! `QueryParams` keeps insertion order and lets a later `set` overwrite an
//! earlier one in place. The date precedence of `AppointmentFilter` relies on
//! that: the day expansion of `date` is written first, explicit
//! `start_date`/`end_date` afterwards.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::models::AppointmentFilter;

pub const PATIENT_ID: &str = "patient_id";
pub const DOCTOR_ID: &str = "doctor_id";
pub const START_DATE: &str = "start_date";
pub const END_DATE: &str = "end_date";
pub const CANCEL_REASON: &str = "cancel_reason";

/// Timestamp layout the backend parses for `start_date`/`end_date`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Characters escaped in a query value. `:` and `/` are legal in a query
/// component and stay literal, so timestamps read as-is.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

// ═══════════════════════════════════════════════════════════
// QueryParams
// ═══════════════════════════════════════════════════════════

/// Ordered query parameters with last-assignment-wins semantics per key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `key`. An existing key keeps its position and takes the new value.
    pub fn set(&mut self, key: &'static str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Assign `key` only for a present, non-empty value.
    pub fn set_opt(&mut self, key: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.set(key, v);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `key=value&key=value`, values percent-encoded.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{k}={}", utf8_percent_encode(v, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `path` with the encoded query appended; the bare path when empty.
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", self.encode())
        }
    }
}

/// Build the list query for a filter.
///
/// Order: `patient_id`, `doctor_id`, then the range. `date` expands to the
/// whole day first; explicit `start_date`/`end_date` then overwrite it.
/// `status` is never sent.
pub fn filter_query(filter: &AppointmentFilter) -> QueryParams {
    let mut params = QueryParams::new();
    params
        .set_opt(PATIENT_ID, filter.patient_id.as_deref())
        .set_opt(DOCTOR_ID, filter.doctor_id.as_deref());

    if let Some(day) = filter.date.and_then(DayRange::of) {
        params
            .set(START_DATE, format_timestamp(&day.start))
            .set(END_DATE, format_timestamp(&day.end));
    }

    params
        .set_opt(START_DATE, filter.start_date.as_deref())
        .set_opt(END_DATE, filter.end_date.as_deref());

    params
}

/// Query for `DELETE /appointments/{id}`.
pub fn cancel_query(reason: Option<&str>) -> QueryParams {
    let mut params = QueryParams::new();
    params.set_opt(CANCEL_REASON, reason);
    params
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

// ═══════════════════════════════════════════════════════════
// Date ranges
// ═══════════════════════════════════════════════════════════

/// Inclusive range with second precision: first instant 00:00:00, last 23:59:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DayRange {
    /// A single calendar day.
    pub fn of(date: NaiveDate) -> Option<Self> {
        Self::spanning(date, date)
    }

    fn spanning(first: NaiveDate, last: NaiveDate) -> Option<Self> {
        Some(Self {
            start: first.and_hms_opt(0, 0, 0)?,
            end: last.and_hms_opt(23, 59, 59)?,
        })
    }

    /// The calendar month `month` (1-12) of `year`. `None` for an invalid month.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = last_day_of_month(first)?;
        Self::spanning(first, last)
    }

    /// Filter selecting this range through `start_date`/`end_date`.
    pub fn to_filter(&self) -> AppointmentFilter {
        AppointmentFilter {
            start_date: Some(format_timestamp(&self.start)),
            end_date: Some(format_timestamp(&self.end)),
            ..Default::default()
        }
    }
}

/// Day before the first of the following month.
fn last_day_of_month(first: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = match first.month() {
        12 => (first.year() + 1, 1),
        m => (first.year(), m + 1),
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
