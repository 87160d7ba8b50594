//! Collection filter: free-text search, creation-date range, exact field match

use crate::core::record::Record;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive creation-date range. An absent bound imposes no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Calendar-day bounds: `start` from 00:00:00, `end` through 23:59:59.999
    pub fn from_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.map(start_of_day),
            end: end.map(end_of_day),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether a creation time falls inside the range.
    ///
    /// A record without a timestamp only matches the empty range.
    pub fn contains(&self, at: Option<DateTime<Utc>>) -> bool {
        if self.is_empty() {
            return true;
        }
        let Some(at) = at else {
            return false;
        };
        self.start.is_none_or(|start| at >= start) && self.end.is_none_or(|end| at <= end)
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(last).and_utc()
}

/// Parse one range bound: an RFC 3339 timestamp, or a `YYYY-MM-DD` date
/// widened to the start (or end) of that day.
pub fn parse_bound(raw: &str, end_of_range: bool) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(if end_of_range {
        end_of_day(date)
    } else {
        start_of_day(date)
    })
}

/// What a table view is restricted to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring over the record's searchable fields
    pub search: String,
    pub date_range: DateRange,
    /// Exact text matches on named fields; an empty value is no constraint
    pub equals: Vec<(String, String)>,
}

impl FilterCriteria {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..Self::default()
        }
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    pub fn with_equals(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.equals.push((field.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.date_range.is_empty()
            && self.equals.iter().all(|(_, value)| value.is_empty())
    }

    pub fn matches<T: Record>(&self, record: &T) -> bool {
        self.matches_prepared(record, &self.search.to_lowercase())
    }

    fn matches_prepared<T: Record>(&self, record: &T, needle: &str) -> bool {
        (needle.is_empty() || record.matches_search(needle))
            && self.date_range.contains(record.created_at())
            && self.equals.iter().all(|(field, expected)| {
                expected.is_empty()
                    || record
                        .field_value(field)
                        .as_ref()
                        .and_then(|value| value.as_string())
                        .is_some_and(|actual| actual == expected)
            })
    }
}

/// Records matching the criteria, in their original order
pub fn filter_records<T: Record>(records: &[T], criteria: &FilterCriteria) -> Vec<T> {
    if criteria.is_empty() {
        return records.to_vec();
    }
    let needle = criteria.search.to_lowercase();
    records
        .iter()
        .filter(|record| criteria.matches_prepared(*record, &needle))
        .cloned()
        .collect()
}
