//! Collection sorter

use crate::core::field::FieldValue;
use crate::core::record::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Asc),
            "desc" | "descending" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Sort column and direction. No key means collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// Newest orders first
    pub fn newest_first() -> Self {
        Self::new("createdAt", SortDirection::Desc)
    }

    /// Column-header click: same ascending column flips to descending,
    /// anything else sorts the clicked column ascending.
    pub fn toggle(&self, key: &str) -> Self {
        let direction = match (&self.key, self.direction) {
            (Some(current), SortDirection::Asc) if current == key => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Self::new(key, direction)
    }
}

/// A sorted copy of `records`.
///
/// Stable; absent values come before present ones when ascending. A key no
/// record knows leaves the order unchanged.
pub fn sort_records<T: Record>(records: &[T], config: &SortConfig) -> Vec<T> {
    let Some(key) = config.key.as_deref() else {
        return records.to_vec();
    };

    let mut keyed: Vec<(FieldValue, &T)> = records
        .iter()
        .map(|record| (record.field_value(key).unwrap_or(FieldValue::Null), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| config.direction.apply(a.total_cmp(b)));

    keyed.into_iter().map(|(_, record)| record.clone()).collect()
}
