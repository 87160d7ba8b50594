//! Record trait: the view the table engine and the store have of a row

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};

/// A row of a dashboard collection (an order, an employee).
///
/// Everything the filter, sorter and store need is reached through this
/// trait, so they stay generic over the record type.
pub trait Record: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g. "orders")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g. "order")
    fn resource_name_singular() -> &'static str;

    /// Opaque identifier
    fn id(&self) -> &str;

    /// Assign the identifier (done once, by the store, on create)
    fn set_id(&mut self, id: String);

    /// Creation timestamp, if the record carries one
    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// Fields consulted by free-text search
    fn searchable_fields() -> &'static [&'static str];

    /// Read a field by its wire name.
    ///
    /// `None` means the record has no such field; `Some(FieldValue::Null)`
    /// means the field exists but holds nothing.
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Text fields no two stored records may share, checked by the store
    fn unique_fields() -> &'static [&'static str] {
        &[]
    }

    /// Case-insensitive substring match over [`Record::searchable_fields`].
    ///
    /// `needle` must already be lowercase. Absent or non-text fields never match.
    fn matches_search(&self, needle: &str) -> bool {
        Self::searchable_fields().iter().any(|field| {
            self.field_value(field)
                .as_ref()
                .and_then(FieldValue::as_string)
                .is_some_and(|text| text.to_lowercase().contains(needle))
        })
    }
}
