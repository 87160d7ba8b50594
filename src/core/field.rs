//! Field value types, ordering and format checks

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Serde helper: an explicit `null` reads the same as a missing field
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A polymorphic field value read off a record for sorting and display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a float if it is numeric
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Total order across values.
    ///
    /// Numbers compare numerically (integers and floats together), strings
    /// lexicographically and dates chronologically. `Null` sorts first.
    /// Values of different kinds fall back to a fixed kind ranking.
    pub fn total_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.kind_rank().cmp(&b.kind_rank()),
            },
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Integer(_) | FieldValue::Float(_) => 1,
            FieldValue::String(_) => 2,
            FieldValue::DateTime(_) => 3,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<Option<DateTime<Utc>>> for FieldValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::DateTime)
    }
}

/// Field format validators
#[derive(Debug, Clone)]
pub enum FieldFormat {
    /// Something `@` something `.` something, no whitespace
    Email,
    /// Exactly ten ASCII digits
    Phone,
    Custom(Regex),
}

impl FieldFormat {
    /// Check a raw string against this format
    pub fn matches(&self, value: &str) -> bool {
        match self {
            FieldFormat::Email => Self::is_valid_email(value),
            FieldFormat::Phone => Self::is_valid_phone(value),
            FieldFormat::Custom(regex) => regex.is_match(value),
        }
    }

    /// Validate a field value against this format
    pub fn validate(&self, value: &FieldValue) -> bool {
        value.as_string().is_some_and(|s| self.matches(s))
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());
        regex.is_match(email)
    }

    fn is_valid_phone(phone: &str) -> bool {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PHONE_REGEX.get_or_init(|| Regex::new(r"^\d{10}$").unwrap());
        regex.is_match(phone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::String("test".to_string());
        assert_eq!(value.as_string(), Some("test"));
        assert_eq!(value.as_f64(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let ten = FieldValue::Integer(10);
        let nine_and_half = FieldValue::Float(9.5);
        assert_eq!(ten.total_cmp(&nine_and_half), Ordering::Greater);
        assert_eq!(
            FieldValue::Integer(2).total_cmp(&FieldValue::Integer(10)),
            Ordering::Less
        );
    }

    #[test]
    fn test_strings_compare_lexicographically() {
        let a = FieldValue::from("CoconutHusk");
        let b = FieldValue::from("CoconutShell");
        assert_eq!(a.total_cmp(&b), Ordering::Less);
    }

    #[test]
    fn test_dates_compare_chronologically() {
        let early = FieldValue::DateTime(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let late = FieldValue::DateTime(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        assert_eq!(early.total_cmp(&late), Ordering::Less);
        assert_eq!(late.total_cmp(&early), Ordering::Greater);
    }

    #[test]
    fn test_null_sorts_first() {
        assert_eq!(
            FieldValue::Null.total_cmp(&FieldValue::Integer(-5)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::from("a").total_cmp(&FieldValue::Null),
            Ordering::Greater
        );
        assert_eq!(FieldValue::Null.total_cmp(&FieldValue::Null), Ordering::Equal);
    }

    #[test]
    fn test_nan_has_a_place() {
        let nan = FieldValue::Float(f64::NAN);
        let one = FieldValue::Float(1.0);
        assert_eq!(nan.total_cmp(&nan), Ordering::Equal);
        assert_ne!(nan.total_cmp(&one), Ordering::Equal);
    }

    #[test]
    fn test_email_format() {
        let format = FieldFormat::Email;
        assert!(format.matches("test@example.com"));
        assert!(format.matches("user.name+tag@example.co.uk"));
        assert!(!format.matches("invalid-email"));
        assert!(!format.matches("john@example"));
        assert!(!format.matches("john doe@example.com"));
    }

    #[test]
    fn test_phone_format() {
        let format = FieldFormat::Phone;
        assert!(format.matches("0771234567"));
        assert!(!format.matches("077123456"));
        assert!(!format.matches("07712345678"));
        assert!(!format.matches("077-123-4567"));
    }

    #[test]
    fn test_custom_regex_validation() {
        let format = FieldFormat::Custom(Regex::new(r"^EMP\d{3}$").unwrap());
        assert!(format.validate(&FieldValue::from("EMP001")));
        assert!(!format.validate(&FieldValue::from("emp001")));
        assert!(!format.validate(&FieldValue::Integer(1)));
    }
}
