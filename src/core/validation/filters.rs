//! Reusable field filters
//!
//! Filters normalize a raw value before validation runs. They only change
//! representation (whitespace, number vs numeric text); anything that would
//! fail a rule is left for the validators to reject.

use serde_json::{Value, json};

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other,
    }
}

/// Filter: render a bare JSON number as its text, for fields stored as text
pub fn number_as_text() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| match value {
        Value::Number(n) => Value::String(n.to_string()),
        other => other,
    }
}

/// Filter: turn numeric text into a JSON number.
///
/// Blank text becomes `null` so `required` reports it; text that still does
/// not parse is left alone for the validators to reject.
pub fn parse_number() -> impl Fn(Value) -> Value + Send + Sync + Clone {
    |value: Value| match value {
        Value::String(s) if s.trim().is_empty() => Value::Null,
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => json!(n as i64),
            Ok(n) => json!(n),
            Err(_) => Value::String(s),
        },
        other => other,
    }
}

/// Filter: map text through a canonicalizing function, leaving unknown text untouched
pub fn canonical(
    canon: fn(&str) -> Option<&'static str>,
) -> impl Fn(Value) -> Value + Send + Sync + Clone {
    move |value: Value| match value {
        Value::String(s) => match canon(&s) {
            Some(canonical) => Value::String(canonical.to_string()),
            None => Value::String(s),
        },
        other => other,
    }
}

/// Filter: round number to specified decimal places
pub fn round_decimals(decimals: u32) -> impl Fn(Value) -> Value + Send + Sync + Clone {
    move |value: Value| {
        if value.is_i64() || value.is_u64() {
            return value;
        }
        match value.as_f64() {
            Some(num) => {
                let factor = 10_f64.powi(decimals as i32);
                json!((num * factor).round() / factor)
            }
            None => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === trim() ===

    #[test]
    fn test_trim_removes_whitespace() {
        let f = trim();
        assert_eq!(f(json!("  hello  ")), json!("hello"));
    }

    #[test]
    fn test_trim_non_string_passthrough() {
        let f = trim();
        assert_eq!(f(json!(42)), json!(42));
        assert_eq!(f(json!(null)), json!(null));
    }

    // === number_as_text() ===

    #[test]
    fn test_number_as_text() {
        let f = number_as_text();
        assert_eq!(f(json!(771234567)), json!("771234567"));
        assert_eq!(f(json!("077-123")), json!("077-123"));
        assert_eq!(f(json!(null)), json!(null));
    }

    // === parse_number() ===

    #[test]
    fn test_parse_number_integer_and_float() {
        let f = parse_number();
        assert_eq!(f(json!("5")), json!(5));
        assert_eq!(f(json!("2.5")), json!(2.5));
        assert_eq!(f(json!(7)), json!(7));
    }

    #[test]
    fn test_parse_number_blank_is_null() {
        let f = parse_number();
        assert_eq!(f(json!("")), json!(null));
        assert_eq!(f(json!("  ")), json!(null));
    }

    #[test]
    fn test_parse_number_garbage_left_alone() {
        let f = parse_number();
        assert_eq!(f(json!("five")), json!("five"));
        assert_eq!(f(json!("abc12")), json!("abc12"));
    }

    #[test]
    fn test_parse_number_keeps_sign() {
        let f = parse_number();
        assert_eq!(f(json!("-5")), json!(-5));
        assert_eq!(f(json!(" 12.5 ")), json!(12.5));
    }

    // === canonical() ===

    #[test]
    fn test_canonical_maps_known_text() {
        fn canon(s: &str) -> Option<&'static str> {
            s.eq_ignore_ascii_case("pending").then_some("Pending")
        }
        let f = canonical(canon);
        assert_eq!(f(json!("PENDING")), json!("Pending"));
        assert_eq!(f(json!("Lost")), json!("Lost"));
    }

    // === round_decimals() ===

    #[test]
    fn test_round_decimals_two_places() {
        let f = round_decimals(2);
        assert_eq!(f(json!(3.14159)), json!(3.14));
    }

    #[test]
    fn test_round_decimals_integer_unchanged() {
        let f = round_decimals(2);
        assert_eq!(f(json!(1500)), json!(1500));
    }

    #[test]
    fn test_round_decimals_non_number_passthrough() {
        let f = round_decimals(2);
        assert_eq!(f(json!("hello")), json!("hello"));
    }
}
