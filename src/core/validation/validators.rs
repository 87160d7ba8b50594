//! Reusable field validators
//!
//! Each validator checks one constraint and returns the message shown next
//! to the field when it fails. Validators ignore values of a type they do
//! not understand; `required` is the only one that rejects a missing value.

use crate::core::field::FieldFormat;
use serde_json::Value;

/// Validator: value is present and not blank
pub fn required(
    message: &'static str,
) -> impl Fn(&Value) -> Result<(), String> + Send + Sync + Clone {
    move |value: &Value| match value {
        Value::Null => Err(message.to_string()),
        Value::String(s) if s.trim().is_empty() => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: value is a JSON number (absent values pass)
pub fn number(
    message: &'static str,
) -> impl Fn(&Value) -> Result<(), String> + Send + Sync + Clone {
    move |value: &Value| match value {
        Value::Null | Value::Number(_) => Ok(()),
        _ => Err(message.to_string()),
    }
}

/// Validator: number is strictly greater than zero
pub fn positive(
    message: &'static str,
) -> impl Fn(&Value) -> Result<(), String> + Send + Sync + Clone {
    move |value: &Value| match value.as_f64() {
        Some(num) if num <= 0.0 => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: number is zero or more
pub fn non_negative(
    message: &'static str,
) -> impl Fn(&Value) -> Result<(), String> + Send + Sync + Clone {
    move |value: &Value| match value.as_f64() {
        Some(num) if num < 0.0 => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: number has no fractional part
pub fn whole_number(
    message: &'static str,
) -> impl Fn(&Value) -> Result<(), String> + Send + Sync + Clone {
    move |value: &Value| match value.as_f64() {
        Some(num) if num.fract() != 0.0 => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: text matches a format
pub fn format(
    format: FieldFormat,
    message: &'static str,
) -> impl Fn(&Value) -> Result<(), String> + Send + Sync + Clone {
    move |value: &Value| match value.as_str() {
        Some(s) if !format.matches(s) => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: text contains a character
pub fn contains_char(
    needle: char,
    message: &'static str,
) -> impl Fn(&Value) -> Result<(), String> + Send + Sync + Clone {
    move |value: &Value| match value.as_str() {
        Some(s) if !s.contains(needle) => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: text is at least `min` characters long
pub fn min_length(
    min: usize,
    message: &'static str,
) -> impl Fn(&Value) -> Result<(), String> + Send + Sync + Clone {
    move |value: &Value| match value.as_str() {
        Some(s) if s.chars().count() < min => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: Vec<String>,
    message: &'static str,
) -> impl Fn(&Value) -> Result<(), String> + Send + Sync + Clone {
    move |value: &Value| match value.as_str() {
        Some(s) if !allowed.iter().any(|a| a == s) => Err(message.to_string()),
        _ => Ok(()),
    }
}
