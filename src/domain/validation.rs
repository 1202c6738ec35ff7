//! Field rule primitives shared by the entity validators.
//!
//! Each helper checks one rule and fails with the supplied code, so an
//! entity validator is a fixed sequence of calls that stops at the first
//! violation.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::EIK_LENGTH;
use crate::errors::{AppError, AppResult, ErrorCode};

/// Nine ASCII digits, nothing else.
pub static EIK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^[0-9]{{{}}}$", EIK_LENGTH)).expect("valid EIK regex"));

pub static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// True when the value is absent or contains only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Require a non-blank value, returning it unchanged.
pub fn require(value: Option<String>, code: ErrorCode) -> AppResult<String> {
    match value {
        Some(v) if !is_blank(Some(v.as_str())) => Ok(v),
        _ => Err(AppError::Validation(code)),
    }
}

/// Fail when the value is longer than `max` characters.
pub fn max_chars(value: &str, max: usize, code: ErrorCode) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::Validation(code));
    }
    Ok(())
}

/// Fail unless the value is exactly `len` characters long.
pub fn exact_chars(value: &str, len: usize, code: ErrorCode) -> AppResult<()> {
    if value.chars().count() != len {
        return Err(AppError::Validation(code));
    }
    Ok(())
}

/// Fail unless every character is an ASCII digit.
pub fn ascii_digits(value: &str, code: ErrorCode) -> AppResult<()> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::Validation(code));
    }
    Ok(())
}

/// Fail unless the whole value matches `pattern`.
pub fn matches(value: &str, pattern: &Regex, code: ErrorCode) -> AppResult<()> {
    if !pattern.is_match(value) {
        return Err(AppError::Validation(code));
    }
    Ok(())
}
