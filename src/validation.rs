//! Form validation helpers shared by the author and genre forms

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

/// A single rejected field, as shown next to the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// A submitted form: sanitized first, then validated field by field.
pub trait FormInput: Validate {
    /// Field names in display order; errors are reported in this order.
    const FIELDS: &'static [&'static str];

    fn sanitized(self) -> Self;

    fn errors(&self) -> Vec<FieldError> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => ordered_errors(&errors, Self::FIELDS),
        }
    }
}

/// Flatten `ValidationErrors` following `fields`, keeping rule order within a field.
pub fn ordered_errors(errors: &ValidationErrors, fields: &[&'static str]) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    fields
        .iter()
        .filter_map(|field| by_field.get(*field).map(|errs| (*field, errs)))
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect()
}

/// Trim a text field in place
pub fn trim(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

/// Blank input means "no value"
pub fn non_blank(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

/// ASCII letters and digits only; the empty string does not qualify.
pub fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Accepts `YYYY-MM-DD`, optionally followed by an ISO-8601 time part.
pub fn parse_iso8601_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|datetime| datetime.date())
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Longest name the author columns hold
pub const NAME_MAX_CHARS: usize = 100;

/// Alphanumeric, and no longer than the column allows
fn name_chars(
    value: &str,
    non_alphanumeric: &'static str,
    too_long: &'static str,
) -> Result<(), ValidationError> {
    if !is_alphanumeric(value) {
        Err(rule("alphanumeric", non_alphanumeric))
    } else if value.chars().count() > NAME_MAX_CHARS {
        Err(rule("length", too_long))
    } else {
        Ok(())
    }
}

pub fn first_name_chars(value: &str) -> Result<(), ValidationError> {
    name_chars(
        value,
        "First name has non-alphanumeric characters.",
        "First name must not exceed 100 characters.",
    )
}

pub fn family_name_chars(value: &str) -> Result<(), ValidationError> {
    name_chars(
        value,
        "Family name has non-alphanumeric characters.",
        "Family name must not exceed 100 characters.",
    )
}

/// Dates are optional: a blank value passes.
fn optional_date(value: &str, message: &'static str) -> Result<(), ValidationError> {
    match non_blank(value) {
        Some(date) if parse_iso8601_date(date).is_none() => Err(rule("iso8601", message)),
        _ => Ok(()),
    }
}

pub fn birth_date_iso8601(value: &str) -> Result<(), ValidationError> {
    optional_date(value, "Invalid date of birth")
}

pub fn death_date_iso8601(value: &str) -> Result<(), ValidationError> {
    optional_date(value, "Invalid date of death")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_alphanumeric() {
        assert!(is_alphanumeric("John2"));
        assert!(!is_alphanumeric("John2!"));
        assert!(!is_alphanumeric("Jean Paul"));
        assert!(!is_alphanumeric(""));
    }

    #[test]
    fn test_name_length_limit() {
        assert!(first_name_chars(&"a".repeat(NAME_MAX_CHARS)).is_ok());
        let err = first_name_chars(&"a".repeat(NAME_MAX_CHARS + 1)).unwrap_err();
        assert_eq!(err.message.as_deref(), Some("First name must not exceed 100 characters."));
        let err = family_name_chars("Le Guin").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Family name has non-alphanumeric characters."));
    }

    #[test]
    fn test_parse_iso8601_date() {
        let expected = NaiveDate::from_ymd_opt(1920, 1, 2);
        assert_eq!(parse_iso8601_date("1920-01-02"), expected);
        assert_eq!(parse_iso8601_date("1920-01-02T10:30:00Z"), expected);
        assert_eq!(parse_iso8601_date("1920-01-02T10:30"), expected);
        assert_eq!(parse_iso8601_date("02/01/1920"), None);
        assert_eq!(parse_iso8601_date("1920-13-02"), None);
    }

    #[test]
    fn test_optional_dates() {
        assert!(birth_date_iso8601("").is_ok());
        assert!(birth_date_iso8601("  ").is_ok());
        assert!(birth_date_iso8601("1920-01-02").is_ok());
        let err = death_date_iso8601("yesterday").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Invalid date of death"));
    }
}
