//! Ordered request validation.
//!
//! Handlers declare their field rules in the order they should be checked and
//! get back the first failure as a [`FieldError`]. Later rules are never
//! evaluated once one has failed.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// Regex for validating slugs produced by [`crate::shared::slug::slugify`]
    /// - Valid: "summer-sale", "tv-4k", "a"
    /// - Invalid: "-sale", "sale-", "sale--2024", "Sale", "sale_2024"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Minimum password length accepted by register, reset and profile update
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A single failed field rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{label} is required")]
    Required {
        field: &'static str,
        label: &'static str,
    },

    #[error("{message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl FieldError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        FieldError::Invalid {
            field,
            message: message.into(),
        }
    }

    /// Name of the request field that failed
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Required { field, .. } | FieldError::Invalid { field, .. } => field,
        }
    }
}

enum Rule<'a> {
    Required {
        field: &'static str,
        label: &'static str,
        value: Option<&'a str>,
    },
    MinChars {
        field: &'static str,
        min: usize,
        value: Option<&'a str>,
        message: &'static str,
    },
    MaxBytes {
        field: &'static str,
        max: usize,
        size: Option<usize>,
        message: &'static str,
    },
}

impl Rule<'_> {
    fn evaluate(self) -> Result<(), FieldError> {
        match self {
            Rule::Required {
                field,
                label,
                value,
            } => {
                if is_blank(value) {
                    return Err(FieldError::Required { field, label });
                }
            }
            Rule::MinChars {
                field,
                min,
                value,
                message,
            } => {
                if let Some(v) = value.filter(|v| !v.is_empty()) {
                    if v.chars().count() < min {
                        return Err(FieldError::invalid(field, message));
                    }
                }
            }
            Rule::MaxBytes {
                field,
                max,
                size,
                message,
            } => {
                if size.is_some_and(|s| s > max) {
                    return Err(FieldError::invalid(field, message));
                }
            }
        }
        Ok(())
    }
}

/// Ordered list of field rules, evaluated until the first failure
#[derive(Default)]
pub struct Rules<'a> {
    rules: Vec<Rule<'a>>,
}

impl<'a> Rules<'a> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Value must be present and not blank
    pub fn required(
        mut self,
        field: &'static str,
        label: &'static str,
        value: Option<&'a str>,
    ) -> Self {
        self.rules.push(Rule::Required {
            field,
            label,
            value,
        });
        self
    }

    /// When a non-empty value is present it must have at least `min` characters
    pub fn min_chars(
        mut self,
        field: &'static str,
        min: usize,
        value: Option<&'a str>,
        message: &'static str,
    ) -> Self {
        self.rules.push(Rule::MinChars {
            field,
            min,
            value,
            message,
        });
        self
    }

    /// When a payload is present its size must not exceed `max` bytes
    pub fn max_bytes(
        mut self,
        field: &'static str,
        max: usize,
        size: Option<usize>,
        message: &'static str,
    ) -> Self {
        self.rules.push(Rule::MaxBytes {
            field,
            max,
            size,
            message,
        });
        self
    }

    pub fn check(self) -> Result<(), FieldError> {
        self.rules.into_iter().try_for_each(Rule::evaluate)
    }
}

/// True for `None`, empty or whitespace-only values
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Returns the trimmed value when it carries content
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_failing_rule_wins() {
        let result = Rules::new()
            .required("name", "Name", Some("Lamp"))
            .required("description", "Description", None)
            .required("price", "Price", None)
            .check();

        assert_eq!(
            result,
            Err(FieldError::Required {
                field: "description",
                label: "Description"
            })
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "Description is required"
        );
    }

    #[test]
    fn test_blank_value_is_missing() {
        let err = Rules::new()
            .required("email", "Email", Some("   "))
            .check()
            .unwrap_err();
        assert_eq!(err.field(), "email");
    }

    #[test]
    fn test_min_chars_skips_absent_value() {
        assert!(Rules::new()
            .min_chars("password", 6, None, "too short")
            .check()
            .is_ok());
        assert!(Rules::new()
            .min_chars("password", 6, Some(""), "too short")
            .check()
            .is_ok());

        let err = Rules::new()
            .min_chars("password", 6, Some("12345"), "too short")
            .check()
            .unwrap_err();
        assert_eq!(err, FieldError::invalid("password", "too short"));
    }

    #[test]
    fn test_max_bytes() {
        let rules = || Rules::new().max_bytes("photo", 10, Some(11), "too big");
        assert_eq!(rules().check().unwrap_err().field(), "photo");

        assert!(Rules::new()
            .max_bytes("photo", 10, Some(10), "too big")
            .check()
            .is_ok());
        assert!(Rules::new()
            .max_bytes("photo", 10, None, "too big")
            .check()
            .is_ok());
    }

    #[test]
    fn test_slug_regex() {
        assert!(SLUG_REGEX.is_match("summer-sale"));
        assert!(SLUG_REGEX.is_match("tv-4k"));
        assert!(!SLUG_REGEX.is_match("-sale"));
        assert!(!SLUG_REGEX.is_match("sale--2024"));
        assert!(!SLUG_REGEX.is_match("Sale"));
        assert!(!SLUG_REGEX.is_match(""));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Jo ")), Some("Jo"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
