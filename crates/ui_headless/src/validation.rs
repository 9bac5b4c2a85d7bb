//! Field validation: built-in rules, custom validators and policies.

use std::{future::Future, rc::Rc, sync::OnceLock};

use futures::future::LocalBoxFuture;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tokens::InputType;

/// Message for an empty required field.
pub const REQUIRED_MESSAGE: &str = "This field is required";
/// Message for a value that fails the configured pattern.
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid format";
/// Message for a malformed email address.
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email format";
/// Message for a malformed URL.
pub const INVALID_URL_MESSAGE: &str = "Invalid URL format";
/// Message for a malformed phone number.
pub const INVALID_PHONE_MESSAGE: &str = "Invalid phone number";
/// Message for a non-numeric value in a number field.
pub const INVALID_NUMBER_MESSAGE: &str = "Invalid number";

/// Outcome of validating one value. Errors keep their discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether no errors were found.
    pub valid: bool,
    /// Human-readable error messages.
    pub errors: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

impl ValidationResult {
    /// A passing result.
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing result with a single message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![message.into()],
        }
    }

    /// Builds a result whose validity follows from `errors` being empty.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Failure raised by a custom validator itself (as opposed to an invalid value).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validator failed: {message}")]
pub struct ValidatorError {
    /// Description of what went wrong.
    pub message: String,
}

impl ValidatorError {
    /// Creates a validator error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Boxed future returned by [`Validator::validate`].
pub type ValidatorFuture<'a> = LocalBoxFuture<'a, Result<ValidationResult, ValidatorError>>;

/// Caller-supplied check run after the built-in rules.
pub trait Validator {
    /// Validates `value`.
    fn validate<'a>(&'a self, value: &'a str) -> ValidatorFuture<'a>;
}

struct SyncFnValidator<F>(F);

impl<F> Validator for SyncFnValidator<F>
where
    F: Fn(&str) -> ValidationResult,
{
    fn validate<'a>(&'a self, value: &'a str) -> ValidatorFuture<'a> {
        let result = (self.0)(value);
        Box::pin(async move { Ok(result) })
    }
}

struct AsyncFnValidator<F>(F);

impl<F, Fut> Validator for AsyncFnValidator<F>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<ValidationResult, ValidatorError>> + 'static,
{
    fn validate<'a>(&'a self, value: &'a str) -> ValidatorFuture<'a> {
        Box::pin((self.0)(value.to_string()))
    }
}

/// Wraps a synchronous check as a [`Validator`].
pub fn sync_validator(check: impl Fn(&str) -> ValidationResult + 'static) -> Rc<dyn Validator> {
    Rc::new(SyncFnValidator(check))
}

/// Wraps an asynchronous, fallible check as a [`Validator`].
pub fn async_validator<F, Fut>(check: F) -> Rc<dyn Validator>
where
    F: Fn(String) -> Fut + 'static,
    Fut: Future<Output = Result<ValidationResult, ValidatorError>> + 'static,
{
    Rc::new(AsyncFnValidator(check))
}

/// What an input does when a custom validator returns [`ValidatorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidatorFailurePolicy {
    /// Abort validation and return the error to the caller.
    #[default]
    Propagate,
    /// Log the failure and continue as if the validator passed.
    Ignore,
    /// Record the failure message as a validation error.
    ReportAsError,
}

/// How overlapping `validate` calls on one input are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationConcurrency {
    /// Every call runs; only the most recently started call commits its result.
    #[default]
    LatestWins,
    /// A call made while another is in flight is rejected.
    RejectOverlapping,
}

/// Synchronous rules derived from input configuration.
///
/// Lengths count Unicode scalar values, so `"é"` and `"😀"` are one
/// character each regardless of how many UTF-16 units they take.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuiltinRules {
    /// Reject blank values.
    pub required: bool,
    /// Minimum length in characters; zero disables the rule.
    pub min_length: Option<usize>,
    /// Maximum length in characters; zero disables the rule.
    pub max_length: Option<usize>,
    /// Regular expression the value must contain a match for.
    pub pattern: Option<String>,
    /// Type-specific format check.
    pub input_type: InputType,
}

impl BuiltinRules {
    /// Runs every rule against `value` and returns the failures in rule order:
    /// required, minimum length, maximum length, pattern, then type format.
    pub fn check(&self, value: &str) -> Vec<String> {
        let mut errors = Vec::new();
        let length = value.chars().count();

        if self.required && value.trim().is_empty() {
            errors.push(REQUIRED_MESSAGE.to_string());
        }
        if let Some(min) = self.min_length.filter(|min| *min > 0) {
            if length < min {
                errors.push(format!("Minimum length is {min}"));
            }
        }
        if let Some(max) = self.max_length.filter(|max| *max > 0) {
            if length > max {
                errors.push(format!("Maximum length is {max}"));
            }
        }
        if let Some(pattern) = self.pattern.as_deref().filter(|p| !p.is_empty()) {
            let matches = Regex::new(pattern)
                .map(|re| re.is_match(value))
                .unwrap_or(false);
            if !matches {
                errors.push(INVALID_FORMAT_MESSAGE.to_string());
            }
        }
        if !value.is_empty() {
            if let Some(message) = type_format_error(self.input_type, value) {
                errors.push(message.to_string());
            }
        }

        errors
    }
}

fn type_format_error(input_type: InputType, value: &str) -> Option<&'static str> {
    match input_type {
        InputType::Email if !is_valid_email(value) => Some(INVALID_EMAIL_MESSAGE),
        InputType::Url if !is_valid_url(value) => Some(INVALID_URL_MESSAGE),
        InputType::Tel if !is_valid_phone(value) => Some(INVALID_PHONE_MESSAGE),
        InputType::Number if !is_valid_number(value) => Some(INVALID_NUMBER_MESSAGE),
        _ => None,
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex"))
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("static phone regex"))
}

/// Returns whether `value` looks like `local@domain.tld`.
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Returns whether `value` parses as an absolute URL.
pub fn is_valid_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

/// Returns whether `value` is a plausible international phone number.
///
/// Whitespace is ignored; an optional leading `+` is followed by up to 16
/// digits, the first of which is non-zero.
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value.chars().filter(|ch| !ch.is_whitespace()).collect();
    phone_regex().is_match(&compact)
}

/// Returns whether `value` parses as a finite number.
pub fn is_valid_number(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(f64::is_finite)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn required_flags_blank_values() {
        let rules = BuiltinRules {
            required: true,
            ..BuiltinRules::default()
        };
        assert_eq!(rules.check(""), vec![REQUIRED_MESSAGE.to_string()]);
        assert_eq!(rules.check("   "), vec![REQUIRED_MESSAGE.to_string()]);
        assert!(rules.check("x").is_empty());
    }

    #[test]
    fn rules_report_in_declaration_order() {
        let rules = BuiltinRules {
            required: true,
            min_length: Some(3),
            max_length: Some(0),
            pattern: Some("^[0-9]+$".to_string()),
            input_type: InputType::Email,
        };
        assert_eq!(
            rules.check("ab"),
            vec![
                "Minimum length is 3".to_string(),
                INVALID_FORMAT_MESSAGE.to_string(),
                INVALID_EMAIL_MESSAGE.to_string(),
            ]
        );
    }

    #[test]
    fn maximum_length_allows_the_limit_and_rejects_beyond_it() {
        let rules = BuiltinRules {
            min_length: Some(2),
            max_length: Some(4),
            ..BuiltinRules::default()
        };
        assert!(rules.check("abcd").is_empty());
        assert_eq!(rules.check("abcde"), vec!["Maximum length is 4".to_string()]);
        assert_eq!(rules.check("a"), vec!["Minimum length is 2".to_string()]);
        assert!(rules.check("😀😀😀😀").is_empty());
        assert_eq!(rules.check("😀😀😀😀😀"), vec!["Maximum length is 4".to_string()]);
    }

    #[test]
    fn length_failures_precede_pattern_and_type_failures() {
        let rules = BuiltinRules {
            max_length: Some(5),
            pattern: Some("^[a-z@.]+$".to_string()),
            input_type: InputType::Email,
            ..BuiltinRules::default()
        };
        assert_eq!(
            rules.check("ABCDEFG"),
            vec![
                "Maximum length is 5".to_string(),
                INVALID_FORMAT_MESSAGE.to_string(),
                INVALID_EMAIL_MESSAGE.to_string(),
            ]
        );
    }

    #[test]
    fn type_checks_skip_empty_values() {
        let rules = BuiltinRules {
            input_type: InputType::Email,
            ..BuiltinRules::default()
        };
        assert!(rules.check("").is_empty());
        assert_eq!(rules.check("abc"), vec![INVALID_EMAIL_MESSAGE.to_string()]);
        assert!(rules.check("a@b.co").is_empty());
    }

    #[test]
    fn broken_pattern_reports_invalid_format() {
        let rules = BuiltinRules {
            pattern: Some("([".to_string()),
            ..BuiltinRules::default()
        };
        assert_eq!(rules.check("anything"), vec![INVALID_FORMAT_MESSAGE.to_string()]);
    }

    #[test]
    fn format_helpers() {
        assert!(is_valid_url("https://example.com/path"));
        assert!(!is_valid_url("example.com"));
        assert!(is_valid_phone("+1 555 0100"));
        assert!(!is_valid_phone("0123"));
        assert!(is_valid_number(" 4.5 "));
        assert!(!is_valid_number("NaN"));
        assert!(!is_valid_number("four"));
    }

    #[test]
    fn closure_validators_wrap_sync_and_async_checks() {
        let sync = sync_validator(|value| {
            if value.contains(' ') {
                ValidationResult::invalid("No spaces")
            } else {
                ValidationResult::ok()
            }
        });
        let failing = async_validator(|_value| async { Err(ValidatorError::new("backend down")) });

        assert_eq!(
            block_on(sync.validate("a b")),
            Ok(ValidationResult::invalid("No spaces"))
        );
        assert_eq!(
            block_on(failing.validate("x")).expect_err("fails").to_string(),
            "validator failed: backend down"
        );
    }
}
