//! Checks run before a form is allowed to touch the network

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationErrors;

use crate::error::{Result, ValidationFailure};

pub(crate) static DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("digit pattern compiles"));

pub const PASSWORDS_DIFFER: &str = "Passwords do not match";
pub const IMAGES_ONLY: &str = "Please upload only image files (JPEG, PNG, etc.)";

/// Record `label` as missing when `value` is blank
pub fn require(failure: &mut ValidationFailure, label: &str, value: &str) {
    if value.trim().is_empty() {
        failure.missing(label);
    }
}

/// Record `label` as missing when `value` is `None`
pub fn require_some<T>(failure: &mut ValidationFailure, label: &str, value: Option<&T>) {
    if value.is_none() {
        failure.missing(label);
    }
}

pub fn is_digits(value: &str) -> bool {
    DIGITS.is_match(value.trim())
}

pub fn check_passwords(failure: &mut ValidationFailure, password: &str, confirmation: &str) {
    if password != confirmation {
        failure.invalid(PASSWORDS_DIFFER);
    }
}

/// Fold `validator` format errors into `failure`.
///
/// Fields already reported missing are skipped so a blank email is not also
/// reported as malformed.
pub fn merge_format_errors(
    failure: &mut ValidationFailure,
    outcome: std::result::Result<(), ValidationErrors>,
    labels: &[(&str, &str)],
) {
    let errors = match outcome {
        Ok(()) => return,
        Err(errors) => errors,
    };

    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        let field: &str = field.as_ref();
        let label = labels
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, label)| *label)
            .unwrap_or(field);
        if failure.missing.iter().any(|missing| missing == label) {
            continue;
        }
        for error in field_errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", label));
            messages.push(message);
        }
    }
    messages.sort();
    for message in messages {
        failure.invalid(message);
    }
}

/// `Ok(())` if nothing was recorded
pub fn finish(failure: ValidationFailure) -> Result<()> {
    failure.into_result()
}
