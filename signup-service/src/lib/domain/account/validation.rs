//! Signup input rules.
//!
//! Rules run in a fixed order and stop at the first violation. Lengths are
//! counted in characters, not bytes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::account::errors::ValidationError;
use crate::account::models::EmailAddress;
use crate::account::models::SignupRequest;
use crate::account::models::ValidatedSignup;

pub const EMAIL_MAX_LENGTH: usize = 100;
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 100;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

// Character classes by Unicode general category: Ll, Lu, Nd, and P or S.
static LOWERCASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Ll}").expect("lowercase class is a valid regex"));
static UPPERCASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Lu}").expect("uppercase class is a valid regex"));
static DECIMAL_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Nd}").expect("digit class is a valid regex"));
static SPECIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{P}\p{S}]").expect("special class is a valid regex"));

impl SignupRequest {
    /// Check the request against every email and password rule.
    ///
    /// Email rules run before password rules.
    ///
    /// # Returns
    /// The request with its email wrapped as a validated value object
    ///
    /// # Errors
    /// * The first violated [`ValidationError`]
    pub fn validate(self) -> Result<ValidatedSignup, ValidationError> {
        let email = EmailAddress::new(self.email)?;
        validate_password(&self.password)?;

        Ok(ValidatedSignup {
            email,
            password: self.password,
        })
    }
}

/// Check an email against the signup rules.
///
/// # Errors
/// * `EmailEmpty` - Empty input
/// * `EmailTooLong` - More than 100 characters
/// * `EmailInvalidFormat` - Does not match `local@domain.tld`
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailEmpty);
    }

    if email.chars().count() > EMAIL_MAX_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    Ok(())
}

/// Check a password against the signup strength rules.
///
/// # Errors
/// * The first violated rule among: empty, too short, too long, no
///   lowercase, no uppercase, no digit, no special character
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordEmpty);
    }

    let length = password.chars().count();
    if length < PASSWORD_MIN_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if length > PASSWORD_MAX_LENGTH {
        return Err(ValidationError::PasswordTooLong);
    }

    if !LOWERCASE.is_match(password) {
        return Err(ValidationError::PasswordNoLowercase);
    }
    if !UPPERCASE.is_match(password) {
        return Err(ValidationError::PasswordNoUppercase);
    }
    if !DECIMAL_DIGIT.is_match(password) {
        return Err(ValidationError::PasswordNoDigit);
    }
    if !SPECIAL.is_match(password) {
        return Err(ValidationError::PasswordNoSpecialChar);
    }

    Ok(())
}
