use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

use crate::domain::errors::RepositoryError;

/// A single violated signup input rule.
///
/// Display strings are user-facing and stable; `code()` gives a
/// machine-readable identifier for the same rule.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email cannot be empty")]
    EmailEmpty,

    #[error("Email cannot exceed 100 characters")]
    EmailTooLong,

    #[error("Email format is invalid")]
    EmailInvalidFormat,

    #[error("Password cannot be empty")]
    PasswordEmpty,

    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,

    #[error("Password cannot exceed 100 characters")]
    PasswordTooLong,

    #[error("Password must contain at least one lowercase letter")]
    PasswordNoLowercase,

    #[error("Password must contain at least one uppercase letter")]
    PasswordNoUppercase,

    #[error("Password must contain at least one digit")]
    PasswordNoDigit,

    #[error("Password must contain at least one special character")]
    PasswordNoSpecialChar,
}

impl ValidationError {
    /// Stable identifier for the violated rule.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmailEmpty => "email_empty",
            ValidationError::EmailTooLong => "email_too_long",
            ValidationError::EmailInvalidFormat => "email_invalid_format",
            ValidationError::PasswordEmpty => "password_empty",
            ValidationError::PasswordTooShort => "password_too_short",
            ValidationError::PasswordTooLong => "password_too_long",
            ValidationError::PasswordNoLowercase => "password_no_lowercase",
            ValidationError::PasswordNoUppercase => "password_no_uppercase",
            ValidationError::PasswordNoDigit => "password_no_digit",
            ValidationError::PasswordNoSpecialChar => "password_no_special_char",
        }
    }
}

/// Operator misconfiguration detected while handling a signup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("default role '{0}' not configured in system")]
    DefaultRoleMissing(String),

    #[error("default role '{0}' is not active")]
    DefaultRoleInactive(String),
}

/// Status class a [`SignupError`] maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Conflict,
    Internal,
}

/// Top-level error for the signup use case
#[derive(Debug, Clone, Error)]
pub enum SignupError {
    // User-actionable
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("A user with that email already exists")]
    AccountAlreadyExists,

    #[error("User account exists but is inactive")]
    AccountInactive,

    // Internal
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl SignupError {
    /// Classify the error for callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SignupError::Validation(_) => ErrorKind::BadRequest,
            SignupError::AccountAlreadyExists | SignupError::AccountInactive => {
                ErrorKind::Conflict
            }
            SignupError::Configuration(_)
            | SignupError::Password(_)
            | SignupError::Token(_)
            | SignupError::Repository(_) => ErrorKind::Internal,
        }
    }
}
