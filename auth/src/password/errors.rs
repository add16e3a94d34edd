use thiserror::Error;

/// Failures raised by [`PasswordHasher`](super::PasswordHasher).
///
/// None of these are caused by the submitted password; a wrong password
/// is reported as `Ok(false)` by `verify`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParameters(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored hash is not a valid PHC string: {0}")]
    MalformedHash(String),
}
