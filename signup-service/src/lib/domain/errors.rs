use thiserror::Error;

/// Error for persistence operations behind the repository ports.
///
/// "No matching record" is not an error: lookups return `Ok(None)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Failed to map stored record: {0}")]
    Mapping(String),
}

/// Error for outbound notification delivery.
///
/// Represents failures that can occur when dispatching a verification email.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifierError {
    #[error("Failed to deliver message: {0}")]
    DeliveryFailed(String),

    #[error("Notification timed out after {0}s")]
    Timeout(u64),
}
