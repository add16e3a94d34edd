use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::TokenError;

/// Random bytes per token; hex encoding doubles this to 64 characters.
pub const TOKEN_BYTES: usize = 32;

/// Lifetime of a verification token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Opaque email verification token with its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationToken {
    pub value: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl VerificationToken {
    /// Whether the token is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Generates email verification tokens from the operating system CSPRNG.
///
/// Tokens carry no structure and are not signed. Uniqueness rests on the
/// 256-bit entropy width, so callers do not need to check storage for
/// collisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerificationTokenGenerator;

impl VerificationTokenGenerator {
    /// Create a new token generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate a token issued now.
    ///
    /// # Returns
    /// Token with a 64-character lowercase hex value expiring in 24 hours
    ///
    /// # Errors
    /// * `EntropyUnavailable` - The OS random source failed
    pub fn generate(&self) -> Result<VerificationToken, TokenError> {
        self.generate_at(Utc::now())
    }

    /// Generate a token issued at the given instant.
    ///
    /// # Arguments
    /// * `issued_at` - Issue time; expiry is exactly `TOKEN_TTL_HOURS` later
    ///
    /// # Errors
    /// * `EntropyUnavailable` - The OS random source failed
    pub fn generate_at(&self, issued_at: DateTime<Utc>) -> Result<VerificationToken, TokenError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| TokenError::EntropyUnavailable(e.to_string()))?;

        Ok(VerificationToken {
            value: hex::encode(bytes),
            issued_at,
            expires_at: issued_at + Duration::hours(TOKEN_TTL_HOURS),
        })
    }
}
