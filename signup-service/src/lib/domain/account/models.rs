use std::fmt;

use auth::VerificationToken;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::ValidationError;
use crate::account::validation::validate_email;
use crate::role::models::RoleId;

/// Account aggregate entity.
///
/// A registered account as held by storage. Only the signup use case
/// creates accounts; nothing here mutates them afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub role_id: RoleId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub email_verified: bool,
    pub verification: Option<PendingVerification>,
    pub phone_verified: bool,
    pub two_factor_enabled: bool,
    pub login_attempts: i32,
    pub created_date: DateTime<Utc>,
    pub record_status: RecordStatus,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.record_status == RecordStatus::Active
    }
}

/// Account built by the signup use case but not yet persisted.
///
/// Storage assigns the identifier; see [`NewAccount::into_account`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub role_id: RoleId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub email_verified: bool,
    pub verification: Option<PendingVerification>,
    pub phone_verified: bool,
    pub two_factor_enabled: bool,
    pub login_attempts: i32,
    pub created_date: DateTime<Utc>,
    pub record_status: RecordStatus,
}

impl NewAccount {
    /// Fresh, active, unverified account with all counters at zero.
    ///
    /// # Arguments
    /// * `role_id` - Role assigned at creation
    /// * `email` - Validated email address
    /// * `password_hash` - Hash of the submitted password
    /// * `verification` - Pending email verification, if issued
    /// * `created_date` - Creation timestamp
    pub fn new(
        role_id: RoleId,
        email: EmailAddress,
        password_hash: String,
        verification: Option<PendingVerification>,
        created_date: DateTime<Utc>,
    ) -> Self {
        Self {
            role_id,
            email,
            password_hash,
            email_verified: false,
            verification,
            phone_verified: false,
            two_factor_enabled: false,
            login_attempts: 0,
            created_date,
            record_status: RecordStatus::Active,
        }
    }

    /// Attach the storage-assigned identifier.
    pub fn into_account(self, id: AccountId) -> Account {
        Account {
            id,
            role_id: self.role_id,
            email: self.email,
            password_hash: self.password_hash,
            email_verified: self.email_verified,
            verification: self.verification,
            phone_verified: self.phone_verified,
            two_factor_enabled: self.two_factor_enabled,
            login_attempts: self.login_attempts,
            created_date: self.created_date,
            record_status: self.record_status,
        }
    }
}

/// Account identifier assigned by storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub i64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Logical lifecycle flag, distinct from physical row deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordStatus {
    Active,
    Inactive,
}

impl RecordStatus {
    /// Storage code for this status.
    pub fn code(&self) -> &'static str {
        match self {
            RecordStatus::Active => "0",
            RecordStatus::Inactive => "9",
        }
    }

    /// Parse a storage code.
    ///
    /// # Returns
    /// The matching status, or `None` for an unknown code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "0" => Some(RecordStatus::Active),
            "9" => Some(RecordStatus::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordStatus::Active => f.write_str("active"),
            RecordStatus::Inactive => f.write_str("inactive"),
        }
    }
}

/// Email address type
///
/// Only constructible from input that passes the signup email rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `EmailEmpty`, `EmailTooLong`, `EmailInvalidFormat` - first failing rule
    pub fn new(email: String) -> Result<Self, ValidationError> {
        validate_email(&email)?;
        Ok(Self(email))
    }

    /// Wrap an address read back from storage without re-validating it.
    pub(crate) fn from_stored(email: String) -> Self {
        Self(email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outstanding email verification for an account.
///
/// The token is single-use; consuming it belongs to the confirmation flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<VerificationToken> for PendingVerification {
    fn from(token: VerificationToken) -> Self {
        Self {
            token: token.value,
            expires_at: token.expires_at,
        }
    }
}

/// Raw signup input as received from a caller.
#[derive(Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Signup input that passed every validation rule.
///
/// The plaintext password lives only until it is hashed.
#[derive(Clone)]
pub struct ValidatedSignup {
    pub email: EmailAddress,
    pub password: String,
}

impl fmt::Debug for ValidatedSignup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedSignup")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_record_status_codes_round_trip() {
        assert_eq!(RecordStatus::from_code("0"), Some(RecordStatus::Active));
        assert_eq!(RecordStatus::from_code("9"), Some(RecordStatus::Inactive));
        // CHAR(1) columns may come back padded
        assert_eq!(RecordStatus::from_code("0 "), Some(RecordStatus::Active));
        assert_eq!(RecordStatus::from_code("x"), None);
        assert_eq!(RecordStatus::Active.code(), "0");
        assert_eq!(RecordStatus::Inactive.code(), "9");
    }

    #[test]
    fn test_new_account_defaults() {
        let now = Utc::now();
        let account = NewAccount::new(
            RoleId(3),
            EmailAddress::new("user@example.com".to_string()).unwrap(),
            "$argon2id$hash".to_string(),
            Some(PendingVerification {
                token: "ab".repeat(32),
                expires_at: now + Duration::hours(24),
            }),
            now,
        );

        assert!(!account.email_verified);
        assert!(!account.phone_verified);
        assert!(!account.two_factor_enabled);
        assert_eq!(account.login_attempts, 0);
        assert_eq!(account.record_status, RecordStatus::Active);
        assert_eq!(account.created_date, now);
    }

    #[test]
    fn test_into_account_keeps_fields() {
        let now = Utc::now();
        let new_account = NewAccount::new(
            RoleId(1),
            EmailAddress::new("user@example.com".to_string()).unwrap(),
            "$argon2id$hash".to_string(),
            None,
            now,
        );

        let account = new_account.clone().into_account(AccountId(42));

        assert_eq!(account.id, AccountId(42));
        assert_eq!(account.role_id, new_account.role_id);
        assert_eq!(account.email, new_account.email);
        assert!(account.is_active());
    }

    #[test]
    fn test_signup_request_debug_redacts_password() {
        let request = SignupRequest::new("user@example.com", "ValidPass123!");
        let printed = format!("{:?}", request);

        assert!(printed.contains("user@example.com"));
        assert!(!printed.contains("ValidPass123!"));
    }
}
