use async_trait::async_trait;

use crate::account::errors::SignupError;
use crate::account::models::Account;
use crate::account::models::EmailAddress;
use crate::account::models::NewAccount;
use crate::account::models::SignupRequest;
use crate::domain::errors::NotifierError;
use crate::domain::errors::RepositoryError;

/// Port for the signup use case.
#[async_trait]
pub trait SignupServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `request` - Raw email and plaintext password
    ///
    /// # Returns
    /// Created account entity with its storage-assigned ID
    ///
    /// # Errors
    /// * `Validation` - Email or password breaks a signup rule
    /// * `AccountAlreadyExists` - An active account owns the email
    /// * `AccountInactive` - An inactive account owns the email
    /// * `Configuration` - Default role missing or inactive
    /// * `Password` / `Token` - Credential generation failed
    /// * `Repository` - Storage operation failed
    async fn signup(&self, request: SignupRequest) -> Result<Account, SignupError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Retrieve account by email address.
    ///
    /// # Arguments
    /// * `email` - Email address to search for
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    /// * `Mapping` - Stored row could not be read back
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<Account>, RepositoryError>;

    /// Persist new account to storage.
    ///
    /// # Arguments
    /// * `account` - Account to create
    ///
    /// # Returns
    /// Created account entity with its assigned ID
    ///
    /// # Errors
    /// * `UniqueViolation` - Email is already registered
    /// * `Database` - Database operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError>;
}

/// Outbound delivery of account notifications.
#[async_trait]
pub trait EmailNotifier: Send + Sync + 'static {
    /// Send an email verification message.
    ///
    /// # Arguments
    /// * `email` - Recipient address
    /// * `token` - Verification token to embed in the link
    ///
    /// # Errors
    /// * `DeliveryFailed` - Collaborator failed to accept the message
    async fn send_verification(
        &self,
        email: &EmailAddress,
        token: &str,
    ) -> Result<(), NotifierError>;
}
