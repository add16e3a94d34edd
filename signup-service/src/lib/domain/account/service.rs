use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::VerificationTokenGenerator;
use chrono::Utc;

use crate::account::errors::ConfigurationError;
use crate::account::errors::SignupError;
use crate::account::models::Account;
use crate::account::models::EmailAddress;
use crate::account::models::NewAccount;
use crate::account::models::PendingVerification;
use crate::account::models::SignupRequest;
use crate::account::ports::AccountRepository;
use crate::account::ports::EmailNotifier;
use crate::account::ports::SignupServicePort;
use crate::domain::errors::NotifierError;
use crate::role::models::Role;
use crate::role::models::DEFAULT_ROLE_CODE;
use crate::role::ports::RoleRepository;

/// Tunables for the signup use case.
#[derive(Debug, Clone)]
pub struct SignupSettings {
    /// Role code assigned to every new account.
    pub default_role_code: String,
    /// Upper bound on the verification email step.
    pub notification_timeout: Duration,
}

impl Default for SignupSettings {
    fn default() -> Self {
        Self {
            default_role_code: DEFAULT_ROLE_CODE.to_string(),
            notification_timeout: Duration::from_secs(10),
        }
    }
}

/// Domain service implementation for account signup.
///
/// Concrete implementation of SignupServicePort with dependency injection.
/// Holds no mutable state; concurrent signups share only the injected handles.
pub struct SignupService<AR, RR, EN>
where
    AR: AccountRepository,
    RR: RoleRepository,
    EN: EmailNotifier,
{
    accounts: Arc<AR>,
    roles: Arc<RR>,
    notifier: Arc<EN>,
    password_hasher: PasswordHasher,
    token_generator: VerificationTokenGenerator,
    settings: SignupSettings,
}

impl<AR, RR, EN> SignupService<AR, RR, EN>
where
    AR: AccountRepository,
    RR: RoleRepository,
    EN: EmailNotifier,
{
    /// Create a new signup service with injected dependencies.
    ///
    /// # Arguments
    /// * `accounts` - Account persistence implementation
    /// * `roles` - Role lookup implementation
    /// * `notifier` - Verification email delivery implementation
    /// * `settings` - Default role and notification bound
    ///
    /// # Returns
    /// Configured signup service instance
    pub fn new(
        accounts: Arc<AR>,
        roles: Arc<RR>,
        notifier: Arc<EN>,
        settings: SignupSettings,
    ) -> Self {
        Self {
            accounts,
            roles,
            notifier,
            password_hasher: PasswordHasher::new(),
            token_generator: VerificationTokenGenerator::new(),
            settings,
        }
    }

    async fn ensure_email_available(&self, email: &EmailAddress) -> Result<(), SignupError> {
        match self.accounts.find_by_email(email).await? {
            None => Ok(()),
            Some(existing) if existing.is_active() => {
                tracing::warn!(email = %email, "Signup rejected: account already exists");
                Err(SignupError::AccountAlreadyExists)
            }
            Some(existing) => {
                tracing::warn!(
                    email = %email,
                    status = %existing.record_status,
                    "Signup rejected: account exists but is inactive"
                );
                Err(SignupError::AccountInactive)
            }
        }
    }

    async fn resolve_default_role(&self) -> Result<Role, SignupError> {
        let code = &self.settings.default_role_code;

        let role = self
            .roles
            .find_by_code(code)
            .await?
            .ok_or_else(|| ConfigurationError::DefaultRoleMissing(code.clone()))?;

        if !role.is_active() {
            return Err(ConfigurationError::DefaultRoleInactive(code.clone()).into());
        }

        tracing::debug!(role_code = %role.code, role_id = %role.id, "Resolved default role");
        Ok(role)
    }

    /// Best-effort: the account already exists, so failures are only logged.
    async fn notify_verification(&self, email: &EmailAddress, token: &str) {
        let timeout = self.settings.notification_timeout;

        let outcome = tokio::time::timeout(timeout, self.notifier.send_verification(email, token))
            .await
            .unwrap_or(Err(NotifierError::Timeout(timeout.as_secs())));

        match outcome {
            Ok(()) => tracing::info!(email = %email, "Verification email sent"),
            Err(e) => tracing::warn!(
                email = %email,
                error = %e,
                "Failed to send verification email; account remains created"
            ),
        }
    }
}

#[async_trait]
impl<AR, RR, EN> SignupServicePort for SignupService<AR, RR, EN>
where
    AR: AccountRepository,
    RR: RoleRepository,
    EN: EmailNotifier,
{
    async fn signup(&self, request: SignupRequest) -> Result<Account, SignupError> {
        let signup = request.validate().map_err(|e| {
            tracing::warn!(rule = e.code(), "Signup rejected by validation");
            e
        })?;

        self.ensure_email_available(&signup.email).await?;
        let role = self.resolve_default_role().await?;

        let password_hash = self.password_hasher.hash(&signup.password)?;

        let now = Utc::now();
        let token = self.token_generator.generate_at(now)?;

        let new_account = NewAccount::new(
            role.id,
            signup.email,
            password_hash,
            Some(PendingVerification::from(token.clone())),
            now,
        );

        let account = self.accounts.create(new_account).await?;
        tracing::info!(
            account_id = %account.id,
            role_id = %account.role_id,
            email = %account.email,
            "Account created"
        );

        self.notify_verification(&account.email, &token.value).await;

        Ok(account)
    }
}
