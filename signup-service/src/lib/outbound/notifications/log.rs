use async_trait::async_trait;

use crate::account::models::EmailAddress;
use crate::account::ports::EmailNotifier;
use crate::config::Config;
use crate::domain::errors::NotifierError;

/// Notifier that hands verification links to the structured log.
///
/// Stands in for a mail collaborator: the link a mailer would deliver is
/// emitted as a tracing event for an external dispatcher to pick up.
#[derive(Debug, Clone)]
pub struct LogEmailNotifier {
    frontend_url: String,
}

impl LogEmailNotifier {
    pub fn new(config: &Config) -> Self {
        Self {
            frontend_url: config.frontend.url.trim_end_matches('/').to_string(),
        }
    }

    /// Link the recipient follows to confirm the address.
    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/auth/verify-email?token={}", self.frontend_url, token)
    }

    /// Link with all but the first four token characters masked.
    pub fn redacted_link(&self, token: &str) -> String {
        let prefix: String = token.chars().take(4).collect();
        self.verification_link(&format!("{}...", prefix))
    }
}

#[async_trait]
impl EmailNotifier for LogEmailNotifier {
    async fn send_verification(
        &self,
        email: &EmailAddress,
        token: &str,
    ) -> Result<(), NotifierError> {
        if token.is_empty() {
            return Err(NotifierError::DeliveryFailed(
                "refusing to dispatch an empty verification token".to_string(),
            ));
        }

        tracing::info!(
            target: "signup_service::notifications",
            email = %email,
            link = %self.redacted_link(token),
            expires_in_hours = auth::token::TOKEN_TTL_HOURS,
            "Verification email dispatched"
        );
        // Full link carries a live credential
        tracing::debug!(
            target: "signup_service::notifications",
            email = %email,
            link = %self.verification_link(token),
            "Verification link"
        );

        Ok(())
    }
}
