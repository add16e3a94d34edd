use std::time::Instant;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::NewAccount;
use crate::account::models::PendingVerification;
use crate::account::models::RecordStatus;
use crate::account::ports::AccountRepository;
use crate::domain::errors::RepositoryError;
use crate::role::models::RoleId;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape of the `accounts` table.
#[derive(Debug, Clone, FromRow)]
struct AccountRow {
    id: i64,
    role_id: i64,
    email: String,
    password_hash: String,
    email_verified: bool,
    verification_token: Option<String>,
    verification_token_expires_at: Option<DateTime<Utc>>,
    phone_verified: bool,
    two_factor_enabled: bool,
    login_attempts: i32,
    created_date: DateTime<Utc>,
    record_status: String,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let record_status = RecordStatus::from_code(&row.record_status).ok_or_else(|| {
            RepositoryError::Mapping(format!(
                "unknown record status '{}' for account {}",
                row.record_status, row.id
            ))
        })?;

        // Token and expiry are only meaningful together
        let verification = match (row.verification_token, row.verification_token_expires_at) {
            (Some(token), Some(expires_at)) => Some(PendingVerification { token, expires_at }),
            _ => None,
        };

        Ok(Account {
            id: AccountId(row.id),
            role_id: RoleId(row.role_id),
            email: EmailAddress::from_stored(row.email),
            password_hash: row.password_hash,
            email_verified: row.email_verified,
            verification,
            phone_verified: row.phone_verified,
            two_factor_enabled: row.two_factor_enabled,
            login_attempts: row.login_attempts,
            created_date: row.created_date,
            record_status,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, RepositoryError> {
        let started = Instant::now();

        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, role_id, email, password_hash, email_verified,
                   verification_token, verification_token_expires_at,
                   phone_verified, two_factor_enabled, login_attempts,
                   created_date, record_status
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(email = %email, error = %e, "Account lookup failed");
            RepositoryError::Database(e.to_string())
        })?;

        tracing::debug!(
            email = %email,
            found = row.is_some(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Account lookup by email"
        );

        row.map(Account::try_from).transpose()
    }

    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        let started = Instant::now();
        let (token, expires_at) = match &account.verification {
            Some(v) => (Some(v.token.as_str()), Some(v.expires_at)),
            None => (None, None),
        };

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO accounts (
                role_id, email, password_hash, email_verified,
                verification_token, verification_token_expires_at,
                phone_verified, two_factor_enabled, login_attempts,
                created_date, record_status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(account.role_id.0)
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.email_verified)
        .bind(token)
        .bind(expires_at)
        .bind(account.phone_verified)
        .bind(account.two_factor_enabled)
        .bind(account.login_attempts)
        .bind(account.created_date)
        .bind(account.record_status.code())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(email = %account.email, error = %e, "Account insert failed");
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return RepositoryError::UniqueViolation(account.email.as_str().to_string());
                }
            }
            RepositoryError::Database(e.to_string())
        })?;

        tracing::debug!(
            account_id = id,
            role_id = %account.role_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Account inserted"
        );

        Ok(account.into_account(AccountId(id)))
    }
}
