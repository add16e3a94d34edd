use std::time::Instant;

use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::account::models::RecordStatus;
use crate::domain::errors::RepositoryError;
use crate::role::models::Role;
use crate::role::models::RoleId;
use crate::role::ports::RoleRepository;

pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, FromRow)]
struct RoleRow {
    id: i64,
    code: String,
    name: String,
    record_status: String,
}

impl TryFrom<RoleRow> for Role {
    type Error = RepositoryError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        let record_status = RecordStatus::from_code(&row.record_status).ok_or_else(|| {
            RepositoryError::Mapping(format!(
                "unknown record status '{}' for role {}",
                row.record_status, row.code
            ))
        })?;

        Ok(Role {
            id: RoleId(row.id),
            code: row.code,
            name: row.name,
            record_status,
        })
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Role>, RepositoryError> {
        let started = Instant::now();

        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, code, name, record_status
            FROM roles
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(role_code = code, error = %e, "Role lookup failed");
            RepositoryError::Database(e.to_string())
        })?;

        tracing::debug!(
            role_code = code,
            found = row.is_some(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Role lookup by code"
        );

        row.map(Role::try_from).transpose()
    }
}
